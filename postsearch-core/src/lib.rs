// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Core types for the postsearch query pipeline.
//!
//! - [`User`], [`Post`] and the derived [`PostDetail`] view entity
//! - [`QueryState`], the three-state (plus initial) result published per query
//! - [`join`], the pure join engine combining posts with their authors
//! - [`StateSubject`], a replay-latest, multi-subscriber state cell
//! - [`CancellationToken`] for cooperative shutdown of background tasks
pub mod cancellation_token;
pub mod error;
pub mod join;
pub mod model;
pub mod query_state;
pub mod state_subject;
pub mod subject_error;

pub use self::cancellation_token::CancellationToken;
pub use self::error::{FetchError, Result, SearchError};
pub use self::join::join;
pub use self::model::{Post, PostDetail, User};
pub use self::query_state::QueryState;
pub use self::state_subject::{StateStream, StateSubject};
pub use self::subject_error::SubjectError;
