// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Postsearch
//!
//! Search posts by title while the user types.
//!
//! ## Overview
//!
//! [`SearchPipeline`] turns a stream of raw query edits into a stream of
//! [`QueryState`]s:
//!
//! - edits are debounced (500 ms by default) and consecutive duplicates are dropped
//! - an empty query resets the state to `Initial` without fetching
//! - any other query publishes `Loading`, fetches users and posts concurrently
//!   through a [`DataFetcher`] and publishes `Success` or `Error`
//! - results of superseded queries are discarded
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use postsearch::prelude::*;
//! use futures::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = JsonPlaceholderClient::new(&ClientConfig::default())?;
//!     let pipeline = SearchPipeline::new(client, PipelineConfig::default());
//!     let mut states = pipeline.subscribe()?;
//!
//!     pipeline.query_changed("dolorem")?;
//!     while let Some(state) = states.next().await {
//!         println!("{}", render(&state));
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod pipeline;
pub mod render;
pub mod signal;

pub use config::PipelineConfig;
pub use pipeline::SearchPipeline;

// Re-export the collaborator types a caller needs
pub use postsearch_client::{ClientConfig, DataFetcher, JsonPlaceholderClient};
pub use postsearch_core::{FetchError, Post, PostDetail, QueryState, SearchError, User};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::render::render;
    pub use crate::{PipelineConfig, SearchPipeline};
    pub use postsearch_client::{ClientConfig, DataFetcher, JsonPlaceholderClient};
    pub use postsearch_core::{QueryState, SearchError};
}
