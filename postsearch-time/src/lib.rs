// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Time-based and deduplicating stream operators for the search pipeline.
//!
//! # Overview
//!
//! - **`Timer` trait** - Runtime-agnostic timer abstraction
//! - **`TokioTimer`** - Tokio implementation (feature `runtime-tokio`, default)
//! - **`DebounceExt`** - Extension trait for `.debounce_with_timer(duration, timer)`
//!   and, with a default timer, `.debounce(duration)`
//! - **`DistinctUntilChangedExt`** - Extension trait for `.distinct_until_changed()`
//!
//! # Example
//!
//! ```rust,no_run
//! use postsearch_time::prelude::*;
//! use futures::stream::StreamExt;
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let (tx, rx) = futures::channel::mpsc::unbounded::<String>();
//!
//! // Keystrokes collapse into one query after 500ms of quiet,
//! // and repeating the previous query is ignored.
//! let mut queries = rx
//!     .debounce(Duration::from_millis(500))
//!     .distinct_until_changed();
//!
//! tx.unbounded_send("ru".to_string()).unwrap();
//! tx.unbounded_send("rust".to_string()).unwrap();
//! assert_eq!(queries.next().await.as_deref(), Some("rust"));
//! # }
//! ```

mod debounce;
mod distinct_until_changed;
pub mod runtimes;
pub mod timer;

pub mod prelude;

pub use debounce::{DebounceExt, DebounceWithDefaultTimerExt};
pub use distinct_until_changed::DistinctUntilChangedExt;

#[cfg(feature = "runtime-tokio")]
pub use runtimes::TokioTimer;
