// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the postsearch workspace.
//!
//! This crate is for development and testing only.
//!
//! # Key Types
//!
//! ## `MockFetcher`
//!
//! A scriptable [`DataFetcher`](postsearch_client::DataFetcher): every call
//! either consumes the next scripted response or falls back to the default
//! one, optionally after a delay measured on the Tokio clock (so it cooperates
//! with `tokio::time::pause`).
//!
//! ```rust
//! use postsearch_test_utils::{fixtures, MockFetcher, Scripted};
//! use std::time::Duration;
//!
//! let fetcher = MockFetcher::new(fixtures::users(), fixtures::posts());
//! fetcher.push_users(Scripted::ok(fixtures::users()).delayed(Duration::from_secs(2)));
//! ```
//!
//! ## Fixtures
//!
//! - `fixtures::users()` - three users, ids 1..=3
//! - `fixtures::posts()` - four posts, one of them written by a missing user 4
//!
//! ## Helpers
//!
//! - [`test_channel`] - push-based test source for stream operators
//! - [`helpers::assert_no_element_emitted`] / [`helpers::unwrap_stream`]

pub mod fixtures;
pub mod helpers;
pub mod mock_fetcher;

use futures::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

pub use helpers::{assert_no_element_emitted, collect_until_terminal, unwrap_stream};
pub use mock_fetcher::{MockFetcher, Scripted};

/// Creates a push-based test source.
///
/// # Example
///
/// ```rust
/// use postsearch_test_utils::test_channel;
/// use futures::StreamExt;
///
/// # async fn example() {
/// let (tx, mut stream) = test_channel();
/// tx.send("rust".to_string()).unwrap();
/// assert_eq!(stream.next().await.as_deref(), Some("rust"));
/// # }
/// ```
pub fn test_channel<T: Send + 'static>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = T> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, UnboundedReceiverStream::new(rx))
}
