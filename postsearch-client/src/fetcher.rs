// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use postsearch_core::{FetchError, Post, User};
use std::sync::Arc;

/// Source of the two collections joined by the search pipeline.
///
/// Both requests are one-shot, may be invoked repeatedly and concurrently, and
/// carry no ordering guarantee relative to each other. Dropping the returned
/// future abandons the request.
#[async_trait]
pub trait DataFetcher: Send + Sync + 'static {
    /// Fetch every user.
    async fn fetch_users(&self) -> Result<Vec<User>, FetchError>;

    /// Fetch every post.
    async fn fetch_posts(&self) -> Result<Vec<Post>, FetchError>;
}

#[async_trait]
impl<F: DataFetcher + ?Sized> DataFetcher for Arc<F> {
    async fn fetch_users(&self) -> Result<Vec<User>, FetchError> {
        (**self).fetch_users().await
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>, FetchError> {
        (**self).fetch_posts().await
    }
}
