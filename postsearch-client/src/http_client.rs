// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Reqwest-backed JSONPlaceholder data fetcher.
//!
//! This client owns transport details only: request building, timeout and
//! status mapping, and JSON decoding into the domain model.

use crate::{ClientConfig, DataFetcher};
use async_trait::async_trait;
use postsearch_core::{FetchError, Post, SearchError, User};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

const USERS_ENDPOINT: &str = "users";
const POSTS_ENDPOINT: &str = "posts";

/// Data fetcher performing `GET /users` and `GET /posts` against one REST endpoint.
#[derive(Debug, Clone)]
pub struct JsonPlaceholderClient {
    client: Client,
    users_url: Url,
    posts_url: Url,
}

impl JsonPlaceholderClient {
    /// Build a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Client` when the reqwest client cannot be
    /// constructed or the endpoint URLs are invalid.
    pub fn new(config: &ClientConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|error| SearchError::client(error.to_string()))?;

        Ok(Self {
            client,
            users_url: config.endpoint(USERS_ENDPOINT)?,
            posts_url: config.endpoint(POSTS_ENDPOINT)?,
        })
    }

    async fn fetch_collection<T: DeserializeOwned>(&self, url: &Url) -> Result<Vec<T>, FetchError> {
        tracing::debug!(%url, "fetching collection");

        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        serde_json::from_slice(&body).map_err(|error| {
            FetchError::decode(format!("invalid JSON payload from {url}: {error}"))
        })
    }
}

#[async_trait]
impl DataFetcher for JsonPlaceholderClient {
    async fn fetch_users(&self) -> Result<Vec<User>, FetchError> {
        self.fetch_collection(&self.users_url).await
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>, FetchError> {
        self.fetch_collection(&self.posts_url).await
    }
}

fn map_transport_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::transport(format!("request timed out: {error}"))
    } else if error.is_connect() {
        FetchError::unavailable(error.to_string())
    } else {
        FetchError::transport(error.to_string())
    }
}
