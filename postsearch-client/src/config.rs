// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use postsearch_core::SearchError;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_USER_AGENT: &str = concat!("postsearch/", env!("CARGO_PKG_VERSION"));

/// Connection settings for [`JsonPlaceholderClient`](crate::JsonPlaceholderClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root of the REST API; `users` and `posts` are resolved against it.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    /// Config pointing at `base_url` with default timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Client` if `base_url` is not an absolute URL that
    /// can serve as a base.
    pub fn new(base_url: &str) -> Result<Self, SearchError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|error| SearchError::client(format!("invalid base url {base_url:?}: {error}")))?;
        if base_url.cannot_be_a_base() {
            return Err(SearchError::client(format!(
                "base url {base_url} cannot be a base"
            )));
        }
        // Url::join replaces the last segment unless the path ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Absolute URL of `endpoint` below the base URL.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Client` if the joined URL is invalid.
    pub fn endpoint(&self, endpoint: &str) -> Result<Url, SearchError> {
        self.base_url
            .join(endpoint)
            .map_err(|error| SearchError::client(format!("invalid endpoint {endpoint:?}: {error}")))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(&format!("{DEFAULT_BASE_URL}/"))
                .unwrap_or_else(|_| unreachable!("default base url is valid")),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}
