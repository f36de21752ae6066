// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for postsearch.
//!
//! Two families live here:
//!
//! - [`FetchError`] is the only failure the query pipeline handles. It is
//!   produced by a data fetcher and ends up inside
//!   [`QueryState::Error`](crate::QueryState::Error), so it is cheap to clone
//!   and comparable.
//! - [`SearchError`] covers lifecycle problems of the pipeline itself, such as
//!   feeding input into a pipeline that has already been shut down.
//!
//! # Examples
//!
//! ```
//! use postsearch_core::FetchError;
//!
//! let error = FetchError::status(503);
//! assert_eq!(error.to_string(), "Bad server response: HTTP 503");
//! ```

use crate::SubjectError;

/// Failure reported by a data fetcher for either the users or the posts request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("Transport error: {context}")]
    Transport {
        /// Description of the transport failure
        context: String,
    },

    /// The server answered with anything other than `200 OK`.
    #[error("Bad server response: HTTP {code}")]
    Status {
        /// HTTP status code returned by the server
        code: u16,
    },

    /// The response body could not be decoded into the expected collection.
    #[error("Decode error: {context}")]
    Decode {
        /// Description of the decoding failure
        context: String,
    },

    /// The data source is not reachable at all (offline, not configured).
    #[error("Data source unavailable: {context}")]
    Unavailable {
        /// Description of why the source is unavailable
        context: String,
    },
}

impl FetchError {
    /// Create a transport error with the given context
    pub fn transport(context: impl Into<String>) -> Self {
        Self::Transport {
            context: context.into(),
        }
    }

    /// Create a status error for a non-200 response
    #[must_use]
    pub const fn status(code: u16) -> Self {
        Self::Status { code }
    }

    /// Create a decode error with the given context
    pub fn decode(context: impl Into<String>) -> Self {
        Self::Decode {
            context: context.into(),
        }
    }

    /// Create an unavailable error with the given context
    pub fn unavailable(context: impl Into<String>) -> Self {
        Self::Unavailable {
            context: context.into(),
        }
    }

    /// Human readable description, as published in `QueryState::Error`.
    #[must_use]
    pub fn description(&self) -> String {
        self.to_string()
    }
}

/// Lifecycle error of the search pipeline and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The pipeline has been shut down and no longer accepts queries.
    #[error("Search pipeline is closed")]
    PipelineClosed,

    /// The state subject rejected an operation.
    #[error("State subject error: {0}")]
    Subject(#[from] SubjectError),

    /// A data fetcher client could not be constructed.
    #[error("Client error: {0}")]
    Client(String),

    /// The pipeline's driver task panicked or was aborted.
    #[error("Search driver failed: {context}")]
    Driver {
        /// Description of the task failure
        context: String,
    },
}

impl SearchError {
    /// Create a client construction error with the given context
    pub fn client(context: impl Into<String>) -> Self {
        Self::Client(context.into())
    }

    /// Create a driver failure with the given context
    pub fn driver(context: impl Into<String>) -> Self {
        Self::Driver {
            context: context.into(),
        }
    }
}

/// Specialized Result type for postsearch lifecycle operations.
pub type Result<T> = std::result::Result<T, SearchError>;
