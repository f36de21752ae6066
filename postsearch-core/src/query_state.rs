// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{FetchError, PostDetail};

/// The result state published by the search pipeline.
///
/// Exactly one state is current at a time. A state is never mutated; every
/// effective query or fetch outcome replaces it with a new value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QueryState {
    /// No query has been entered (or the query was cleared).
    #[default]
    Initial,
    /// A fetch for the current query is in flight.
    Loading,
    /// The fetch completed; matching posts in source order, possibly empty.
    Success(Vec<PostDetail>),
    /// One of the two fetches failed.
    Error(FetchError),
}

impl QueryState {
    /// Stable lowercase tag of the variant.
    ///
    /// ```
    /// use postsearch_core::QueryState;
    ///
    /// assert_eq!(QueryState::Initial.name(), "initial");
    /// assert_eq!(QueryState::Success(Vec::new()).name(), "success");
    /// ```
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Loading => "loading",
            Self::Success(_) => "success",
            Self::Error(_) => "error",
        }
    }

    /// Returns `true` for the outcome states (`Success` and `Error`).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Error(_))
    }

    /// Matching posts, if this is a `Success`.
    #[must_use]
    pub fn posts(&self) -> Option<&[PostDetail]> {
        match self {
            Self::Success(posts) => Some(posts),
            _ => None,
        }
    }
}
