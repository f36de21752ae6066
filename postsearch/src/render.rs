// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Plain-text rendering of [`QueryState`] for terminal sinks.

use postsearch_core::{PostDetail, QueryState};
use std::fmt::Write;

pub const INITIAL_MESSAGE: &str = "Enter a title above to find matching posts";
pub const LOADING_MESSAGE: &str = "Loading...";
pub const NO_RESULTS_MESSAGE: &str = "No results found. Try a different title";
pub const ERROR_MESSAGE: &str = "Oops! Something went wrong. Try again later";

/// Renders one state as the text block a terminal sink prints.
///
/// ```
/// use postsearch::render::{render, LOADING_MESSAGE};
/// use postsearch_core::QueryState;
///
/// assert_eq!(render(&QueryState::Loading), LOADING_MESSAGE);
/// ```
#[must_use]
pub fn render(state: &QueryState) -> String {
    match state {
        QueryState::Initial => INITIAL_MESSAGE.to_string(),
        QueryState::Loading => LOADING_MESSAGE.to_string(),
        QueryState::Success(posts) if posts.is_empty() => NO_RESULTS_MESSAGE.to_string(),
        QueryState::Success(posts) => render_posts(posts),
        // The cause goes to the log, not to the user.
        QueryState::Error(_) => ERROR_MESSAGE.to_string(),
    }
}

fn render_posts(posts: &[PostDetail]) -> String {
    let mut out = String::new();
    for (index, post) in posts.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{}", post.title);
        let _ = writeln!(out, "{}", post.body);
        let _ = writeln!(out, "@{}", post.username);
    }
    out.truncate(out.trim_end().len());
    out
}
