// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream::StreamExt;
use futures::Stream;
use postsearch_core::QueryState;
use std::fmt::Debug;
use std::time::Duration;
use tokio::time::{sleep, timeout};

pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
    T: Debug,
{
    tokio::select! {
        item = stream.next() => {
            panic!("Unexpected element emitted, expected no output: {item:?}");
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {}
    }
}

/// Waits up to `timeout_ms` for the next element.
///
/// Returns `None` if the stream ended or nothing arrived in time.
pub async fn unwrap_stream<S, T>(stream: &mut S, timeout_ms: u64) -> Option<T>
where
    S: Stream<Item = T> + Unpin,
{
    timeout(Duration::from_millis(timeout_ms), stream.next())
        .await
        .ok()
        .flatten()
}

/// Collects states until the first terminal one (`Success`/`Error`) is seen.
///
/// # Panics
///
/// Panics if the stream ends first.
pub async fn collect_until_terminal<S>(stream: &mut S) -> Vec<QueryState>
where
    S: Stream<Item = QueryState> + Unpin,
{
    let mut states = Vec::new();
    loop {
        let state = stream
            .next()
            .await
            .expect("state stream ended before a terminal state");
        let terminal = state.is_terminal();
        states.push(state);
        if terminal {
            return states;
        }
    }
}
