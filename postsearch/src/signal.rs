// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::future::{pending, Future};
use std::io;
use tracing::warn;

/// Resolves once `signal` reports an interrupt.
///
/// If the listener cannot be installed the failure is logged and the returned
/// future never resolves, so the caller keeps running without Ctrl+C support.
///
/// ```rust,no_run
/// use postsearch::signal::interrupted;
///
/// # #[tokio::main]
/// # async fn main() {
/// interrupted(tokio::signal::ctrl_c()).await;
/// # }
/// ```
pub async fn interrupted<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(error) = signal.await {
        warn!(%error, "failed to listen for Ctrl+C");
        pending::<()>().await;
    }
}
