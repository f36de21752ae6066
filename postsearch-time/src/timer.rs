// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::future::Future;
use core::time::Duration;
use std::fmt::Debug;

pub trait Timer: Clone + Send + Sync + Debug + 'static {
    type Sleep: Future<Output = ()> + Send;

    /// Creates a future that sleeps for the specified duration.
    /// Use this in poll-based contexts where you need to store and poll the future.
    fn sleep_future(&self, duration: Duration) -> Self::Sleep;
}
