// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Timer implementations for supported async runtimes.

#[cfg(feature = "runtime-tokio")]
mod tokio_impl {
    use crate::timer::Timer;
    use std::time::Duration;

    /// Timer backed by `tokio::time`; honours a paused Tokio clock.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct TokioTimer;

    impl Timer for TokioTimer {
        type Sleep = tokio::time::Sleep;

        fn sleep_future(&self, duration: Duration) -> Self::Sleep {
            tokio::time::sleep(duration)
        }
    }
}

#[cfg(feature = "runtime-tokio")]
pub use tokio_impl::TokioTimer;
