// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::timer::Timer;
use core::pin::Pin;
use futures::Stream;
use pin_project::pin_project;
use std::future::Future;
use std::task::{Context, Poll};
use std::time::Duration;

/// Extension trait providing the `debounce` operator for streams.
pub trait DebounceExt<TM>: Stream + Sized
where
    TM: Timer,
{
    /// Debounces the stream by the specified duration.
    ///
    /// The debounce operator waits for a pause in the input stream of at least
    /// the given duration before emitting the latest value. If a new value
    /// arrives before the duration elapses, the timer is reset and only the
    /// newest value is eventually emitted.
    ///
    /// This implements **trailing debounce** semantics:
    /// - When a value arrives, start/restart the timer
    /// - If no new value arrives before the timer expires, emit the latest value
    /// - If a new value arrives, discard the pending value and restart the timer
    /// - When the stream ends, emit any pending value immediately
    ///
    /// # Arguments
    ///
    /// * `duration` - The duration of required inactivity before emitting a value
    /// * `timer` - The timer driving the quiet-period sleeps
    fn debounce_with_timer(self, duration: Duration, timer: TM) -> Pin<Box<DebounceStream<Self, TM>>>;
}

impl<S, TM> DebounceExt<TM> for S
where
    S: Stream,
    TM: Timer,
{
    fn debounce_with_timer(self, duration: Duration, timer: TM) -> Pin<Box<DebounceStream<Self, TM>>> {
        Box::pin(DebounceStream {
            stream: self,
            duration,
            timer,
            pending_value: None,
            sleep: None,
            stream_ended: false,
        })
    }
}

/// Stream returned by [`DebounceExt::debounce_with_timer`].
#[pin_project]
pub struct DebounceStream<S: Stream, TM: Timer> {
    #[pin]
    stream: S,
    duration: Duration,
    timer: TM,
    pending_value: Option<S::Item>,
    #[pin]
    sleep: Option<TM::Sleep>,
    stream_ended: bool,
}

impl<S, TM> Stream for DebounceStream<S, TM>
where
    S: Stream,
    TM: Timer,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if *this.stream_ended {
                return Poll::Ready(this.pending_value.take());
            }

            if this.pending_value.is_some() {
                if let Some(sleep) = this.sleep.as_mut().as_pin_mut() {
                    if sleep.poll(cx).is_ready() {
                        this.sleep.set(None);
                        return Poll::Ready(this.pending_value.take());
                    }
                }
            }

            match this.stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(value)) => {
                    // Restart the quiet period; the newer value replaces the pending one
                    this.sleep
                        .set(Some(this.timer.sleep_future(*this.duration)));
                    *this.pending_value = Some(value);
                    continue;
                }
                Poll::Ready(None) => {
                    *this.stream_ended = true;
                    continue;
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

// =============================================================================
// Convenience extension trait with default timer
// =============================================================================

/// Extension trait for debouncing with the default timer of the active runtime.
pub trait DebounceWithDefaultTimerExt: Stream + Sized {
    /// The timer selected by the active runtime feature.
    type DefaultTimer: Timer;

    /// Debounces the stream using the default timer for the active runtime.
    ///
    /// ```rust,no_run
    /// use postsearch_time::prelude::*;
    /// use std::time::Duration;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let source = futures::stream::iter(vec!["a", "ab", "abc"]);
    /// // No timer parameter needed
    /// let debounced = source.debounce(Duration::from_millis(500));
    /// # }
    /// ```
    fn debounce(self, duration: Duration) -> Pin<Box<DebounceStream<Self, Self::DefaultTimer>>>;
}

#[cfg(feature = "runtime-tokio")]
impl<S> DebounceWithDefaultTimerExt for S
where
    S: Stream,
{
    type DefaultTimer = crate::TokioTimer;

    fn debounce(self, duration: Duration) -> Pin<Box<DebounceStream<Self, Self::DefaultTimer>>> {
        DebounceExt::debounce_with_timer(self, duration, crate::TokioTimer)
    }
}
