// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Distinct-until-changed operator that filters consecutive duplicates.

use core::pin::Pin;
use core::task::{Context, Poll};
use futures::Stream;
use pin_project::pin_project;

/// Extension trait providing the `distinct_until_changed` operator.
pub trait DistinctUntilChangedExt: Stream + Sized
where
    Self::Item: Clone + PartialEq,
{
    /// Emits values only when they differ from the previously emitted value.
    ///
    /// # Behavior
    ///
    /// - First value is always emitted (no previous value to compare)
    /// - Subsequent values are compared to the last emitted value
    /// - Only values where `current != previous` are emitted
    ///
    /// # Examples
    ///
    /// ```rust
    /// use postsearch_time::DistinctUntilChangedExt;
    /// use futures::{stream, StreamExt};
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let distinct = stream::iter(vec![1, 1, 2, 2, 2, 3, 2]).distinct_until_changed();
    ///
    /// assert_eq!(distinct.collect::<Vec<_>>().await, vec![1, 2, 3, 2]);
    /// # }
    /// ```
    fn distinct_until_changed(self) -> DistinctUntilChangedStream<Self>;

    /// Like [`distinct_until_changed`](Self::distinct_until_changed), but
    /// treats `last` as already emitted, so a leading item equal to it is
    /// dropped.
    ///
    /// ```rust
    /// use postsearch_time::DistinctUntilChangedExt;
    /// use futures::{stream, StreamExt};
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let distinct = stream::iter(vec![0, 0, 1, 1, 0]).distinct_until_changed_from(0);
    ///
    /// assert_eq!(distinct.collect::<Vec<_>>().await, vec![1, 0]);
    /// # }
    /// ```
    fn distinct_until_changed_from(self, last: Self::Item) -> DistinctUntilChangedStream<Self>;
}

impl<S> DistinctUntilChangedExt for S
where
    S: Stream,
    S::Item: Clone + PartialEq,
{
    fn distinct_until_changed(self) -> DistinctUntilChangedStream<Self> {
        DistinctUntilChangedStream {
            stream: self,
            last_value: None,
        }
    }

    fn distinct_until_changed_from(self, last: Self::Item) -> DistinctUntilChangedStream<Self> {
        DistinctUntilChangedStream {
            stream: self,
            last_value: Some(last),
        }
    }
}

/// Stream returned by [`DistinctUntilChangedExt::distinct_until_changed`].
#[pin_project]
pub struct DistinctUntilChangedStream<S: Stream> {
    #[pin]
    stream: S,
    last_value: Option<S::Item>,
}

impl<S> Stream for DistinctUntilChangedStream<S>
where
    S: Stream,
    S::Item: Clone + PartialEq,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            match this.stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(value)) => {
                    if this.last_value.as_ref() == Some(&value) {
                        continue;
                    }
                    *this.last_value = Some(value.clone());
                    return Poll::Ready(Some(value));
                }
                other => return other,
            }
        }
    }
}
