// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Replay-latest, multi-subscriber state cell.
//!
//! A [`StateSubject`] owns a single current value and broadcasts every
//! replacement to all active subscribers.
//!
//! ## Characteristics
//!
//! - **Replay-latest**: a new subscriber first receives the current value,
//!   then every later publication.
//! - **Ordered**: all subscribers observe publications in the same total order.
//! - **Unbounded**: uses unbounded mpsc channels internally (no backpressure).
//! - **Thread-safe**: cheap to clone; all clones share the same state.
//! - **Close**: closing ends every subscriber stream.
//!
//! ## Example
//!
//! ```
//! use postsearch_core::StateSubject;
//! use futures::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let subject = StateSubject::new(0);
//! subject.publish(1).unwrap();
//!
//! // Late subscriber still sees the current value first
//! let mut stream = subject.subscribe().unwrap();
//! subject.publish(2).unwrap();
//! subject.close();
//!
//! assert_eq!(stream.next().await, Some(1));
//! assert_eq!(stream.next().await, Some(2));
//! assert_eq!(stream.next().await, None);
//! # }
//! ```

use crate::SubjectError;
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::Stream;
use parking_lot::Mutex;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

struct SubjectState<T> {
    closed: bool,
    current: T,
    senders: Vec<UnboundedSender<T>>,
}

/// Stream of values handed out by [`StateSubject::subscribe`].
pub struct StateStream<T> {
    inner: UnboundedReceiver<T>,
}

impl<T> Stream for StateStream<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

/// A hot subject that remembers its latest value.
///
/// See the [module documentation](self) for details.
pub struct StateSubject<T: Clone + Send + 'static> {
    state: Arc<Mutex<SubjectState<T>>>,
}

impl<T: Clone + Send + 'static> StateSubject<T> {
    /// Creates an open subject holding `initial` as its current value.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            state: Arc::new(Mutex::new(SubjectState {
                closed: false,
                current: initial,
                senders: Vec::new(),
            })),
        }
    }

    /// Subscribe and receive the current value followed by every later one.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject has been closed.
    pub fn subscribe(&self) -> Result<StateStream<T>, SubjectError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SubjectError::Closed);
        }

        let (tx, rx) = mpsc::unbounded();
        // The receiver is alive, so the replayed value cannot be rejected.
        let _ = tx.unbounded_send(state.current.clone());
        state.senders.push(tx);
        Ok(StateStream { inner: rx })
    }

    /// Replace the current value and broadcast it to all subscribers.
    ///
    /// Subscribers whose stream has been dropped are pruned here.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject has been closed.
    pub fn publish(&self, value: T) -> Result<(), SubjectError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SubjectError::Closed);
        }

        state
            .senders
            .retain(|tx| tx.unbounded_send(value.clone()).is_ok());
        state.current = value;
        Ok(())
    }

    /// Returns a clone of the current value.
    #[must_use]
    pub fn current(&self) -> T {
        self.state.lock().current.clone()
    }

    /// Closes the subject, completing all subscriber streams.
    ///
    /// The last value stays readable through [`current`](Self::current).
    /// Closing is idempotent.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        state.senders.clear();
    }

    /// Returns `true` if the subject has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Returns the number of subscribers seen alive at the last publish.
    ///
    /// Dropped subscribers are removed on the next `publish()`, not
    /// immediately when dropped.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().senders.len()
    }
}

impl<T: Clone + Send + Default + 'static> Default for StateSubject<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + Send + 'static> Clone for StateSubject<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}
