// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use parking_lot::Mutex;
use postsearch_client::DataFetcher;
use postsearch_core::{FetchError, Post, User};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// One scripted answer of a [`MockFetcher`] request.
#[derive(Debug, Clone)]
pub struct Scripted<T> {
    pub result: Result<T, FetchError>,
    pub delay: Duration,
}

impl<T> Scripted<T> {
    pub fn ok(value: T) -> Self {
        Self {
            result: Ok(value),
            delay: Duration::ZERO,
        }
    }

    pub fn err(error: FetchError) -> Self {
        Self {
            result: Err(error),
            delay: Duration::ZERO,
        }
    }

    /// Resolve only after `delay` on the Tokio clock.
    #[must_use]
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

struct Endpoint<T> {
    default: Scripted<T>,
    queue: VecDeque<Scripted<T>>,
}

impl<T: Clone> Endpoint<T> {
    fn new(default: Scripted<T>) -> Self {
        Self {
            default,
            queue: VecDeque::new(),
        }
    }

    fn next(&mut self) -> Scripted<T> {
        self.queue
            .pop_front()
            .unwrap_or_else(|| self.default.clone())
    }
}

/// Scriptable in-memory data fetcher.
///
/// Each call first consumes the next response pushed with
/// [`push_users`](Self::push_users) / [`push_posts`](Self::push_posts) and
/// otherwise answers with the default response.
pub struct MockFetcher {
    users: Mutex<Endpoint<Vec<User>>>,
    posts: Mutex<Endpoint<Vec<Post>>>,
    users_calls: AtomicUsize,
    posts_calls: AtomicUsize,
    users_completed: AtomicUsize,
    posts_completed: AtomicUsize,
}

impl MockFetcher {
    /// Always answers immediately with `users` and `posts`.
    #[must_use]
    pub fn new(users: Vec<User>, posts: Vec<Post>) -> Self {
        Self::scripted(Scripted::ok(users), Scripted::ok(posts))
    }

    /// Both requests always fail with `error`.
    #[must_use]
    pub fn failing(error: FetchError) -> Self {
        Self::scripted(Scripted::err(error.clone()), Scripted::err(error))
    }

    #[must_use]
    pub fn scripted(users: Scripted<Vec<User>>, posts: Scripted<Vec<Post>>) -> Self {
        Self {
            users: Mutex::new(Endpoint::new(users)),
            posts: Mutex::new(Endpoint::new(posts)),
            users_calls: AtomicUsize::new(0),
            posts_calls: AtomicUsize::new(0),
            users_completed: AtomicUsize::new(0),
            posts_completed: AtomicUsize::new(0),
        }
    }

    /// Delay every default answer by `delay`.
    #[must_use]
    pub fn with_delay(self, delay: Duration) -> Self {
        self.users.lock().default.delay = delay;
        self.posts.lock().default.delay = delay;
        self
    }

    pub fn push_users(&self, response: Scripted<Vec<User>>) {
        self.users.lock().queue.push_back(response);
    }

    pub fn push_posts(&self, response: Scripted<Vec<Post>>) {
        self.posts.lock().queue.push_back(response);
    }

    /// Number of `fetch_users` calls started.
    pub fn users_calls(&self) -> usize {
        self.users_calls.load(Ordering::SeqCst)
    }

    /// Number of `fetch_posts` calls started.
    pub fn posts_calls(&self) -> usize {
        self.posts_calls.load(Ordering::SeqCst)
    }

    /// Number of `fetch_users` calls that ran to completion (not abandoned).
    pub fn users_completed(&self) -> usize {
        self.users_completed.load(Ordering::SeqCst)
    }

    /// Number of `fetch_posts` calls that ran to completion (not abandoned).
    pub fn posts_completed(&self) -> usize {
        self.posts_completed.load(Ordering::SeqCst)
    }
}

async fn answer<T>(scripted: Scripted<T>, completed: &AtomicUsize) -> Result<T, FetchError> {
    if !scripted.delay.is_zero() {
        tokio::time::sleep(scripted.delay).await;
    }
    completed.fetch_add(1, Ordering::SeqCst);
    scripted.result
}

#[async_trait]
impl DataFetcher for MockFetcher {
    async fn fetch_users(&self) -> Result<Vec<User>, FetchError> {
        self.users_calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.users.lock().next();
        answer(scripted, &self.users_completed).await
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>, FetchError> {
        self.posts_calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.posts.lock().next();
        answer(scripted, &self.posts_completed).await
    }
}
