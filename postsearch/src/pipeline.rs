// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The debounced, generation-tagged search pipeline.
//!
//! Raw input flows through a trailing debounce and a consecutive-duplicate
//! filter. Every surviving (effective) query bumps a generation counter and
//! either publishes `Initial` (empty query) or publishes `Loading` and starts
//! a users/posts fetch pair. Starting a new cycle aborts the fetches of the
//! previous one, and a fetch outcome is published only if its generation is
//! still the current one when it completes.
//!
//! All state transitions happen on a single driver task, so the generation
//! counter and the published state can never disagree.

use crate::PipelineConfig;
use futures::{Stream, StreamExt};
use postsearch_client::DataFetcher;
use postsearch_core::{
    join, CancellationToken, FetchError, QueryState, Result, SearchError, StateStream,
    StateSubject, SubjectError,
};
use postsearch_time::prelude::*;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{self, JoinError, JoinHandle, JoinSet};
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{debug, error, info, warn};

/// Search front end: feed it raw query text, observe [`QueryState`]s.
///
/// # Example
///
/// ```rust,no_run
/// use postsearch::{PipelineConfig, SearchPipeline};
/// use postsearch_client::{ClientConfig, JsonPlaceholderClient};
/// use futures::StreamExt;
///
/// # #[tokio::main]
/// # async fn main() -> anyhow::Result<()> {
/// let client = JsonPlaceholderClient::new(&ClientConfig::default())?;
/// let pipeline = SearchPipeline::new(client, PipelineConfig::default());
/// let mut states = pipeline.subscribe()?;
///
/// pipeline.query_changed("qui")?;
/// pipeline.query_changed("quis")?;
///
/// while let Some(state) = states.next().await {
///     println!("{}", state.name());
///     if state.is_terminal() {
///         break;
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct SearchPipeline {
    input: Option<mpsc::UnboundedSender<String>>,
    states: StateSubject<QueryState>,
    cancel: CancellationToken,
    driver: Option<JoinHandle<()>>,
}

impl SearchPipeline {
    /// Creates a pipeline in the `Initial` state and spawns its driver task.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub fn new<F: DataFetcher>(fetcher: F, config: PipelineConfig) -> Self {
        let (input, rx) = mpsc::unbounded_channel::<String>();
        let states = StateSubject::new(QueryState::Initial);
        let cancel = CancellationToken::new();

        let queries = UnboundedReceiverStream::new(rx)
            .debounce(config.debounce)
            // The search field starts out empty, so a leading "" is a repeat
            .distinct_until_changed_from(String::new());

        let driver = Driver {
            fetcher: Arc::new(fetcher),
            states: states.clone(),
            generation: 0,
            fetches: JoinSet::new(),
            current: None,
        };

        let handle = tokio::spawn({
            let states = states.clone();
            let cancel = cancel.clone();
            async move {
                if let Err(error) = driver.run(queries, &cancel).await {
                    debug!(%error, "state subject closed, stopping search driver");
                }
                states.close();
            }
        });

        debug!(debounce = ?config.debounce, "search pipeline started");

        Self {
            input: Some(input),
            states,
            cancel,
            driver: Some(handle),
        }
    }

    /// Feeds the full current content of the search field.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::PipelineClosed`] after [`shutdown`](Self::shutdown).
    pub fn query_changed(&self, raw: impl Into<String>) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(SearchError::PipelineClosed);
        }
        let input = self.input.as_ref().ok_or(SearchError::PipelineClosed)?;
        input
            .send(raw.into())
            .map_err(|_| SearchError::PipelineClosed)
    }

    /// The most recently published state.
    #[must_use]
    pub fn state(&self) -> QueryState {
        self.states.current()
    }

    /// Replay-latest stream of states: the current one, then every later one.
    ///
    /// The stream ends when the pipeline stops.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Subject`] if the pipeline has already stopped.
    pub fn subscribe(&self) -> Result<StateStream<QueryState>> {
        Ok(self.states.subscribe()?)
    }

    /// Stops the driver, aborts in-flight fetches and ends all state streams.
    ///
    /// Idempotent.
    pub fn shutdown(&self) {
        if !self.cancel.is_cancelled() {
            info!("search pipeline shutting down");
        }
        self.cancel.cancel();
        self.states.close();
    }

    /// Returns `true` once the pipeline no longer publishes states.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled() || self.states.is_closed()
    }

    /// Closes the input and waits until the last pending query is resolved.
    ///
    /// A query still inside its debounce window is dispatched immediately.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Driver`] if the driver task panicked.
    pub async fn finish(mut self) -> Result<()> {
        self.input.take();
        if let Some(driver) = self.driver.take() {
            driver
                .await
                .map_err(|error| SearchError::driver(error.to_string()))?;
        }
        Ok(())
    }
}

impl Drop for SearchPipeline {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

struct Completion {
    generation: u64,
    query: String,
    state: QueryState,
}

struct Driver<F> {
    fetcher: Arc<F>,
    states: StateSubject<QueryState>,
    generation: u64,
    fetches: JoinSet<Completion>,
    // Task running the fetch pair of the current generation
    current: Option<task::Id>,
}

impl<F: DataFetcher> Driver<F> {
    async fn run<S>(
        mut self,
        mut queries: S,
        cancel: &CancellationToken,
    ) -> std::result::Result<(), SubjectError>
    where
        S: Stream<Item = String> + Unpin,
    {
        let mut input_open = true;

        while input_open || !self.fetches.is_empty() {
            tokio::select! {
                biased;

                () = cancel.cancelled() => {
                    debug!(in_flight = self.fetches.len(), "search driver cancelled");
                    break;
                }

                Some(joined) = self.fetches.join_next_with_id(), if !self.fetches.is_empty() => {
                    match joined {
                        Ok((_, completion)) => self.complete(completion)?,
                        Err(join_error) => self.task_failed(&join_error)?,
                    }
                }

                query = queries.next(), if input_open => match query {
                    Some(query) => self.dispatch(query)?,
                    None => {
                        debug!(in_flight = self.fetches.len(), "query input closed");
                        input_open = false;
                    }
                },
            }
        }

        Ok(())
    }

    fn dispatch(&mut self, query: String) -> std::result::Result<(), SubjectError> {
        self.generation += 1;
        debug!(generation = self.generation, %query, "effective query");
        self.abort_in_flight();

        if query.is_empty() {
            info!(state = "initial", "query cleared");
            return self.states.publish(QueryState::Initial);
        }

        self.states.publish(QueryState::Loading)?;
        info!(state = "loading", %query, "searching posts");

        let fetcher = Arc::clone(&self.fetcher);
        let generation = self.generation;
        let handle = self.fetches.spawn(async move {
            let state = search(fetcher.as_ref(), &query).await;
            Completion {
                generation,
                query,
                state,
            }
        });
        self.current = Some(handle.id());
        Ok(())
    }

    fn abort_in_flight(&mut self) {
        if !self.fetches.is_empty() {
            debug!(superseded = self.fetches.len(), "aborting superseded fetches");
            self.fetches.abort_all();
        }
        self.current = None;
    }

    fn task_failed(&mut self, join_error: &JoinError) -> std::result::Result<(), SubjectError> {
        if join_error.is_cancelled() {
            debug!(task = %join_error.id(), "superseded fetch aborted");
            return Ok(());
        }
        if self.current != Some(join_error.id()) {
            warn!(error = %join_error, "superseded fetch task failed");
            return Ok(());
        }

        self.current = None;
        error!(state = "error", error = %join_error, "fetch task failed");
        self.states.publish(QueryState::Error(FetchError::unavailable(
            join_error.to_string(),
        )))
    }

    fn complete(&mut self, completion: Completion) -> std::result::Result<(), SubjectError> {
        let Completion {
            generation,
            query,
            state,
        } = completion;

        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                %query,
                outcome = state.name(),
                "discarding superseded result"
            );
            return Ok(());
        }

        self.current = None;
        match &state {
            QueryState::Success(posts) => {
                info!(state = "success", %query, matches = posts.len(), "search completed");
            }
            QueryState::Error(fetch_error) => {
                error!(state = "error", %query, error = %fetch_error, "search failed");
            }
            QueryState::Initial | QueryState::Loading => {}
        }
        self.states.publish(state)
    }
}

/// Runs both fetches concurrently and joins them.
///
/// The first failure observed wins; the other request is dropped.
async fn search<F: DataFetcher + ?Sized>(fetcher: &F, query: &str) -> QueryState {
    match tokio::try_join!(fetcher.fetch_users(), fetcher.fetch_posts()) {
        Ok((users, posts)) => QueryState::Success(join(&users, &posts, query)),
        Err(fetch_error) => QueryState::Error(fetch_error),
    }
}
