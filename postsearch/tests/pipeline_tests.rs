// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::StreamExt;
use async_trait::async_trait;
use postsearch::{
    DataFetcher, FetchError, PipelineConfig, Post, QueryState, SearchError, SearchPipeline, User,
};
use postsearch_test_utils::{
    assert_no_element_emitted, collect_until_terminal, fixtures, unwrap_stream, MockFetcher,
    Scripted,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{advance, sleep, timeout, Instant};

fn pipeline_with(fetcher: &Arc<MockFetcher>) -> SearchPipeline {
    SearchPipeline::new(Arc::clone(fetcher), PipelineConfig::default())
}

fn default_fetcher() -> Arc<MockFetcher> {
    Arc::new(MockFetcher::new(fixtures::users(), fixtures::posts()))
}

/// Fetcher whose users request panics mid-flight.
struct PanickingFetcher;

#[async_trait]
impl DataFetcher for PanickingFetcher {
    async fn fetch_users(&self) -> Result<Vec<User>, FetchError> {
        panic!("users request blew up");
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>, FetchError> {
        Ok(fixtures::posts())
    }
}

/// Feeds one edit and lets the driver pick it up before the clock moves.
async fn type_text(pipeline: &SearchPipeline, text: &str) -> anyhow::Result<()> {
    pipeline.query_changed(text)?;
    tokio::task::yield_now().await;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_pipeline_starts_initial() -> anyhow::Result<()> {
    // Arrange
    let fetcher = default_fetcher();
    let pipeline = pipeline_with(&fetcher);

    // Act
    let mut states = pipeline.subscribe()?;

    // Assert
    assert_eq!(pipeline.state(), QueryState::Initial);
    assert_eq!(unwrap_stream(&mut states, 0).await, Some(QueryState::Initial));
    assert_no_element_emitted(&mut states, 1_000).await;
    assert_eq!(fetcher.users_calls(), 0);
    assert_eq!(fetcher.posts_calls(), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_burst_within_window_dispatches_last_query_once() -> anyhow::Result<()> {
    // Arrange
    let fetcher = default_fetcher();
    let pipeline = pipeline_with(&fetcher);
    let mut states = pipeline.subscribe()?;
    assert_eq!(unwrap_stream(&mut states, 0).await, Some(QueryState::Initial));

    // Act
    type_text(&pipeline, "a").await?;
    advance(Duration::from_millis(100)).await;
    type_text(&pipeline, "ab").await?;
    advance(Duration::from_millis(100)).await;
    type_text(&pipeline, "abc").await?;
    let observed = collect_until_terminal(&mut states).await;

    // Assert
    assert_eq!(
        observed,
        vec![QueryState::Loading, QueryState::Success(Vec::new())]
    );
    assert_eq!(fetcher.users_calls(), 1);
    assert_eq!(fetcher.posts_calls(), 1);
    assert_no_element_emitted(&mut states, 1_000).await;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_query_dispatched_only_after_quiet_period() -> anyhow::Result<()> {
    // Arrange
    let fetcher = default_fetcher();
    let pipeline = pipeline_with(&fetcher);
    let mut states = pipeline.subscribe()?;
    assert_eq!(unwrap_stream(&mut states, 0).await, Some(QueryState::Initial));

    // Act
    type_text(&pipeline, "Title 1").await?;
    let typed_at = Instant::now();
    advance(Duration::from_millis(499)).await;

    // Assert
    assert_no_element_emitted(&mut states, 0).await;
    assert_eq!(fetcher.posts_calls(), 0);

    assert_eq!(unwrap_stream(&mut states, 10).await, Some(QueryState::Loading));
    assert!(typed_at.elapsed() >= Duration::from_millis(500));
    assert_eq!(
        unwrap_stream(&mut states, 10).await,
        Some(QueryState::Success(fixtures::title_1_details()))
    );
    assert_eq!(
        pipeline.state(),
        QueryState::Success(fixtures::title_1_details())
    );
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_success_joins_and_filters_case_insensitively() -> anyhow::Result<()> {
    // Arrange
    let fetcher = default_fetcher();
    let pipeline = pipeline_with(&fetcher);
    let mut states = pipeline.subscribe()?;
    assert_eq!(unwrap_stream(&mut states, 0).await, Some(QueryState::Initial));

    // Act
    type_text(&pipeline, "TITLE").await?;
    let observed = collect_until_terminal(&mut states).await;

    // Assert
    let matches: Vec<(i64, &str)> = observed[1]
        .posts()
        .unwrap_or_default()
        .iter()
        .map(|post| (post.post_id, post.username.as_str()))
        .collect();
    assert_eq!(observed[0], QueryState::Loading);
    assert_eq!(matches, vec![(1, "lala1"), (2, "lele1"), (3, "lili1")]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_repeated_effective_query_is_ignored() -> anyhow::Result<()> {
    // Arrange
    let fetcher = default_fetcher();
    let pipeline = pipeline_with(&fetcher);
    let mut states = pipeline.subscribe()?;
    assert_eq!(unwrap_stream(&mut states, 0).await, Some(QueryState::Initial));
    type_text(&pipeline, "Title 1").await?;
    collect_until_terminal(&mut states).await;

    // Act
    type_text(&pipeline, "Title").await?;
    advance(Duration::from_millis(100)).await;
    type_text(&pipeline, "Title 1").await?;
    advance(Duration::from_millis(600)).await;

    // Assert
    assert_no_element_emitted(&mut states, 1_000).await;
    assert_eq!(fetcher.users_calls(), 1);
    assert_eq!(fetcher.posts_calls(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_empty_query_resets_to_initial_without_fetching() -> anyhow::Result<()> {
    // Arrange
    let fetcher = default_fetcher();
    let pipeline = pipeline_with(&fetcher);
    let mut states = pipeline.subscribe()?;
    assert_eq!(unwrap_stream(&mut states, 0).await, Some(QueryState::Initial));
    type_text(&pipeline, "Title 1").await?;
    collect_until_terminal(&mut states).await;

    // Act
    type_text(&pipeline, "").await?;

    // Assert
    assert_eq!(
        unwrap_stream(&mut states, 1_000).await,
        Some(QueryState::Initial)
    );
    assert_no_element_emitted(&mut states, 1_000).await;
    assert_eq!(fetcher.posts_calls(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_empty_query_supersedes_in_flight_fetch() -> anyhow::Result<()> {
    // Arrange
    let fetcher = Arc::new(
        MockFetcher::new(fixtures::users(), fixtures::posts()).with_delay(Duration::from_secs(1)),
    );
    let pipeline = pipeline_with(&fetcher);
    let mut states = pipeline.subscribe()?;
    assert_eq!(unwrap_stream(&mut states, 0).await, Some(QueryState::Initial));
    type_text(&pipeline, "Title 1").await?;
    assert_eq!(
        unwrap_stream(&mut states, 1_000).await,
        Some(QueryState::Loading)
    );

    // Act
    type_text(&pipeline, "").await?;

    // Assert
    assert_eq!(
        unwrap_stream(&mut states, 1_000).await,
        Some(QueryState::Initial)
    );
    assert_no_element_emitted(&mut states, 2_000).await;
    assert_eq!(fetcher.posts_calls(), 1);
    assert_eq!(fetcher.posts_completed(), 0);
    assert_eq!(pipeline.state(), QueryState::Initial);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_superseded_success_is_never_published() -> anyhow::Result<()> {
    // Arrange
    let fetcher = default_fetcher();
    fetcher.push_users(Scripted::ok(fixtures::users()).delayed(Duration::from_secs(1)));
    fetcher.push_posts(Scripted::ok(fixtures::posts()).delayed(Duration::from_secs(1)));
    let pipeline = pipeline_with(&fetcher);
    let mut states = pipeline.subscribe()?;
    assert_eq!(unwrap_stream(&mut states, 0).await, Some(QueryState::Initial));

    type_text(&pipeline, "Title 2").await?;
    assert_eq!(
        unwrap_stream(&mut states, 1_000).await,
        Some(QueryState::Loading)
    );
    advance(Duration::from_millis(100)).await;

    // Act
    type_text(&pipeline, "Title 1").await?;
    let observed = collect_until_terminal(&mut states).await;

    // Assert
    assert_eq!(
        observed,
        vec![
            QueryState::Loading,
            QueryState::Success(fixtures::title_1_details())
        ]
    );
    // The first cycle was aborted when the second one started
    assert_no_element_emitted(&mut states, 2_000).await;
    assert_eq!(fetcher.posts_calls(), 2);
    assert_eq!(fetcher.posts_completed(), 1);
    assert_eq!(
        pipeline.state(),
        QueryState::Success(fixtures::title_1_details())
    );
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_superseded_fetch_cannot_land_mid_cycle() -> anyhow::Result<()> {
    // Arrange
    let fetcher = default_fetcher();
    fetcher.push_users(Scripted::ok(fixtures::users()).delayed(Duration::from_secs(1)));
    fetcher.push_posts(Scripted::ok(fixtures::posts()).delayed(Duration::from_secs(1)));
    fetcher.push_users(Scripted::ok(fixtures::users()).delayed(Duration::from_secs(3)));
    fetcher.push_posts(Scripted::ok(fixtures::posts()).delayed(Duration::from_secs(3)));
    let pipeline = pipeline_with(&fetcher);
    let mut states = pipeline.subscribe()?;
    assert_eq!(unwrap_stream(&mut states, 0).await, Some(QueryState::Initial));

    type_text(&pipeline, "Title 2").await?;
    assert_eq!(
        unwrap_stream(&mut states, 1_000).await,
        Some(QueryState::Loading)
    );

    // Act
    type_text(&pipeline, "Title 1").await?;
    assert_eq!(
        unwrap_stream(&mut states, 1_000).await,
        Some(QueryState::Loading)
    );

    // Assert
    // "Title 2" would have resolved in this window had it not been aborted
    assert_no_element_emitted(&mut states, 1_500).await;
    assert_eq!(fetcher.posts_completed(), 0);
    assert_eq!(pipeline.state(), QueryState::Loading);
    assert_eq!(
        unwrap_stream(&mut states, 5_000).await,
        Some(QueryState::Success(fixtures::title_1_details()))
    );
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_superseded_failure_is_silently_discarded() -> anyhow::Result<()> {
    // Arrange
    let fetcher = default_fetcher();
    fetcher.push_posts(Scripted::err(FetchError::status(500)).delayed(Duration::from_secs(1)));
    let pipeline = pipeline_with(&fetcher);
    let mut states = pipeline.subscribe()?;
    assert_eq!(unwrap_stream(&mut states, 0).await, Some(QueryState::Initial));

    type_text(&pipeline, "Title 2").await?;
    assert_eq!(
        unwrap_stream(&mut states, 1_000).await,
        Some(QueryState::Loading)
    );
    advance(Duration::from_millis(100)).await;

    // Act
    type_text(&pipeline, "Title 1").await?;
    let observed = collect_until_terminal(&mut states).await;

    // Assert
    assert_eq!(
        observed,
        vec![
            QueryState::Loading,
            QueryState::Success(fixtures::title_1_details())
        ]
    );
    assert_no_element_emitted(&mut states, 2_000).await;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_double_failure_publishes_first_observed() -> anyhow::Result<()> {
    // Arrange
    let fetcher = Arc::new(MockFetcher::scripted(
        Scripted::err(FetchError::status(500)).delayed(Duration::from_millis(200)),
        Scripted::err(FetchError::unavailable("posts offline")).delayed(Duration::from_millis(100)),
    ));
    let pipeline = pipeline_with(&fetcher);
    let mut states = pipeline.subscribe()?;
    assert_eq!(unwrap_stream(&mut states, 0).await, Some(QueryState::Initial));

    // Act
    type_text(&pipeline, "Title 1").await?;
    let observed = collect_until_terminal(&mut states).await;

    // Assert
    assert_eq!(
        observed,
        vec![
            QueryState::Loading,
            QueryState::Error(FetchError::unavailable("posts offline"))
        ]
    );
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_single_failure_abandons_other_request() -> anyhow::Result<()> {
    // Arrange
    let fetcher = Arc::new(MockFetcher::scripted(
        Scripted::ok(fixtures::users()).delayed(Duration::from_secs(1)),
        Scripted::err(FetchError::decode("expected an array")),
    ));
    let pipeline = pipeline_with(&fetcher);
    let mut states = pipeline.subscribe()?;
    assert_eq!(unwrap_stream(&mut states, 0).await, Some(QueryState::Initial));

    // Act
    type_text(&pipeline, "Title 1").await?;
    let observed = collect_until_terminal(&mut states).await;
    advance(Duration::from_secs(2)).await;

    // Assert
    assert_eq!(
        observed,
        vec![
            QueryState::Loading,
            QueryState::Error(FetchError::decode("expected an array"))
        ]
    );
    assert_eq!(fetcher.users_calls(), 1);
    assert_eq!(fetcher.users_completed(), 0);
    assert_no_element_emitted(&mut states, 0).await;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_pipeline_recovers_after_error() -> anyhow::Result<()> {
    // Arrange
    let fetcher = default_fetcher();
    fetcher.push_posts(Scripted::err(FetchError::transport("connection reset")));
    let pipeline = pipeline_with(&fetcher);
    let mut states = pipeline.subscribe()?;
    assert_eq!(unwrap_stream(&mut states, 0).await, Some(QueryState::Initial));
    type_text(&pipeline, "Title 1").await?;
    let failed = collect_until_terminal(&mut states).await;

    // Act
    type_text(&pipeline, "title 1").await?;
    let recovered = collect_until_terminal(&mut states).await;

    // Assert
    assert_eq!(
        failed,
        vec![
            QueryState::Loading,
            QueryState::Error(FetchError::transport("connection reset"))
        ]
    );
    assert_eq!(
        recovered,
        vec![
            QueryState::Loading,
            QueryState::Success(fixtures::title_1_details())
        ]
    );
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_late_subscriber_replays_current_state() -> anyhow::Result<()> {
    // Arrange
    let fetcher = default_fetcher();
    let pipeline = pipeline_with(&fetcher);
    let mut early = pipeline.subscribe()?;
    type_text(&pipeline, "Title 1").await?;
    let observed = collect_until_terminal(&mut early).await;

    // Act
    let mut late = pipeline.subscribe()?;

    // Assert
    assert_eq!(
        observed,
        vec![
            QueryState::Initial,
            QueryState::Loading,
            QueryState::Success(fixtures::title_1_details())
        ]
    );
    assert_eq!(
        unwrap_stream(&mut late, 0).await,
        Some(QueryState::Success(fixtures::title_1_details()))
    );
    assert_no_element_emitted(&mut late, 1_000).await;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_rejects_input_and_ends_streams() -> anyhow::Result<()> {
    // Arrange
    let fetcher = default_fetcher();
    let pipeline = pipeline_with(&fetcher);
    let mut states = pipeline.subscribe()?;
    assert_eq!(unwrap_stream(&mut states, 0).await, Some(QueryState::Initial));

    // Act
    pipeline.shutdown();

    // Assert
    assert!(pipeline.is_closed());
    assert!(matches!(
        pipeline.query_changed("Title 1"),
        Err(SearchError::PipelineClosed)
    ));
    assert!(matches!(pipeline.subscribe(), Err(SearchError::Subject(_))));
    assert_eq!(timeout(Duration::from_secs(1), states.next()).await?, None);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_aborts_in_flight_fetches() -> anyhow::Result<()> {
    // Arrange
    let fetcher = Arc::new(
        MockFetcher::new(fixtures::users(), fixtures::posts()).with_delay(Duration::from_secs(1)),
    );
    let pipeline = pipeline_with(&fetcher);
    let mut states = pipeline.subscribe()?;
    assert_eq!(unwrap_stream(&mut states, 0).await, Some(QueryState::Initial));
    type_text(&pipeline, "Title 1").await?;
    assert_eq!(
        unwrap_stream(&mut states, 1_000).await,
        Some(QueryState::Loading)
    );

    // Act
    pipeline.shutdown();
    sleep(Duration::from_millis(10)).await;
    advance(Duration::from_secs(2)).await;

    // Assert
    assert_eq!(fetcher.posts_calls(), 1);
    assert_eq!(fetcher.posts_completed(), 0);
    assert_eq!(pipeline.state(), QueryState::Loading);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_finish_flushes_pending_query() -> anyhow::Result<()> {
    // Arrange
    let fetcher = default_fetcher();
    let pipeline = pipeline_with(&fetcher);
    let mut states = pipeline.subscribe()?;
    assert_eq!(unwrap_stream(&mut states, 0).await, Some(QueryState::Initial));
    type_text(&pipeline, "Title 1").await?;
    let started = Instant::now();

    // Act
    pipeline.finish().await?;

    // Assert
    assert!(started.elapsed() < Duration::from_millis(500));
    let rest: Vec<QueryState> = states.collect().await;
    assert_eq!(
        rest,
        vec![
            QueryState::Loading,
            QueryState::Success(fixtures::title_1_details())
        ]
    );
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_drop_ends_state_streams() -> anyhow::Result<()> {
    // Arrange
    let fetcher = default_fetcher();
    let pipeline = pipeline_with(&fetcher);
    let mut states = pipeline.subscribe()?;
    assert_eq!(unwrap_stream(&mut states, 0).await, Some(QueryState::Initial));

    // Act
    drop(pipeline);

    // Assert
    assert_eq!(timeout(Duration::from_secs(1), states.next()).await?, None);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_custom_debounce_window() -> anyhow::Result<()> {
    // Arrange
    let fetcher = default_fetcher();
    let pipeline = SearchPipeline::new(
        Arc::clone(&fetcher),
        PipelineConfig::default().with_debounce(Duration::from_millis(50)),
    );
    let mut states = pipeline.subscribe()?;
    assert_eq!(unwrap_stream(&mut states, 0).await, Some(QueryState::Initial));

    // Act
    type_text(&pipeline, "Title 1").await?;
    let typed_at = Instant::now();
    let observed = collect_until_terminal(&mut states).await;

    // Assert
    assert!(typed_at.elapsed() < Duration::from_millis(500));
    assert_eq!(
        observed,
        vec![
            QueryState::Loading,
            QueryState::Success(fixtures::title_1_details())
        ]
    );
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_leading_empty_query_publishes_nothing() -> anyhow::Result<()> {
    // Arrange
    let fetcher = default_fetcher();
    let pipeline = pipeline_with(&fetcher);
    let mut states = pipeline.subscribe()?;
    assert_eq!(unwrap_stream(&mut states, 0).await, Some(QueryState::Initial));
    advance(Duration::from_secs(2)).await;

    // Act
    type_text(&pipeline, "").await?;

    // Assert
    assert_no_element_emitted(&mut states, 1_000).await;
    assert_eq!(fetcher.posts_calls(), 0);
    assert_eq!(pipeline.state(), QueryState::Initial);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_same_text_after_error_is_deduplicated() -> anyhow::Result<()> {
    // Arrange
    let fetcher = default_fetcher();
    fetcher.push_posts(Scripted::err(FetchError::status(503)));
    let pipeline = pipeline_with(&fetcher);
    let mut states = pipeline.subscribe()?;
    assert_eq!(unwrap_stream(&mut states, 0).await, Some(QueryState::Initial));
    type_text(&pipeline, "Title 1").await?;
    let failed = collect_until_terminal(&mut states).await;

    // Act
    type_text(&pipeline, "Title").await?;
    advance(Duration::from_millis(100)).await;
    type_text(&pipeline, "Title 1").await?;

    // Assert
    assert_eq!(
        failed,
        vec![
            QueryState::Loading,
            QueryState::Error(FetchError::status(503))
        ]
    );
    assert_no_element_emitted(&mut states, 1_000).await;
    assert_eq!(fetcher.posts_calls(), 1);
    assert_eq!(
        pipeline.state(),
        QueryState::Error(FetchError::status(503))
    );
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_panicking_fetch_publishes_error() -> anyhow::Result<()> {
    // Arrange
    let pipeline = SearchPipeline::new(PanickingFetcher, PipelineConfig::default());
    let mut states = pipeline.subscribe()?;
    assert_eq!(unwrap_stream(&mut states, 0).await, Some(QueryState::Initial));

    // Act
    type_text(&pipeline, "Title 1").await?;
    let observed = timeout(
        Duration::from_secs(10),
        collect_until_terminal(&mut states),
    )
    .await?;

    // Assert
    assert_eq!(observed[0], QueryState::Loading);
    assert!(matches!(
        observed[1],
        QueryState::Error(FetchError::Unavailable { .. })
    ));
    assert!(pipeline.state().is_terminal());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_finish_skips_superseded_slow_fetch() -> anyhow::Result<()> {
    // Arrange
    let fetcher = default_fetcher();
    fetcher.push_users(Scripted::ok(fixtures::users()).delayed(Duration::from_secs(30)));
    fetcher.push_posts(Scripted::ok(fixtures::posts()).delayed(Duration::from_secs(30)));
    let pipeline = pipeline_with(&fetcher);
    let mut states = pipeline.subscribe()?;
    assert_eq!(unwrap_stream(&mut states, 0).await, Some(QueryState::Initial));
    type_text(&pipeline, "Title 2").await?;
    assert_eq!(
        unwrap_stream(&mut states, 1_000).await,
        Some(QueryState::Loading)
    );
    type_text(&pipeline, "Title 1").await?;
    let started = Instant::now();

    // Act
    pipeline.finish().await?;

    // Assert
    assert!(started.elapsed() < Duration::from_secs(1));
    let rest: Vec<QueryState> = states.collect().await;
    assert_eq!(
        rest,
        vec![
            QueryState::Loading,
            QueryState::Success(fixtures::title_1_details())
        ]
    );
    assert_eq!(fetcher.posts_completed(), 1);
    Ok(())
}
