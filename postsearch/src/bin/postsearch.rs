// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Terminal post search.
//!
//! Every stdin line is taken as the new full content of the search field.
//! States are rendered to stdout, logs go to stderr (`RUST_LOG` controls the
//! level). End of input drains the last query; Ctrl+C stops immediately.

use anyhow::{Context, Result};
use clap::Parser;
use futures::StreamExt;
use postsearch::prelude::*;
use postsearch::signal::interrupted;
use std::time::Duration;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// `postsearch` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "postsearch",
    about = "Search JSONPlaceholder posts by title, one query per line",
    version
)]
struct CliArgs {
    /// Base URL of the JSONPlaceholder-compatible API.
    #[arg(
        long = "base-url",
        env = "POSTSEARCH_BASE_URL",
        value_name = "url",
        default_value = postsearch_client::config::DEFAULT_BASE_URL
    )]
    base_url: String,
    /// Quiet period before a query is dispatched.
    #[arg(
        long = "debounce-ms",
        env = "POSTSEARCH_DEBOUNCE_MS",
        value_name = "ms",
        default_value_t = 500
    )]
    debounce_ms: u64,
    /// Per-request timeout.
    #[arg(
        long = "timeout-secs",
        env = "POSTSEARCH_TIMEOUT_SECS",
        value_name = "secs",
        default_value_t = 10
    )]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("tracing init failed: {e}");
    }

    let args = CliArgs::parse();

    let client_config = ClientConfig::new(&args.base_url)
        .context("invalid --base-url")?
        .with_timeout(Duration::from_secs(args.timeout_secs));
    let client = JsonPlaceholderClient::new(&client_config).context("create HTTP client")?;
    let pipeline = SearchPipeline::new(
        client,
        PipelineConfig::default().with_debounce(Duration::from_millis(args.debounce_ms)),
    );

    let mut states = pipeline.subscribe()?;
    let sink = tokio::spawn(async move {
        while let Some(state) = states.next().await {
            println!("{}", render(&state));
            println!("{}", "-".repeat(60));
        }
    });

    info!(base_url = %client_config.base_url, "type a title and press enter");

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut ctrl_c = std::pin::pin!(interrupted(tokio::signal::ctrl_c()));
    let was_interrupted = loop {
        tokio::select! {
            () = &mut ctrl_c => break true,
            line = lines.next_line() => match line.context("read stdin")? {
                Some(line) => pipeline.query_changed(line)?,
                None => break false,
            },
        }
    };

    if was_interrupted {
        info!("Ctrl+C received, shutting down");
        pipeline.shutdown();
    } else {
        info!("end of input, waiting for the last query");
        pipeline.finish().await?;
    }

    sink.await.context("state sink task")?;
    Ok(())
}
