// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Data sources for the search pipeline.
//!
//! [`DataFetcher`] is the seam the pipeline consumes: two one-shot async
//! requests returning the full users and posts collections.
//! [`JsonPlaceholderClient`] implements it over HTTP.

pub mod config;
pub mod fetcher;
pub mod http_client;

pub use config::ClientConfig;
pub use fetcher::DataFetcher;
pub use http_client::JsonPlaceholderClient;
