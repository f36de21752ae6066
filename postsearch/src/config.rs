// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;

/// Quiet period a query must survive before it is dispatched.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Tuning knobs of a [`SearchPipeline`](crate::SearchPipeline).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Trailing debounce window applied to raw query input.
    pub debounce: Duration,
}

impl PipelineConfig {
    #[must_use]
    pub const fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}
