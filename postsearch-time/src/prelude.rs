// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Convenient imports for the operators of this crate.

pub use crate::timer::Timer;
pub use crate::{DebounceExt, DebounceWithDefaultTimerExt, DistinctUntilChangedExt};

#[cfg(feature = "runtime-tokio")]
pub use crate::TokioTimer;
