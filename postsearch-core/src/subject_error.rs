// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Errors specific to state subject operations.
///
/// These are distinct from fetch failures: a fetch failure is a value that is
/// published, while a subject error means the subject itself can no longer
/// publish or be subscribed to.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubjectError {
    /// The subject has been closed and cannot accept new values or subscribers.
    #[error("Subject is closed")]
    Closed,
}
