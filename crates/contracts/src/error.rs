//! Registration-time error definitions
//!
//! Write-time failures are never surfaced as errors; they are only visible
//! through a sink's drop counter.

use thiserror::Error;

/// Errors produced while registering sinks.
#[derive(Debug, Error)]
pub enum SinkError {
    /// A sink with this name exists and is bound to an incompatible target.
    #[error("sink '{name}' already registered with a different target")]
    NameConflict { name: String },

    /// The registry could not reserve capacity for a new entry.
    #[error("sink registry could not allocate a new entry")]
    ResourceExhausted,
}

impl SinkError {
    /// Create a name conflict error
    pub fn name_conflict(name: impl Into<String>) -> Self {
        Self::NameConflict { name: name.into() }
    }
}
