//! Framing applied ahead of a sink's message fragments

use serde::{Deserialize, Serialize};

/// Framing applied before the message fragments of one write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkFormat {
    /// Fragments are delivered as-is.
    #[default]
    Raw,
    /// A fixed 3-byte `<N>` priority header is prepended, `N` being the
    /// sink's syslog minimum-level digit.
    Short,
}
