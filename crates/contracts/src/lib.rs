//! # Contracts
//!
//! Frozen interface contracts shared by the delivery crates: identifiers,
//! framing formats, and registration errors. Business crates depend on this
//! crate only; reverse dependencies are prohibited.

mod error;
mod format;
mod sink_id;

pub use error::SinkError;
pub use format::SinkFormat;
pub use sink_id::SinkId;

/// Default per-write truncation budget in bytes.
///
/// Matches the classical syslog message length so a `Short`-framed message
/// stays within one datagram once a syslog transport exists.
pub const DEFAULT_MAX_LEN: usize = 1024;
