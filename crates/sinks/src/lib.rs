//! # Sinks
//!
//! Event-sink delivery layer.
//!
//! A host service registers named destinations once, during its
//! configuration phase, then pushes multi-part messages at them from any
//! thread without knowing the transport behind the name:
//!
//! - [`SinkRegistry`] — find-or-create registration over named sinks
//! - [`Sink::write`] — bounded scatter-gather assembly, framing, silent
//!   truncation, one locked vectored write, lock-free drop accounting
//! - [`register_default_sinks`] — the `stdout`/`stderr` bootstrap pair

pub mod bootstrap;
pub mod counters;
pub mod registry;
pub mod sink;

pub use contracts::{SinkError, SinkFormat, SinkId, DEFAULT_MAX_LEN};

pub use bootstrap::register_default_sinks;
pub use counters::{CounterSnapshot, SinkCounters};
pub use registry::SinkRegistry;
pub use sink::{FdTransport, Sink, SinkTransport};
