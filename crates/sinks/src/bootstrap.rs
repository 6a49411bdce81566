//! Default sink registration at host startup

use std::io::{stderr, stdout};
use std::os::fd::AsRawFd;

use contracts::{SinkError, SinkFormat};

use crate::registry::SinkRegistry;

/// Register the two default descriptor sinks.
///
/// `"stdout"` is bound to the process's standard output and `"stderr"` to
/// standard error, both unframed and with the default truncation budget.
/// Safe to call again on the same registry: the duplicates merge.
pub fn register_default_sinks(registry: &mut SinkRegistry) -> Result<(), SinkError> {
    registry.register_fd(
        "stdout",
        "standard output (fd#1)",
        SinkFormat::Raw,
        stdout().as_raw_fd(),
    )?;
    registry.register_fd(
        "stderr",
        "standard error (fd#2)",
        SinkFormat::Raw,
        stderr().as_raw_fd(),
    )?;
    Ok(())
}
