//! Delivery Layer Demo
//!
//! Registers the default sinks plus a file-backed event sink, pushes a few
//! multi-part messages through them, and reports the delivery counters.
//!
//! Run with: cargo run --bin delivery_demo

use std::fs::File;
use std::os::fd::AsRawFd;

use anyhow::{Context, Result};
use observability::{init_with_config, LogFormat, ObservabilityConfig};
use sinks::{register_default_sinks, SinkFormat, SinkRegistry};

fn main() -> Result<()> {
    init_with_config(ObservabilityConfig {
        log_format: LogFormat::Pretty,
        metrics_port: None,
        default_log_level: "debug".to_string(),
    })?;

    tracing::info!("starting delivery layer demo");

    // ==== Configuration phase: register every destination once ====
    let mut registry = SinkRegistry::new();
    register_default_sinks(&mut registry)?;

    let event_file = File::create("events.log").context("failed to create events.log")?;
    let events = registry.register_fd(
        "events",
        "demo event log (events.log)",
        SinkFormat::Short,
        event_file.as_raw_fd(),
    )?;
    events.set_syslog_priority(1, 5);
    events.set_maxlen(128);

    // ==== Steady state: call sites hold sink references, not the registry ====
    let console = registry
        .find("stdout")
        .context("bootstrap did not register stdout")?;

    let parts: [&[u8]; 3] = [b"demo: ", b"multi-part ", b"message"];
    console.write(&parts);

    for seq in 0..3u32 {
        let tag = format!("event #{seq}");
        events.write(&[b"demo ", tag.as_bytes()]);
    }

    // A message far beyond the configured budget is silently truncated.
    let oversized = vec![b'x'; 4096];
    events.write(&[b"oversized ", &oversized]);

    // ==== Reporting: the counter-reading side ====
    observability::report_sink_counters(&registry);
    for sink in registry.iter() {
        let snap = sink.counter_snapshot();
        tracing::info!(
            sink = %sink.name(),
            desc = sink.desc(),
            delivered = snap.delivered,
            dropped = snap.dropped,
            "sink totals"
        );
    }

    tracing::info!("demo complete, see events.log for the framed output");
    Ok(())
}
