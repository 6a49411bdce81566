//! Mirrors per-sink delivery counters into the `metrics` facade

use metrics::{counter, gauge};
use sinks::SinkRegistry;

/// Publish every sink's delivery counters, labeled by sink name.
///
/// The atomics on the sinks stay the source of truth; this sets the
/// exported counters to their absolute values, so calling it from a
/// periodic stats tick yields monotonic series. Sinks that never
/// specialized report zeros.
pub fn report_sink_counters(registry: &SinkRegistry) {
    gauge!("event_sink_registered").set(registry.len() as f64);

    for sink in registry.iter() {
        let snap = sink.counter_snapshot();
        let name = sink.name().to_string();

        counter!("event_sink_delivered_total", "sink" => name.clone()).absolute(snap.delivered);
        counter!("event_sink_dropped_total", "sink" => name).absolute(snap.dropped);
    }
}
