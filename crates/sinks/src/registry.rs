//! Named sink registry with find-or-create registration

use std::collections::HashMap;
use std::os::fd::RawFd;
use std::sync::Arc;

use contracts::{SinkError, SinkFormat, SinkId};
use tracing::{debug, warn};

use crate::sink::{Sink, SinkTransport};

/// Collection mapping sink names to sink entities.
///
/// An explicit object rather than a process global, so embedders and tests
/// hold isolated registries. The registry owns every sink it creates for the
/// remaining process lifetime; there is no removal.
///
/// Mutation is expected only during the host's single-threaded configuration
/// phase, so the registry itself carries no lock. Steady-state callers keep
/// the `Arc<Sink>` references they were handed and never come back here on
/// the write path.
#[derive(Debug, Default)]
pub struct SinkRegistry {
    sinks: HashMap<SinkId, Arc<Sink>>,
}

impl SinkRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a sink by exact name. Read-only, side-effect free.
    pub fn find(&self, name: &str) -> Option<Arc<Sink>> {
        self.sinks.get(name).cloned()
    }

    /// Find-or-create a generic, unspecialized sink.
    ///
    /// Returns the existing sink under `name` whatever its specialization;
    /// a configuration layer can tell a pre-existing entry apart by
    /// inspecting [`Sink::transport`]. A fresh sink starts with the default
    /// truncation budget and no transport.
    pub fn declare(
        &mut self,
        name: &str,
        desc: &str,
        format: SinkFormat,
    ) -> Result<Arc<Sink>, SinkError> {
        if let Some(sink) = self.find(name) {
            return Ok(sink);
        }

        self.sinks
            .try_reserve(1)
            .map_err(|_| SinkError::ResourceExhausted)?;
        let id = SinkId::new(name);
        let sink = Arc::new(Sink::new(id.clone(), desc, format));
        self.sinks.insert(id, Arc::clone(&sink));
        debug!(sink = %name, format = ?format, "sink declared");
        Ok(sink)
    }

    /// Register a descriptor-backed sink called `name`.
    ///
    /// Re-registering a perfect duplicate (same name, same descriptor)
    /// returns the existing sink unchanged. Any other collision — the name
    /// is taken by a sink bound to a different descriptor — is rejected and
    /// nothing is mutated.
    ///
    /// The caller keeps `fd` open for as long as the sink can be written
    /// to; the sink never closes it.
    pub fn register_fd(
        &mut self,
        name: &str,
        desc: &str,
        format: SinkFormat,
        fd: RawFd,
    ) -> Result<Arc<Sink>, SinkError> {
        let sink = self.declare(name, desc, format)?;

        match sink.transport() {
            // Perfect duplicates are merged.
            Some(SinkTransport::Fd(t)) if t.fd() == fd => {}
            Some(SinkTransport::Fd(t)) => {
                warn!(
                    sink = %name,
                    existing_fd = t.fd(),
                    requested_fd = fd,
                    "sink name collision with incompatible target"
                );
                return Err(SinkError::name_conflict(name));
            }
            None => {
                if !sink.specialize_fd(fd) {
                    return Err(SinkError::name_conflict(name));
                }
                debug!(sink = %name, fd = fd, "fd sink registered");
            }
        }

        Ok(sink)
    }

    /// Number of registered sinks.
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// True when no sink has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Iterate over the registered sinks, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Sink>> {
        self.sinks.values()
    }
}
