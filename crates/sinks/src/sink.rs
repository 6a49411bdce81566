//! Sink entity and the scatter-gather write path

use std::io::IoSlice;
use std::os::fd::{BorrowedFd, RawFd};
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::OnceLock;

use contracts::{SinkFormat, SinkId, DEFAULT_MAX_LEN};
use nix::sys::uio;
use parking_lot::RwLock;

use crate::counters::{CounterSnapshot, SinkCounters};

/// Upper bound on scatter-gather slots per write, trailing newline included.
const MAX_WRITE_SLOTS: usize = 10;

/// Transport state of a specialized sink.
///
/// A sink starts unspecialized and moves into exactly one of these variants.
/// Syslog and buffered-ring transports are anticipated extension points but
/// only the raw descriptor transport exists today.
#[derive(Debug)]
pub enum SinkTransport {
    /// Writes go to a raw file descriptor as one vectored write.
    Fd(FdTransport),
}

/// Descriptor-backed transport context.
///
/// The descriptor is borrowed, never owned: the registering caller keeps it
/// open for as long as the sink can be written to, and the sink never closes
/// it. This keeps `stdout`/`stderr` safe no matter when a registry is dropped.
#[derive(Debug)]
pub struct FdTransport {
    fd: RawFd,
    /// Serializes vectored writes so concurrent messages never interleave
    /// on the descriptor.
    lock: RwLock<()>,
    counters: SinkCounters,
}

impl FdTransport {
    fn new(fd: RawFd) -> Self {
        Self {
            fd,
            lock: RwLock::new(()),
            counters: SinkCounters::new(),
        }
    }

    /// The underlying descriptor.
    pub fn fd(&self) -> RawFd {
        self.fd
    }

    /// Delivery counters for this transport.
    pub fn counters(&self) -> &SinkCounters {
        &self.counters
    }

    fn dispatch(&self, slots: &[IoSlice<'_>]) {
        // SAFETY: the descriptor was handed over at registration under the
        // contract that it stays open for the sink's lifetime; see
        // `SinkRegistry::register_fd`.
        let fd = unsafe { BorrowedFd::borrow_raw(self.fd) };
        let sent = {
            let _guard = self.lock.write();
            uio::writev(fd, slots)
        };
        match sent {
            // A short positive write still counts as delivered; the lost
            // tail is not accounted anywhere. Known gap, kept on purpose.
            Ok(n) if n > 0 => self.counters.inc_delivered(),
            _ => self.counters.inc_dropped(),
        }
    }
}

/// A named delivery destination.
///
/// Created by a [`SinkRegistry`](crate::SinkRegistry) and handed out as
/// `Arc<Sink>` for the remaining process lifetime. All mutable state is
/// interior: the transport slot is write-once, the budget and priority
/// fields are atomics touched only by the host's configuration phase, and
/// the counters are lock-free.
#[derive(Debug)]
pub struct Sink {
    name: SinkId,
    desc: String,
    format: SinkFormat,
    /// Per-write truncation budget in bytes; 0 means unbounded.
    maxlen: AtomicUsize,
    /// Reserved for a future syslog transport.
    syslog_facility: AtomicU8,
    /// Digit emitted in the `Short` header.
    syslog_minlvl: AtomicU8,
    transport: OnceLock<SinkTransport>,
}

impl Sink {
    pub(crate) fn new(name: SinkId, desc: impl Into<String>, format: SinkFormat) -> Self {
        Self {
            name,
            desc: desc.into(),
            format,
            maxlen: AtomicUsize::new(DEFAULT_MAX_LEN),
            syslog_facility: AtomicU8::new(0),
            syslog_minlvl: AtomicU8::new(0),
            transport: OnceLock::new(),
        }
    }

    /// Unique sink name.
    pub fn name(&self) -> &SinkId {
        &self.name
    }

    /// Human-readable label; no behavioral role.
    pub fn desc(&self) -> &str {
        &self.desc
    }

    /// Framing applied ahead of the fragments.
    pub fn format(&self) -> SinkFormat {
        self.format
    }

    /// Per-write truncation budget in bytes; 0 means unbounded.
    pub fn maxlen(&self) -> usize {
        self.maxlen.load(Ordering::Relaxed)
    }

    /// Set the per-write truncation budget; 0 disables the bound.
    ///
    /// Intended for the host's single-threaded configuration phase. The
    /// budget is fixed for the sink's lifetime once writers are running.
    pub fn set_maxlen(&self, maxlen: usize) {
        self.maxlen.store(maxlen, Ordering::Relaxed);
    }

    /// Reserved syslog facility; carried for a future syslog transport.
    pub fn syslog_facility(&self) -> u8 {
        self.syslog_facility.load(Ordering::Relaxed)
    }

    /// Minimum syslog level; emitted as the `Short` header digit.
    pub fn syslog_minlvl(&self) -> u8 {
        self.syslog_minlvl.load(Ordering::Relaxed)
    }

    /// Set the syslog facility and minimum level.
    ///
    /// Like [`set_maxlen`](Self::set_maxlen), a configuration-phase knob.
    pub fn set_syslog_priority(&self, facility: u8, minlvl: u8) {
        debug_assert!(minlvl <= 9, "minlvl must be a single decimal digit");
        self.syslog_facility.store(facility, Ordering::Relaxed);
        self.syslog_minlvl.store(minlvl, Ordering::Relaxed);
    }

    /// Transport state, or `None` while the sink is unspecialized.
    pub fn transport(&self) -> Option<&SinkTransport> {
        self.transport.get()
    }

    /// Specialize to the descriptor transport. Returns false if some
    /// transport was already installed.
    pub(crate) fn specialize_fd(&self, fd: RawFd) -> bool {
        self.transport
            .set(SinkTransport::Fd(FdTransport::new(fd)))
            .is_ok()
    }

    /// Total write attempts whose transport call did not succeed.
    pub fn dropped(&self) -> u64 {
        self.counter_snapshot().dropped
    }

    /// Delivery counters; all zero for a sink that never specialized.
    pub fn counter_snapshot(&self) -> CounterSnapshot {
        match self.transport.get() {
            Some(SinkTransport::Fd(t)) => t.counters.snapshot(),
            None => CounterSnapshot::default(),
        }
    }

    /// Send the ordered `fragments` through the sink's transport.
    ///
    /// Fire-and-forget: the message is silently truncated to the sink's
    /// budget, at most the leading fragments that fit the scatter-gather
    /// list are delivered, and a failed transport write is only visible as
    /// an increment of the drop counter. A sink that was never specialized
    /// performs no transport action at all.
    pub fn write(&self, fragments: &[&[u8]]) {
        let mut short_hdr = [b'<', b'0', b'>'];
        let mut slots: [IoSlice<'_>; MAX_WRITE_SLOTS] =
            std::array::from_fn(|_| IoSlice::new(&[]));
        let mut vec = 0;

        let mut budget = match self.maxlen() {
            0 => usize::MAX,
            n => n,
        };
        // One byte of the budget is provisioned for the trailing newline.
        budget -= 1;

        if self.format == SinkFormat::Short {
            short_hdr[1] = b'0' + self.syslog_minlvl();
            let take = budget.min(short_hdr.len());
            slots[vec] = IoSlice::new(&short_hdr[..take]);
            budget -= take;
            vec += 1;
        }

        // Copy the fragments in order, truncating the whole message to the
        // budget. Empty takes are skipped without consuming a slot; the last
        // slot stays reserved for the newline.
        for frag in fragments {
            if vec >= MAX_WRITE_SLOTS - 1 {
                break;
            }
            let take = budget.min(frag.len());
            if take > 0 {
                slots[vec] = IoSlice::new(&frag[..take]);
                budget -= take;
                vec += 1;
            }
        }

        if let Some(SinkTransport::Fd(t)) = self.transport.get() {
            // The FD transport always emits the newline provisioned above.
            slots[vec] = IoSlice::new(b"\n");
            vec += 1;
            t.dispatch(&slots[..vec]);
        }
    }
}
