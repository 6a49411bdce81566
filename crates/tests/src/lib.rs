//! # Integration Tests
//!
//! End-to-end coverage of the delivery layer:
//! - bootstrap and registration against real descriptors
//! - write multiplexing observed through the filesystem
//! - concurrent writers and drop accounting

#[cfg(test)]
mod registration_tests {
    use contracts::{SinkError, SinkFormat};
    use sinks::{register_default_sinks, SinkRegistry, SinkTransport};
    use std::os::fd::AsRawFd;
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    #[test]
    fn test_bootstrap_binds_standard_descriptors() {
        let mut registry = SinkRegistry::new();
        register_default_sinks(&mut registry).unwrap();

        for (name, fd) in [("stdout", 1), ("stderr", 2)] {
            let sink = registry.find(name).unwrap();
            assert_eq!(sink.format(), SinkFormat::Raw);
            match sink.transport() {
                Some(SinkTransport::Fd(t)) => assert_eq!(t.fd(), fd),
                None => panic!("bootstrap sink '{name}' must be specialized"),
            }
        }
    }

    #[test]
    fn test_bootstrap_names_reject_other_targets() {
        let file = NamedTempFile::new().unwrap();
        let mut registry = SinkRegistry::new();
        register_default_sinks(&mut registry).unwrap();

        let err = registry
            .register_fd(
                "stderr",
                "impostor",
                SinkFormat::Raw,
                file.as_file().as_raw_fd(),
            )
            .unwrap_err();
        assert!(matches!(err, SinkError::NameConflict { .. }));
    }

    #[test]
    fn test_create_then_find_is_identity() {
        let file = NamedTempFile::new().unwrap();
        let mut registry = SinkRegistry::new();

        let created = registry
            .register_fd(
                "audit",
                "audit trail",
                SinkFormat::Short,
                file.as_file().as_raw_fd(),
            )
            .unwrap();
        let found = registry.find("audit").unwrap();

        assert!(Arc::ptr_eq(&created, &found));
    }
}

#[cfg(test)]
mod delivery_tests {
    use contracts::SinkFormat;
    use sinks::SinkRegistry;
    use std::fs::{self, File};
    use std::os::fd::AsRawFd;
    use std::sync::Arc;
    use std::thread;
    use tempfile::NamedTempFile;

    #[test]
    fn test_end_to_end_hello() {
        let file = NamedTempFile::new().unwrap();
        let mut registry = SinkRegistry::new();
        let out = registry
            .register_fd(
                "out",
                "end-to-end target",
                SinkFormat::Raw,
                file.as_file().as_raw_fd(),
            )
            .unwrap();

        out.write(&[b"hello"]);

        assert_eq!(fs::read(file.path()).unwrap(), b"hello\n");
        assert_eq!(out.dropped(), 0);
    }

    #[test]
    fn test_configured_sink_frames_and_truncates() {
        let file = NamedTempFile::new().unwrap();
        let mut registry = SinkRegistry::new();
        let sink = registry
            .register_fd(
                "framed",
                "short-framed target",
                SinkFormat::Short,
                file.as_file().as_raw_fd(),
            )
            .unwrap();
        sink.set_syslog_priority(3, 5);
        sink.set_maxlen(12);

        sink.write(&[b"abcdefghijklmno"]);

        // 12-byte budget: 3-byte header, 8 content bytes, trailing newline.
        assert_eq!(fs::read(file.path()).unwrap(), b"<5>abcdefgh\n");
    }

    #[test]
    fn test_concurrent_writers_do_not_interleave() {
        const WRITERS: usize = 8;
        const LINES: usize = 50;

        let file = NamedTempFile::new().unwrap();
        let mut registry = SinkRegistry::new();
        let sink = registry
            .register_fd(
                "shared",
                "concurrency target",
                SinkFormat::Raw,
                file.as_file().as_raw_fd(),
            )
            .unwrap();

        let mut handles = Vec::new();
        for i in 0..WRITERS {
            let sink = Arc::clone(&sink);
            handles.push(thread::spawn(move || {
                let line = vec![b'a' + i as u8; 64];
                for _ in 0..LINES {
                    let halves: [&[u8]; 2] = [&line[..32], &line[32..]];
                    sink.write(&halves);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let content = fs::read_to_string(file.path()).unwrap();
        let mut per_writer = [0usize; WRITERS];
        let mut total = 0;
        for line in content.lines() {
            total += 1;
            assert_eq!(line.len(), 64, "truncated or merged line: {line:?}");
            let first = line.as_bytes()[0];
            assert!(
                line.bytes().all(|b| b == first),
                "interleaved write detected: {line:?}"
            );
            per_writer[(first - b'a') as usize] += 1;
        }

        assert_eq!(total, WRITERS * LINES);
        assert!(per_writer.iter().all(|&n| n == LINES));
        assert_eq!(
            sink.counter_snapshot().delivered,
            (WRITERS * LINES) as u64
        );
    }

    #[test]
    fn test_invalid_handle_counts_every_attempt() {
        const WRITERS: usize = 4;
        const ATTEMPTS: usize = 25;

        let file = NamedTempFile::new().unwrap();
        // Read-only descriptor: every vectored write fails.
        let readonly = File::open(file.path()).unwrap();
        let mut registry = SinkRegistry::new();
        let sink = registry
            .register_fd(
                "broken",
                "read-only descriptor",
                SinkFormat::Raw,
                readonly.as_raw_fd(),
            )
            .unwrap();

        let mut handles = Vec::new();
        for _ in 0..WRITERS {
            let sink = Arc::clone(&sink);
            handles.push(thread::spawn(move || {
                for _ in 0..ATTEMPTS {
                    sink.write(&[b"lost"]);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let snap = sink.counter_snapshot();
        assert_eq!(snap.dropped, (WRITERS * ATTEMPTS) as u64);
        assert_eq!(snap.delivered, 0);
        assert!(fs::read(file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_full_stack_smoke() {
        use observability::{init_with_config, LogFormat, ObservabilityConfig};

        init_with_config(ObservabilityConfig {
            log_format: LogFormat::Compact,
            metrics_port: None,
            default_log_level: "warn".to_string(),
        })
        .unwrap();

        let file = NamedTempFile::new().unwrap();
        let mut registry = SinkRegistry::new();
        let sink = registry
            .register_fd(
                "smoke",
                "full-stack target",
                SinkFormat::Raw,
                file.as_file().as_raw_fd(),
            )
            .unwrap();

        sink.write(&[b"first ", b"second"]);
        observability::report_sink_counters(&registry);

        assert_eq!(fs::read(file.path()).unwrap(), b"first second\n");
        assert_eq!(sink.counter_snapshot().delivered, 1);
    }
}
