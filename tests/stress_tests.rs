//! Stress tests for concurrent producers
//!
//! These tests verify:
//! - No record is lost or duplicated with many producer threads
//! - Records from one thread keep their enqueue order
//! - Configuration changes while logging never corrupt delivery
//! - Start/stop cycles under load drain everything
//! - Stopping the writer returns while producers are still logging

use parking_lot::Mutex;
use rust_sink_logger::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

const THREADS: usize = 8;
const PER_THREAD: usize = 1000;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().clone()).expect("console output is UTF-8")
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Console writer slower than the producers feeding it.
struct SlowWriter;

impl Write for SlowWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        thread::sleep(Duration::from_micros(200));
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Check that `content` holds every `t{thread}-{seq}` line exactly once,
/// with each thread's sequence numbers in increasing order.
fn assert_complete_and_ordered(content: &str) {
    let mut next_seq: HashMap<usize, usize> = HashMap::new();
    let mut total = 0;

    for line in content.lines() {
        let body = line.trim_start_matches("[level=info] ");
        let (thread_part, seq_part) = body
            .trim_start_matches('t')
            .split_once('-')
            .unwrap_or_else(|| panic!("malformed line: {:?}", line));
        let thread_id: usize = thread_part.parse().unwrap();
        let seq: usize = seq_part.parse().unwrap();

        let expected = next_seq.entry(thread_id).or_insert(0);
        assert_eq!(seq, *expected, "thread {} out of order or duplicated", thread_id);
        *expected += 1;
        total += 1;
    }

    assert_eq!(total, THREADS * PER_THREAD, "records lost or duplicated");
    assert_eq!(next_seq.len(), THREADS);
    assert!(next_seq.values().all(|&n| n == PER_THREAD));
}

#[test]
fn test_concurrent_producers_no_loss() {
    let buffer = SharedBuffer::default();
    let logger = Arc::new(
        Logger::builder()
            .level(LogLevel::Info)
            .console_writer(buffer.clone())
            .start_writer(true)
            .build()
            .unwrap(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger.info(format!("t{}-{}", t, i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    logger.stop_writer().unwrap();

    assert_complete_and_ordered(&buffer.contents());
    assert_eq!(logger.metrics().enqueued(), (THREADS * PER_THREAD) as u64);
    assert_eq!(logger.metrics().dispatched(), (THREADS * PER_THREAD) as u64);
    assert_eq!(logger.metrics().dropped(), 0);
}

#[test]
fn test_concurrent_producers_to_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("stress.log");
    fs::File::create(&log_file).unwrap();

    let logger = Arc::new(
        Logger::builder()
            .level(LogLevel::Info)
            .console_writer(std::io::sink())
            .file(&log_file)
            .start_writer(true)
            .build()
            .unwrap(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger.log_to_file(LogLevel::Info, format!("t{}-{}", t, i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    logger.stop_writer().unwrap();

    assert_complete_and_ordered(&fs::read_to_string(&log_file).unwrap());
}

#[test]
fn test_config_changes_during_logging() {
    let buffer = SharedBuffer::default();
    let logger = Arc::new(
        Logger::builder()
            .level(LogLevel::Info)
            .console_writer(buffer.clone())
            .start_writer(true)
            .build()
            .unwrap(),
    );
    let running = Arc::new(AtomicBool::new(true));

    let toggler = {
        let logger = Arc::clone(&logger);
        let running = Arc::clone(&running);
        thread::spawn(move || {
            while running.load(Ordering::Relaxed) {
                logger.add_flags(MetadataFlags::TIME);
                logger.remove_flags(MetadataFlags::TIME);
                logger.close_file();
                logger.close_socket();
                thread::yield_now();
            }
        })
    };

    let producers: Vec<_> = (0..4)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger.error(format!("t{}-{}", t, i));
                }
            })
        })
        .collect();

    for handle in producers {
        handle.join().unwrap();
    }
    running.store(false, Ordering::Relaxed);
    toggler.join().unwrap();
    logger.stop_writer().unwrap();

    let content = buffer.contents();
    assert_eq!(content.lines().count(), 4 * PER_THREAD);
    assert!(content.lines().all(|line| line.starts_with("[level=error")));
    assert_eq!(logger.metrics().dropped(), 0);
}

#[test]
fn test_restart_cycles_under_load() {
    let buffer = SharedBuffer::default();
    let logger = Logger::builder()
        .console_writer(buffer.clone())
        .build()
        .unwrap();

    for cycle in 0..10 {
        logger.init_writer().unwrap();
        for i in 0..100 {
            logger.write_console(format!("{}-{}\n", cycle, i));
        }
        logger.stop_writer().unwrap();
        assert_eq!(logger.queue_len(), 0);
    }

    let content = buffer.contents();
    let expected: String = (0..10)
        .flat_map(|cycle| (0..100).map(move |i| format!("{}-{}\n", cycle, i)))
        .collect();
    assert_eq!(content, expected);
}

#[test]
fn test_stop_returns_under_sustained_load() {
    let logger = Arc::new(
        Logger::builder()
            .console_writer(SlowWriter)
            .start_writer(true)
            .build()
            .unwrap(),
    );
    let running = Arc::new(AtomicBool::new(true));

    let producer = {
        let logger = Arc::clone(&logger);
        let running = Arc::clone(&running);
        thread::spawn(move || {
            while running.load(Ordering::Relaxed) {
                logger.write_console("x\n");
                thread::sleep(Duration::from_micros(50));
            }
        })
    };

    // Let a backlog build up before asking the writer to stop
    thread::sleep(Duration::from_millis(100));

    let (done_tx, done_rx) = mpsc::channel();
    let stopper = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || {
            let result = logger.stop_writer();
            let _ = done_tx.send(());
            result
        })
    };

    let stopped_in_time = done_rx.recv_timeout(Duration::from_secs(3)).is_ok();
    running.store(false, Ordering::Relaxed);
    producer.join().unwrap();
    stopper.join().unwrap().unwrap();
    assert!(stopped_in_time, "stop_writer blocked while a producer was active");
    assert!(!logger.is_writer_running());

    // Whatever arrived after the stop request is delivered by the next writer
    logger.init_writer().unwrap();
    logger.stop_writer().unwrap();
    assert_eq!(logger.queue_len(), 0);
    assert_eq!(logger.metrics().dispatched(), logger.metrics().enqueued());
}
