//! Writer thread
//!
//! One dedicated consumer per logger. It parks on the record queue until
//! there is work or a shutdown request, detaches the backlog, and performs
//! all sink I/O with the queue lock released. The batch that carries the
//! shutdown flag holds every record queued before the request, so the writer
//! exits after delivering it. Records queued later wait for the next writer.

use super::{
    error::{LoggerError, Result},
    failure_policy::{should_alert, DispatchFailurePolicy},
    logger::Shared,
    record::{Destination, Record},
    sink::Sink,
};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

pub(crate) const WRITER_THREAD_NAME: &str = "sink-logger-writer";

/// Lifecycle of a logger's writer thread.
#[derive(Debug, Default)]
pub(crate) enum WriterState {
    #[default]
    Uninitialized,
    Running(JoinHandle<()>),
    Stopped,
}

impl WriterState {
    pub(crate) fn is_running(&self) -> bool {
        matches!(self, WriterState::Running(_))
    }
}

pub(crate) fn spawn(shared: Arc<Shared>) -> Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(WRITER_THREAD_NAME.to_string())
        .spawn(move || run(&shared))
        .map_err(|e| {
            LoggerError::io_operation("spawning writer thread", "thread creation failed", e)
        })
}

fn run(shared: &Shared) {
    loop {
        let batch = shared.queue.wait_for_work();

        for record in &batch.records {
            deliver(shared, record);
        }

        if batch.shutdown {
            break;
        }
    }
}

/// Dispatch one record, isolating the writer from a panicking sink.
fn deliver(shared: &Shared, record: &Record) {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| dispatch(shared, record)));

    match outcome {
        Ok(Ok(())) => {
            shared.metrics.record_dispatched();
        }
        Ok(Err(e)) => {
            report_drop(shared, record.destination(), &e);
        }
        Err(panic_info) => {
            let panic_msg = panic_message(panic_info.as_ref());
            eprintln!(
                "[LOGGER CRITICAL] {} sink panicked: {}. Writer thread continues.",
                record.destination(),
                panic_msg
            );
            report_drop(shared, record.destination(), &panic_msg);
        }
    }
}

/// Write one record to the sink its destination names.
///
/// File and socket handles are used under the shared configuration lock so
/// they cannot be closed while the write is in flight.
pub(crate) fn dispatch(shared: &Shared, record: &Record) -> Result<()> {
    let payload = record.as_bytes();

    match record.destination() {
        Destination::Console => shared.console.write_payload(payload),
        Destination::File => {
            let config = shared.config.read();
            match config.file.as_ref() {
                Some(file) => file.write_payload(payload),
                None => Err(LoggerError::SinkClosed {
                    destination: Destination::File,
                }),
            }
        }
        Destination::Socket => {
            let config = shared.config.read();
            match config.socket.as_ref() {
                Some(socket) => socket.write_payload(payload),
                None => Err(LoggerError::SinkClosed {
                    destination: Destination::Socket,
                }),
            }
        }
    }
}

fn report_drop(shared: &Shared, destination: Destination, reason: &dyn fmt::Display) {
    let dropped_total = shared.metrics.record_dropped() + 1;

    if shared.failure_policy == DispatchFailurePolicy::Alert && should_alert(dropped_total) {
        eprintln!(
            "[LOGGER WARNING] Dropped {} record ({}), {} records dropped so far.",
            destination, reason, dropped_total
        );
    }

    if let Some(ref callback) = shared.on_dispatch_failure {
        callback(destination, dropped_total);
    }
}

pub(crate) fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
