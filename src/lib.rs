//! # Rust Sink Logger
//!
//! A small structured-logging library. Log calls are formatted on the
//! caller's thread, queued, and written by one dedicated writer thread to the
//! console, a file, or a socket (UNIX stream, TCP or UDP).
//!
//! ## Features
//!
//! - **Non-blocking producers**: an unbounded queue, so log calls never wait on I/O
//! - **Cheap filtering**: calls below the threshold cost one comparison
//! - **Ordered delivery**: each sink sees its records in enqueue order
//! - **Flushed shutdown**: `stop_writer` returns only after the queue is drained
//! - **Metadata**: level, date, time, pid and tid, as bracketed text or JSON
//!
//! ```
//! use rust_sink_logger::prelude::*;
//!
//! let logger = Logger::builder()
//!     .level(LogLevel::Info)
//!     .flags(MetadataFlags::LEVEL | MetadataFlags::TIME)
//!     .console_writer(std::io::sink())
//!     .start_writer(true)
//!     .build()
//!     .unwrap();
//!
//! logger.info("Application started");
//! logger.stop_writer().unwrap();
//! assert_eq!(logger.metrics().dispatched(), 1);
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Destination, DispatchFailureCallback, DispatchFailurePolicy, LogLevel, Logger,
        LoggerBuilder, LoggerError, MetadataFlags, Result, Settings, WriterMetrics,
    };
    pub use crate::sinks::Protocol;
}

pub use crate::core::{
    format_message, Batch, ConfigState, Destination, DispatchFailureCallback,
    DispatchFailurePolicy, LogLevel, Logger, LoggerBuilder, LoggerError, MetadataFlags, Record,
    RecordQueue, Result, Settings, Sink, WriterMetrics,
};
pub use sinks::{ConsoleSink, FileSink, Protocol, SocketSink};
