//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. Formatting only
//! happens inside the logger call, after the caller has built the arguments;
//! use [`Logger::level`](crate::Logger::level) to skip expensive argument
//! construction entirely.
//!
//! # Examples
//!
//! ```
//! use rust_sink_logger::prelude::*;
//! use rust_sink_logger::{error, info};
//!
//! let logger = Logger::builder()
//!     .console_writer(std::io::sink())
//!     .build()
//!     .unwrap();
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! error!(logger, "User {} failed action: {}", 42, "login");
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use rust_sink_logger::prelude::*;
/// # let logger = Logger::builder().console_writer(std::io::sink()).build().unwrap();
/// use rust_sink_logger::log;
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// assert_eq!(logger.queue_len(), 1);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_sink_logger::prelude::*;
/// # let logger = Logger::builder().console_writer(std::io::sink()).build().unwrap();
/// use rust_sink_logger::warn;
/// warn!(logger, "Disk usage at {}%", 91);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log program output: the highest level, shown unless the logger is disabled.
///
/// # Examples
///
/// ```
/// # use rust_sink_logger::prelude::*;
/// # let logger = Logger::builder().console_writer(std::io::sink()).build().unwrap();
/// use rust_sink_logger::output;
/// let name = "Mario";
/// output!(logger, "Hello {}", name);
/// assert_eq!(logger.queue_len(), 1);
/// ```
#[macro_export]
macro_rules! output {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Output, $($arg)+)
    };
}
