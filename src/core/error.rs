//! Error types for the logger system

use super::record::Destination;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Log file path does not exist
    #[error("Log file '{path}' does not exist")]
    FileNotFound { path: String },

    /// Log file exists but could not be opened for appending
    #[error("Could not open log file '{path}': {source}")]
    FileOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// UNIX socket path exceeds the platform limit
    #[error("Socket address too long: {len} bytes, max {max}")]
    SocketPathTooLong { len: usize, max: usize },

    /// Socket address is not a valid IP literal
    #[error("Invalid socket address '{address}'")]
    InvalidAddress { address: String },

    /// Socket could not be connected
    #[error("Could not connect to socket '{address}': {source}")]
    SocketConnect {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// Settings file path is empty or missing
    #[error("Settings file '{path}' does not exist")]
    SettingsNotFound { path: String },

    /// Known settings key with a value that does not parse
    #[error("Invalid value '{value}' for setting '{key}'")]
    InvalidSetting { key: String, value: String },

    /// Settings key the loader does not understand
    #[error("Unknown setting key '{key}'")]
    UnknownSettingKey { key: String },

    /// Unparseable log level name
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),

    /// Unparseable metadata flag name
    #[error("Invalid metadata flag: '{0}'")]
    InvalidFlag(String),

    /// A record reached the writer but its sink handle was not open
    #[error("No open {destination} sink")]
    SinkClosed { destination: Destination },

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),

    /// `init_writer` called while the writer thread is running
    #[error("Writer thread already running")]
    WriterAlreadyRunning,

    /// `stop_writer` called without a running writer thread
    #[error("Writer thread not running")]
    WriterNotRunning,

    /// Writer thread panicked and could not be joined cleanly
    #[error("Writer thread panicked: {0}")]
    WriterPanicked(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    pub fn file_not_found(path: impl Into<String>) -> Self {
        LoggerError::FileNotFound { path: path.into() }
    }

    pub fn file_open(path: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::FileOpen {
            path: path.into(),
            source,
        }
    }

    pub fn socket_connect(address: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::SocketConnect {
            address: address.into(),
            source,
        }
    }

    pub fn invalid_address(address: impl Into<String>) -> Self {
        LoggerError::InvalidAddress {
            address: address.into(),
        }
    }

    /// Create an invalid settings value error
    pub fn invalid_setting(key: impl Into<String>, value: impl Into<String>) -> Self {
        LoggerError::InvalidSetting {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::file_not_found("/var/log/app.log");
        assert!(matches!(err, LoggerError::FileNotFound { .. }));

        let err = LoggerError::invalid_setting("level", "loud");
        assert!(matches!(err, LoggerError::InvalidSetting { .. }));

        let err = LoggerError::invalid_address("not-an-ip");
        assert!(matches!(err, LoggerError::InvalidAddress { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::file_not_found("/var/log/app.log");
        assert_eq!(err.to_string(), "Log file '/var/log/app.log' does not exist");

        let err = LoggerError::SocketPathTooLong { len: 120, max: 108 };
        assert_eq!(err.to_string(), "Socket address too long: 120 bytes, max 108");

        let err = LoggerError::invalid_setting("level", "loud");
        assert_eq!(err.to_string(), "Invalid value 'loud' for setting 'level'");

        let err = LoggerError::SinkClosed {
            destination: Destination::Socket,
        };
        assert_eq!(err.to_string(), "No open socket sink");
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("spawning writer", "thread creation refused", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("spawning writer"));
        assert!(err.to_string().contains("thread creation refused"));
    }

    #[test]
    fn test_connect_error_keeps_source() {
        use std::error::Error;

        let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = LoggerError::socket_connect("127.0.0.1:1234", io_err);
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("Could not connect to socket '127.0.0.1:1234'"));
    }
}
