//! Sink implementations

pub mod console;
pub mod file;
pub mod socket;

pub use console::ConsoleSink;
pub use file::FileSink;
pub use socket::{Protocol, SocketSink, MAX_UNIX_SOCKET_PATH};

pub use crate::core::Sink;
