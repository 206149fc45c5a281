//! Mutable logger configuration
//!
//! Threshold, metadata flags and the file/socket handles live together
//! behind one lock in the logger. Handles are only replaced or closed under
//! the exclusive half, and the writer only writes to them under the shared
//! half, so a handle is never closed mid-write.

use super::flags::MetadataFlags;
use super::log_level::LogLevel;
use crate::sinks::{FileSink, SocketSink};

#[derive(Debug, Default)]
pub struct ConfigState {
    pub level: LogLevel,
    pub flags: MetadataFlags,
    pub file: Option<FileSink>,
    pub socket: Option<SocketSink>,
}

impl ConfigState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a call at `level` passes the current threshold.
    #[inline]
    pub fn accepts(&self, level: LogLevel) -> bool {
        self.level.allows(level)
    }

    #[inline]
    pub fn is_file_open(&self) -> bool {
        self.file.is_some()
    }

    #[inline]
    pub fn is_socket_open(&self) -> bool {
        self.socket.is_some()
    }
}
