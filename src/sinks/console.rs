//! Console sink implementation

use crate::core::{Result, Sink};
use parking_lot::Mutex;
use std::fmt;
use std::io::Write;

/// Writes payloads to standard output, or to an injected writer.
pub struct ConsoleSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::with_writer(std::io::stdout())
    }

    /// Redirect console records to another writer (a pipe, a buffer in tests).
    ///
    /// # Example
    ///
    /// ```
    /// use rust_sink_logger::sinks::ConsoleSink;
    ///
    /// let sink = ConsoleSink::with_writer(std::io::sink());
    /// ```
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConsoleSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleSink").finish_non_exhaustive()
    }
}

impl Sink for ConsoleSink {
    fn write_payload(&self, payload: &[u8]) -> Result<()> {
        self.writer.lock().write_all(payload)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
