//! File sink implementation

use crate::core::{LoggerError, Result, Sink};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-mode log file.
///
/// Bytes go straight to the OS; there is no user-space buffer between the
/// writer thread and the file.
#[derive(Debug)]
pub struct FileSink {
    file: File,
    path: PathBuf,
}

impl FileSink {
    /// Open an existing file for appending.
    ///
    /// # Errors
    ///
    /// [`LoggerError::FileNotFound`] if `path` does not exist,
    /// [`LoggerError::FileOpen`] if it cannot be opened for writing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        if !path.exists() {
            return Err(LoggerError::file_not_found(display));
        }

        let file = OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(|e| LoggerError::file_open(display, e))?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn write_payload(&self, payload: &[u8]) -> Result<()> {
        (&self.file).write_all(payload)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        (&self.file).flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}
