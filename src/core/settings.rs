//! Settings file loader
//!
//! A settings file is a list of `key = value` lines:
//!
//! ```text
//! level = debug
//! flags = level,date,time
//! file = /var/log/app.log
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use super::error::{LoggerError, Result};
use super::flags::MetadataFlags;
use super::log_level::LogLevel;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub level: Option<LogLevel>,
    pub flags: Option<MetadataFlags>,
    pub file: Option<PathBuf>,
}

impl Settings {
    /// Parse settings from text. Later lines override earlier ones.
    pub fn parse(content: &str) -> Result<Self> {
        let mut settings = Settings::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (key, value) = line
                .split_once('=')
                .map(|(key, value)| (key.trim(), value.trim()))
                .ok_or_else(|| LoggerError::invalid_setting(line, ""))?;

            match key {
                "level" => {
                    let level = value
                        .parse()
                        .map_err(|_| LoggerError::invalid_setting(key, value))?;
                    settings.level = Some(level);
                }
                "flags" => {
                    let flags = value
                        .parse()
                        .map_err(|_| LoggerError::invalid_setting(key, value))?;
                    settings.flags = Some(flags);
                }
                "file" => {
                    if value.is_empty() {
                        return Err(LoggerError::invalid_setting(key, value));
                    }
                    settings.file = Some(PathBuf::from(value));
                }
                _ => {
                    return Err(LoggerError::UnknownSettingKey {
                        key: key.to_string(),
                    })
                }
            }
        }

        Ok(settings)
    }

    /// Read and parse a settings file.
    ///
    /// # Errors
    ///
    /// [`LoggerError::SettingsNotFound`] if the path is empty or missing,
    /// otherwise the parse errors of [`Settings::parse`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() || !path.exists() {
            return Err(LoggerError::SettingsNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading settings file",
                path.display().to_string(),
                e,
            )
        })?;
        Self::parse(&content)
    }
}

impl FromStr for Settings {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
