//! Metadata flags
//!
//! Select which contextual fields the formatter embeds in front of each
//! message: level, date, time, process id, thread id, and whether the line is
//! rendered as JSON instead of bracketed text.

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataFlags(u8);

impl MetadataFlags {
    pub const NONE: Self = Self(0);
    pub const LEVEL: Self = Self(1);
    pub const DATE: Self = Self(1 << 1);
    pub const TIME: Self = Self(1 << 2);
    pub const PID: Self = Self(1 << 3);
    pub const TID: Self = Self(1 << 4);
    pub const JSON: Self = Self(1 << 5);

    const NAMED: [(&'static str, MetadataFlags); 6] = [
        ("level", Self::LEVEL),
        ("date", Self::DATE),
        ("time", Self::TIME),
        ("pid", Self::PID),
        ("tid", Self::TID),
        ("json", Self::JSON),
    ];

    const MASK: u8 = 0b0011_1111;

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Build from raw bits, discarding any bit that names no flag.
    #[inline]
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::MASK)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    /// Flags that contribute a field, i.e. everything except `JSON`.
    #[inline]
    pub const fn fields(self) -> Self {
        Self(self.0 & !Self::JSON.0)
    }

    /// Look up a single flag by its settings-file name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("none") {
            return Some(Self::NONE);
        }
        Self::NAMED
            .iter()
            .find(|(flag_name, _)| flag_name.eq_ignore_ascii_case(name))
            .map(|(_, flag)| *flag)
    }
}

impl Default for MetadataFlags {
    fn default() -> Self {
        Self::LEVEL
    }
}

impl BitOr for MetadataFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for MetadataFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for MetadataFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let mut first = true;
        for (name, flag) in Self::NAMED {
            if self.contains(flag) {
                if !first {
                    f.write_str(",")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Parses a comma separated list such as `level,date,time`.
impl FromStr for MetadataFlags {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',').try_fold(Self::NONE, |acc, name| {
            Self::from_name(name)
                .map(|flag| acc | flag)
                .ok_or_else(|| LoggerError::InvalidFlag(name.trim().to_string()))
        })
    }
}
