//! Queue record structure

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Sink a record is written to by the writer thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    Console,
    File,
    Socket,
}

impl Destination {
    pub fn to_str(&self) -> &'static str {
        match self {
            Destination::Console => "console",
            Destination::File => "file",
            Destination::Socket => "socket",
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

/// One formatted payload tagged with its sink.
///
/// A log call that fans out to several sinks produces one record per sink;
/// the records share the payload text through the `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    payload: Arc<str>,
    destination: Destination,
}

impl Record {
    pub fn new(payload: impl Into<Arc<str>>, destination: Destination) -> Self {
        Self {
            payload: payload.into(),
            destination,
        }
    }

    #[inline]
    pub fn payload(&self) -> &str {
        &self.payload
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.payload.as_bytes()
    }

    #[inline]
    pub fn destination(&self) -> Destination {
        self.destination
    }
}
