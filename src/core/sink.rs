//! Sink trait for record output destinations

use super::error::Result;

/// A physical destination the writer thread writes payload bytes to.
///
/// Writes go through `&self` so the writer can dispatch while producers and
/// other readers hold the configuration lock in shared mode.
pub trait Sink: Send + Sync {
    fn write_payload(&self, payload: &[u8]) -> Result<()>;
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;
}
