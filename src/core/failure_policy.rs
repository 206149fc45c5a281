//! Dispatch failure policy
//!
//! Once a record is queued its producer has returned, so a failed sink write
//! cannot be reported to the caller. The record is dropped; this policy only
//! decides who else hears about it.

use super::record::Destination;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// How the writer reacts to a record it could not deliver.
///
/// Drops are always counted in [`WriterMetrics`](super::WriterMetrics)
/// whatever the policy.
///
/// # Example
///
/// ```
/// use rust_sink_logger::DispatchFailurePolicy;
///
/// // Default behavior: count and stay quiet
/// let policy = DispatchFailurePolicy::default();
/// assert_eq!(policy, DispatchFailurePolicy::Silent);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DispatchFailurePolicy {
    /// Drop the record without any output.
    #[default]
    Silent,

    /// Drop the record and warn on stderr on the first drop and every
    /// 1000th one after it.
    Alert,
}

impl fmt::Display for DispatchFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchFailurePolicy::Silent => write!(f, "Silent"),
            DispatchFailurePolicy::Alert => write!(f, "Alert"),
        }
    }
}

/// Callback invoked from the writer thread for every dropped record.
///
/// Receives the destination of the record and the total drop count so far,
/// including this one.
pub type DispatchFailureCallback = Arc<dyn Fn(Destination, u64) + Send + Sync>;

/// Interval between repeated stderr alerts under [`DispatchFailurePolicy::Alert`].
pub(crate) const ALERT_INTERVAL: u64 = 1000;

/// Whether the `dropped_total`-th drop should produce an alert.
#[inline]
pub(crate) fn should_alert(dropped_total: u64) -> bool {
    dropped_total == 1 || dropped_total % ALERT_INTERVAL == 0
}
