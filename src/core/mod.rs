//! Core logger types and traits

pub mod config;
pub mod error;
pub mod failure_policy;
pub mod flags;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod queue;
pub mod record;
pub mod settings;
pub mod sink;
pub mod writer;

pub use config::ConfigState;
pub use error::{LoggerError, Result};
pub use failure_policy::{DispatchFailureCallback, DispatchFailurePolicy};
pub use flags::MetadataFlags;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::WriterMetrics;
pub use output_format::{format_message, format_message_at};
pub use queue::{Batch, RecordQueue};
pub use record::{Destination, Record};
pub use settings::Settings;
pub use sink::Sink;
