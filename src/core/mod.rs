//! Core logger types and traits

pub mod error;
pub mod formatter;
pub mod handler;
pub mod log_context;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod processor;
pub mod timestamp;

pub use error::{ArtifactKind, LoggerError, Result};
pub use formatter::Formatter;
pub use handler::{Handler, HandlerCore};
pub use log_context::{FieldValue, LogContext};
pub use log_level::LogLevel;
pub use log_record::LogRecord;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use processor::{apply_processors, processor, Processor};
pub use timestamp::{parse_timezone, LoggerTimezone, TimestampFormat};
