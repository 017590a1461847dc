//! Processors transform a record before it is emitted

use super::log_record::LogRecord;
use std::sync::Arc;

/// A shared record transformation
///
/// Processors are opaque: the factory tracks their identity only.
pub type Processor = Arc<dyn Fn(LogRecord) -> LogRecord + Send + Sync>;

/// Wrap a closure as a [`Processor`]
///
/// # Example
///
/// ```
/// use rust_logger_factory::core::{processor, LogLevel, LogRecord};
///
/// let tag = processor(|record: LogRecord| record.with_extra("service", "api"));
/// let record = tag(LogRecord::new("app", LogLevel::Info, "ready"));
/// assert!(record.extra.get("service").is_some());
/// ```
pub fn processor<F>(f: F) -> Processor
where
    F: Fn(LogRecord) -> LogRecord + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Run `processors` over `record` in order
pub fn apply_processors(processors: &[Processor], record: LogRecord) -> LogRecord {
    processors.iter().fold(record, |record, p| p(record))
}
