//! Handler trait for log output destinations

use super::{
    error::Result,
    formatter::Formatter,
    log_level::LogLevel,
    log_record::LogRecord,
    processor::{apply_processors, Processor},
};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A sink receiving records at or above a minimum level
///
/// Handlers are shared (`Arc<dyn Handler>`) once built, so `handle` takes
/// `&self`; implementations guard their writers internally. Processors and
/// the formatter are configured through `&mut self` before the handler is
/// shared.
pub trait Handler: Send + Sync {
    /// Minimum level this handler accepts
    fn level(&self) -> LogLevel;

    /// Whether a handled record continues to the next handler
    fn bubble(&self) -> bool;

    fn is_handling(&self, level: LogLevel) -> bool {
        level >= self.level()
    }

    /// Handle a record. Returns `true` when propagation must stop here.
    fn handle(&self, record: &LogRecord) -> Result<bool>;

    /// Attach a processor; processors run in attachment order
    fn push_processor(&mut self, processor: Processor);

    fn processors(&self) -> &[Processor];

    /// Apply the attached processors to `record`
    fn process_record(&self, record: LogRecord) -> LogRecord {
        apply_processors(self.processors(), record)
    }

    fn set_formatter(&mut self, formatter: Arc<dyn Formatter>);

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;

    /// Access to the concrete handler type
    fn as_any(&self) -> &dyn Any;
}

impl fmt::Debug for dyn Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("name", &self.name())
            .field("level", &self.level())
            .field("bubble", &self.bubble())
            .field("processors", &self.processors().len())
            .finish()
    }
}

/// State shared by the built-in handlers
pub struct HandlerCore {
    pub level: LogLevel,
    pub bubble: bool,
    pub processors: Vec<Processor>,
    pub formatter: Arc<dyn Formatter>,
}

impl HandlerCore {
    pub fn new(level: LogLevel, formatter: Arc<dyn Formatter>) -> Self {
        Self {
            level,
            bubble: true,
            processors: Vec::new(),
            formatter,
        }
    }

    /// Run processors and render the result
    pub fn render(&self, record: &LogRecord) -> String {
        let record = apply_processors(&self.processors, record.clone());
        self.formatter.format(&record)
    }
}
