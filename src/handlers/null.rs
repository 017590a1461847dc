//! Null handler: swallows records without output

use crate::core::{Formatter, Handler, HandlerCore, LogLevel, LogRecord, Processor, Result};
use crate::formatters::LineFormatter;
use std::any::Any;
use std::sync::Arc;

/// Discards every record at or above its level and stops propagation
///
/// Attached processors still run, so side effects such as counters behave
/// the same as with a real sink.
pub struct NullHandler {
    core: HandlerCore,
}

impl NullHandler {
    pub fn new(level: LogLevel) -> Self {
        let mut core = HandlerCore::new(level, Arc::new(LineFormatter::default()));
        core.bubble = false;
        Self { core }
    }
}

impl Handler for NullHandler {
    fn level(&self) -> LogLevel {
        self.core.level
    }

    fn bubble(&self) -> bool {
        false
    }

    fn handle(&self, record: &LogRecord) -> Result<bool> {
        if !self.is_handling(record.level) {
            return Ok(false);
        }
        let _ = self.process_record(record.clone());
        Ok(true)
    }

    fn push_processor(&mut self, processor: Processor) {
        self.core.processors.push(processor);
    }

    fn processors(&self) -> &[Processor] {
        &self.core.processors
    }

    fn set_formatter(&mut self, formatter: Arc<dyn Formatter>) {
        self.core.formatter = formatter;
    }

    fn name(&self) -> &str {
        "null"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
