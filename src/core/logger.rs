//! Main logger implementation

use super::{
    handler::Handler,
    log_context::LogContext,
    log_level::LogLevel,
    log_record::LogRecord,
    metrics::LoggerMetrics,
    processor::{apply_processors, Processor},
    timestamp::LoggerTimezone,
};
use super::error::Result;
use std::fmt;
use std::sync::Arc;

/// A named logger dispatching records to an ordered list of handlers
///
/// Handlers and processors are fixed at construction. The first handler
/// interested in a record's level receives it first; each later handler
/// receives it until one of them stops propagation.
pub struct Logger {
    name: String,
    handlers: Vec<Arc<dyn Handler>>,
    processors: Vec<Processor>,
    timezone: LoggerTimezone,
    /// Dispatch counters
    metrics: LoggerMetrics,
}

impl Logger {
    /// Create a logger; `timezone = None` stamps records in local time
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        handlers: Vec<Arc<dyn Handler>>,
        processors: Vec<Processor>,
        timezone: Option<LoggerTimezone>,
    ) -> Self {
        Self {
            name: name.into(),
            handlers,
            processors,
            timezone: timezone.unwrap_or_default(),
            metrics: LoggerMetrics::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handlers(&self) -> &[Arc<dyn Handler>] {
        &self.handlers
    }

    pub fn processors(&self) -> &[Processor] {
        &self.processors
    }

    pub fn timezone(&self) -> LoggerTimezone {
        self.timezone
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Whether any handler accepts records of `level`
    pub fn is_handling(&self, level: LogLevel) -> bool {
        self.handlers.iter().any(|h| h.is_handling(level))
    }

    /// Log a message. Returns `false` when no handler accepted the level.
    pub fn log(&self, level: LogLevel, message: impl Into<String>) -> bool {
        self.log_with_context(level, message, LogContext::new())
    }

    pub fn log_with_context(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        context: LogContext,
    ) -> bool {
        let Some(start) = self.handlers.iter().position(|h| h.is_handling(level)) else {
            self.metrics.record_unhandled();
            return false;
        };

        let datetime = self.timezone.now();
        let record = LogRecord::at(self.name.as_str(), level, message, datetime).with_context(context);
        let record = apply_processors(&self.processors, record);

        let mut delivered = false;
        for (idx, handler) in self.handlers[start..].iter().enumerate() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                handler.handle(&record)
            }));

            match result {
                Ok(Ok(stop)) => {
                    delivered = true;
                    if stop {
                        break;
                    }
                }
                Ok(Err(e)) => {
                    self.metrics.record_handler_failure();
                    tracing::warn!(
                        logger = %self.name,
                        handler = handler.name(),
                        position = start + idx,
                        error = %e,
                        "handler failed"
                    );
                }
                Err(panic_info) => {
                    self.metrics.record_handler_failure();
                    tracing::error!(
                        logger = %self.name,
                        handler = handler.name(),
                        position = start + idx,
                        panic = %panic_message(panic_info.as_ref()),
                        "handler panicked; remaining handlers continue"
                    );
                }
            }
        }

        if delivered {
            self.metrics.record_handled();
        }
        true
    }

    pub fn debug(&self, message: impl Into<String>) -> bool {
        self.log(LogLevel::Debug, message)
    }

    pub fn info(&self, message: impl Into<String>) -> bool {
        self.log(LogLevel::Info, message)
    }

    pub fn notice(&self, message: impl Into<String>) -> bool {
        self.log(LogLevel::Notice, message)
    }

    pub fn warning(&self, message: impl Into<String>) -> bool {
        self.log(LogLevel::Warning, message)
    }

    pub fn error(&self, message: impl Into<String>) -> bool {
        self.log(LogLevel::Error, message)
    }

    pub fn critical(&self, message: impl Into<String>) -> bool {
        self.log(LogLevel::Critical, message)
    }

    pub fn alert(&self, message: impl Into<String>) -> bool {
        self.log(LogLevel::Alert, message)
    }

    pub fn emergency(&self, message: impl Into<String>) -> bool {
        self.log(LogLevel::Emergency, message)
    }

    /// Flush every handler, returning the first error
    pub fn flush(&self) -> Result<()> {
        let mut first_error = None;
        for handler in &self.handlers {
            if let Err(e) = handler.flush() {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use rust_logger_factory::prelude::*;
    /// use std::sync::Arc;
    ///
    /// let logger = Logger::builder("app")
    ///     .handler(Arc::new(NullHandler::new(LogLevel::Debug)))
    ///     .build();
    /// assert!(logger.info("ready"));
    /// ```
    #[must_use]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("handlers", &self.handlers)
            .field("processors", &self.processors.len())
            .field("timezone", &self.timezone)
            .finish()
    }
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Builder for [`Logger`]
pub struct LoggerBuilder {
    name: String,
    handlers: Vec<Arc<dyn Handler>>,
    processors: Vec<Processor>,
    timezone: Option<LoggerTimezone>,
}

impl LoggerBuilder {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handlers: Vec::new(),
            processors: Vec::new(),
            timezone: None,
        }
    }

    /// Append a handler
    #[must_use = "builder methods return a new value"]
    pub fn handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Append a processor
    #[must_use = "builder methods return a new value"]
    pub fn processor(mut self, processor: Processor) -> Self {
        self.processors.push(processor);
        self
    }

    /// Set the timezone used for record timestamps
    #[must_use = "builder methods return a new value"]
    pub fn timezone(mut self, timezone: impl Into<LoggerTimezone>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    pub fn build(self) -> Logger {
        Logger::new(self.name, self.handlers, self.processors, self.timezone)
    }
}
