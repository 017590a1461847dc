//! # Rust Logger Factory
//!
//! A configuration-driven factory that builds loggers, handlers, processors
//! and formatters from JSON options and keeps one instance per identifier.
//!
//! ## Features
//!
//! - **Memoized construction**: `create_*` returns the cached instance on every
//!   request after the first
//! - **Built-in handlers**: stream (stdout, stderr, files with optional locking),
//!   error log and null
//! - **Line formatter**: placeholder templates with configurable timestamps
//! - **Extensible**: register constructors for new handler, formatter and
//!   processor types
//! - **Thread Safe**: every namespace is guarded, concurrent first requests
//!   yield a single instance
//!
//! ## Example
//!
//! ```
//! use rust_logger_factory::prelude::*;
//! use serde_json::json;
//!
//! let factory = LoggerFactory::new();
//! factory
//!     .create_handler("console", "stream", LogLevel::Warning, &json!({"stream": "stderr"}))
//!     .unwrap();
//! let logger = factory
//!     .create_logger("app", &json!({"handlers": ["console"], "timezone": "UTC"}))
//!     .unwrap();
//!
//! assert!(!logger.info("below every handler"));
//! ```

pub mod core;
pub mod factory;
pub mod formatters;
pub mod handlers;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        processor, ArtifactKind, FieldValue, Formatter, Handler, LogContext, LogLevel, LogRecord,
        Logger, LoggerBuilder, LoggerError, LoggerMetrics, LoggerTimezone, Processor, Result,
        TimestampFormat,
    };
    pub use crate::factory::{ConfigMap, FactoryConfig, LoggerFactory};
    pub use crate::formatters::LineFormatter;
    pub use crate::handlers::{ErrorLogHandler, ErrorLogMessageType, NullHandler, StreamHandler};
}

pub use crate::core::{
    processor, ArtifactKind, FieldValue, Formatter, Handler, LogContext, LogLevel, LogRecord,
    Logger, LoggerBuilder, LoggerError, LoggerMetrics, LoggerTimezone, Processor, Result,
    TimestampFormat,
};
pub use factory::{ConfigMap, FactoryConfig, LoggerFactory};
pub use formatters::LineFormatter;
pub use handlers::{ErrorLogHandler, ErrorLogMessageType, NullHandler, StreamHandler};
