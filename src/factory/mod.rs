//! Configuration-driven registry of loggers, handlers, processors and formatters
//!
//! Every artifact lives in its own namespace keyed by identifier. `create_*`
//! builds an artifact on first request and returns the cached instance on
//! every later one; `set_*` overwrites a slot unconditionally. Nothing is
//! stored when construction fails.
//!
//! # Example
//!
//! ```
//! use rust_logger_factory::prelude::*;
//! use serde_json::json;
//!
//! let factory = LoggerFactory::new();
//! factory.create_handler("quiet", "null", LogLevel::Debug, &json!({})).unwrap();
//! let logger = factory.create_logger("app", &json!({"handlers": ["quiet"]})).unwrap();
//!
//! let again = factory.create_logger("app", &json!({"handlers": []})).unwrap();
//! assert!(std::sync::Arc::ptr_eq(&logger, &again));
//! ```

pub mod config;
pub mod kinds;

pub use config::{
    ArtifactEntry, ConfigMap, ErrorLogHandlerOptions, FactoryConfig, HandlerEntry, LevelSetting,
    LineFormatterOptions, LoggerOptions, StreamHandlerOptions,
};
pub use kinds::{
    FormatterConstructor, FormatterType, HandlerConstructor, HandlerType, ProcessorConstructor,
};

use crate::core::{
    ArtifactKind, Formatter, Handler, LogLevel, Logger, LoggerError, Processor, Result,
    TimestampFormat,
};
use crate::formatters::LineFormatter;
use crate::handlers::{ErrorLogHandler, NullHandler, StreamHandler};
use config::keys;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Registry and factory for the four artifact namespaces
///
/// Create one per application and pass it around; there is no global
/// instance. Each `create_*` holds its namespace's write lock across the
/// check-then-create sequence, so concurrent first requests for one
/// identifier yield a single instance. Locks are taken in the order
/// logger, handler, processor.
///
/// Constructors registered with `register_*_type` run while the factory
/// holds the namespace lock of the artifact being built and must not call
/// back into that namespace.
#[derive(Default)]
pub struct LoggerFactory {
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
    handlers: RwLock<HashMap<String, Arc<dyn Handler>>>,
    processors: RwLock<HashMap<String, Processor>>,
    formatters: RwLock<HashMap<String, Arc<dyn Formatter>>>,

    handler_types: RwLock<HashMap<String, HandlerConstructor>>,
    formatter_types: RwLock<HashMap<String, FormatterConstructor>>,
    processor_types: RwLock<HashMap<String, ProcessorConstructor>>,
}

impl LoggerFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------------
    // Loggers
    // ---------------------------------------------------------------------

    /// Build the logger `id`, or return the one already registered
    ///
    /// On a cache hit `config` is ignored. Otherwise `handlers` and
    /// `processors` are resolved through [`get_handler`](Self::get_handler)
    /// and [`get_processor`](Self::get_processor) in the listed order, and
    /// `timezone` (optional) fixes the offset of record timestamps.
    pub fn create_logger(&self, id: &str, config: &Value) -> Result<Arc<Logger>> {
        let mut loggers = self.loggers.write();
        if let Some(existing) = loggers.get(id) {
            trace!(kind = "logger", id, "returning cached instance");
            return Ok(Arc::clone(existing));
        }

        let options = LoggerOptions::from_config(&ConfigMap::new(config)?)?;
        let handlers = options
            .handlers
            .iter()
            .map(|handler_id| self.get_handler(handler_id))
            .collect::<Result<Vec<_>>>()?;
        let processors = options
            .processors
            .iter()
            .map(|processor_id| self.get_processor(processor_id))
            .collect::<Result<Vec<_>>>()?;

        let logger = Arc::new(Logger::new(id, handlers, processors, options.timezone));
        loggers.insert(id.to_string(), Arc::clone(&logger));
        debug!(
            kind = "logger",
            id,
            handlers = options.handlers.len(),
            processors = options.processors.len(),
            "created"
        );
        Ok(logger)
    }

    /// Put `logger` under `id`, replacing any previous entry
    pub fn set_logger(&self, id: impl Into<String>, logger: Arc<Logger>) -> &Self {
        let id = id.into();
        debug!(kind = "logger", id = %id, "set");
        self.loggers.write().insert(id, logger);
        self
    }

    pub fn get_logger(&self, id: &str) -> Result<Arc<Logger>> {
        self.loggers
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| LoggerError::not_registered(ArtifactKind::Logger, id))
    }

    /// Snapshot of the logger namespace
    pub fn get_loggers(&self) -> HashMap<String, Arc<Logger>> {
        self.loggers.read().clone()
    }

    pub fn has_logger(&self, id: &str) -> bool {
        self.loggers.read().contains_key(id)
    }

    // ---------------------------------------------------------------------
    // Handlers
    // ---------------------------------------------------------------------

    /// Build the handler `id` of type `handler_type`, or return the one
    /// already registered
    ///
    /// Built-in types are `stream`, `error_log` and `null`; other tags are
    /// looked up among the constructors added with
    /// [`register_handler_type`](Self::register_handler_type). Processors
    /// named in `processor_ids` are attached in the listed order.
    pub fn create_handler(
        &self,
        id: &str,
        handler_type: &str,
        level: LogLevel,
        config: &Value,
    ) -> Result<Arc<dyn Handler>> {
        let mut handlers = self.handlers.write();
        if let Some(existing) = handlers.get(id) {
            trace!(kind = "handler", id, "returning cached instance");
            return Ok(Arc::clone(existing));
        }

        let config = ConfigMap::new(config)?;
        let processor_ids = config.string_list(keys::PROCESSOR_IDS)?;

        let mut handler = self.build_handler(handler_type, level, &config)?;
        for processor_id in &processor_ids {
            let processor = self.get_processor(processor_id).map_err(|_| {
                LoggerError::invalid_config_with_hint(
                    keys::PROCESSOR_IDS[0],
                    "identifiers of registered processors",
                    format!("processor '{}' is not registered", processor_id),
                )
            })?;
            handler.push_processor(processor);
        }

        let handler: Arc<dyn Handler> = Arc::from(handler);
        handlers.insert(id.to_string(), Arc::clone(&handler));
        debug!(
            kind = "handler",
            id,
            handler_type,
            level = %level,
            processors = processor_ids.len(),
            "created"
        );
        Ok(handler)
    }

    fn build_handler(
        &self,
        handler_type: &str,
        level: LogLevel,
        config: &ConfigMap<'_>,
    ) -> Result<Box<dyn Handler>> {
        let handler: Box<dyn Handler> = match handler_type.parse::<HandlerType>() {
            Ok(HandlerType::Stream) => {
                let options = StreamHandlerOptions::from_config(config)?;
                Box::new(
                    StreamHandler::new(options.stream, level)
                        .with_bubble(options.bubble)
                        .with_file_permission(options.file_permission)
                        .with_locking(options.use_locking),
                )
            }
            Ok(HandlerType::ErrorLog) => {
                let options = ErrorLogHandlerOptions::from_config(config)?;
                Box::new(
                    ErrorLogHandler::new(level)
                        .with_message_type(options.message_type)
                        .with_bubble(options.bubble)
                        .with_expand_newlines(options.expand_newlines),
                )
            }
            Ok(HandlerType::Null) => Box::new(NullHandler::new(level)),
            Err(_) => {
                let constructor = self.handler_types.read().get(handler_type).cloned();
                match constructor {
                    Some(constructor) => constructor(level, config)?,
                    None => {
                        return Err(LoggerError::unsupported_type(
                            ArtifactKind::Handler,
                            handler_type,
                        ))
                    }
                }
            }
        };
        Ok(handler)
    }

    pub fn set_handler(&self, id: impl Into<String>, handler: Arc<dyn Handler>) -> &Self {
        let id = id.into();
        debug!(kind = "handler", id = %id, "set");
        self.handlers.write().insert(id, handler);
        self
    }

    pub fn get_handler(&self, id: &str) -> Result<Arc<dyn Handler>> {
        self.handlers
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| LoggerError::not_registered(ArtifactKind::Handler, id))
    }

    pub fn get_handlers(&self) -> HashMap<String, Arc<dyn Handler>> {
        self.handlers.read().clone()
    }

    pub fn has_handler(&self, id: &str) -> bool {
        self.handlers.read().contains_key(id)
    }

    // ---------------------------------------------------------------------
    // Processors
    // ---------------------------------------------------------------------

    /// Build the processor `id` with a constructor added through
    /// [`register_processor_type`](Self::register_processor_type), or
    /// return the one already registered
    ///
    /// There are no built-in processor types.
    pub fn create_processor(
        &self,
        id: &str,
        processor_type: &str,
        config: &Value,
    ) -> Result<Processor> {
        let mut processors = self.processors.write();
        if let Some(existing) = processors.get(id) {
            trace!(kind = "processor", id, "returning cached instance");
            return Ok(Arc::clone(existing));
        }

        let config = ConfigMap::new(config)?;
        let constructor = self.processor_types.read().get(processor_type).cloned();
        let Some(constructor) = constructor else {
            return Err(LoggerError::unsupported_type(
                ArtifactKind::Processor,
                processor_type,
            ));
        };
        let processor = constructor(&config)?;

        processors.insert(id.to_string(), Arc::clone(&processor));
        debug!(kind = "processor", id, processor_type, "created");
        Ok(processor)
    }

    pub fn set_processor(&self, id: impl Into<String>, processor: Processor) -> &Self {
        let id = id.into();
        debug!(kind = "processor", id = %id, "set");
        self.processors.write().insert(id, processor);
        self
    }

    pub fn get_processor(&self, id: &str) -> Result<Processor> {
        self.processors
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| LoggerError::not_registered(ArtifactKind::Processor, id))
    }

    pub fn get_processors(&self) -> HashMap<String, Processor> {
        self.processors.read().clone()
    }

    pub fn has_processor(&self, id: &str) -> bool {
        self.processors.read().contains_key(id)
    }

    // ---------------------------------------------------------------------
    // Formatters
    // ---------------------------------------------------------------------

    /// Build the formatter `id` of type `formatter_type`, or return the one
    /// already registered
    ///
    /// The built-in type is `line`. An unknown tag is reported as an invalid
    /// `type` listing every accepted tag.
    pub fn create_formatter(
        &self,
        id: &str,
        formatter_type: &str,
        config: &Value,
    ) -> Result<Arc<dyn Formatter>> {
        let mut formatters = self.formatters.write();
        if let Some(existing) = formatters.get(id) {
            trace!(kind = "formatter", id, "returning cached instance");
            return Ok(Arc::clone(existing));
        }

        let config = ConfigMap::new(config)?;
        let formatter: Arc<dyn Formatter> = match formatter_type.parse::<FormatterType>() {
            Ok(FormatterType::Line) => {
                let options = LineFormatterOptions::from_config(&config)?;
                let date_format = options
                    .date_format
                    .as_deref()
                    .map(TimestampFormat::parse_pattern)
                    .transpose()?
                    .unwrap_or_default();
                Arc::new(
                    LineFormatter::new(options.format.as_deref(), None)
                        .with_date_format(date_format)
                        .with_allow_inline_line_breaks(options.allow_inline_line_breaks)
                        .with_ignore_empty_context_and_extra(
                            options.ignore_empty_context_and_extra,
                        ),
                )
            }
            Err(_) => {
                let constructor = self.formatter_types.read().get(formatter_type).cloned();
                match constructor {
                    Some(constructor) => constructor(&config)?,
                    None => return Err(self.unknown_formatter_type(formatter_type)),
                }
            }
        };

        formatters.insert(id.to_string(), Arc::clone(&formatter));
        debug!(kind = "formatter", id, formatter_type, "created");
        Ok(formatter)
    }

    fn unknown_formatter_type(&self, formatter_type: &str) -> LoggerError {
        let mut allowed: Vec<String> = FormatterType::ALL
            .iter()
            .map(|t| t.tag().to_string())
            .collect();
        let mut registered: Vec<String> = self.formatter_types.read().keys().cloned().collect();
        registered.sort();
        allowed.extend(registered);

        LoggerError::invalid_config_with_hint(
            "type",
            format!("one of [{}]", allowed.join(", ")),
            format!(
                "got '{}'; register the formatter manually with set_formatter()",
                formatter_type
            ),
        )
    }

    pub fn set_formatter(&self, id: impl Into<String>, formatter: Arc<dyn Formatter>) -> &Self {
        let id = id.into();
        debug!(kind = "formatter", id = %id, "set");
        self.formatters.write().insert(id, formatter);
        self
    }

    pub fn get_formatter(&self, id: &str) -> Result<Arc<dyn Formatter>> {
        self.formatters
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| LoggerError::not_registered(ArtifactKind::Formatter, id))
    }

    pub fn get_formatters(&self) -> HashMap<String, Arc<dyn Formatter>> {
        self.formatters.read().clone()
    }

    pub fn has_formatter(&self, id: &str) -> bool {
        self.formatters.read().contains_key(id)
    }

    // ---------------------------------------------------------------------
    // Extension points
    // ---------------------------------------------------------------------

    /// Teach `create_handler` a new type tag
    ///
    /// Fails when `tag` names a built-in handler type.
    pub fn register_handler_type<F>(&self, tag: impl Into<String>, constructor: F) -> Result<&Self>
    where
        F: Fn(LogLevel, &ConfigMap<'_>) -> Result<Box<dyn Handler>> + Send + Sync + 'static,
    {
        let tag = tag.into();
        if tag.parse::<HandlerType>().is_ok() {
            return Err(reserved_tag(ArtifactKind::Handler, &tag));
        }
        debug!(kind = "handler", tag = %tag, "registered type");
        self.handler_types.write().insert(tag, Arc::new(constructor));
        Ok(self)
    }

    /// Teach `create_formatter` a new type tag
    ///
    /// Fails when `tag` names a built-in formatter type.
    pub fn register_formatter_type<F>(
        &self,
        tag: impl Into<String>,
        constructor: F,
    ) -> Result<&Self>
    where
        F: Fn(&ConfigMap<'_>) -> Result<Arc<dyn Formatter>> + Send + Sync + 'static,
    {
        let tag = tag.into();
        if tag.parse::<FormatterType>().is_ok() {
            return Err(reserved_tag(ArtifactKind::Formatter, &tag));
        }
        debug!(kind = "formatter", tag = %tag, "registered type");
        self.formatter_types.write().insert(tag, Arc::new(constructor));
        Ok(self)
    }

    /// Teach `create_processor` a new type tag
    pub fn register_processor_type<F>(&self, tag: impl Into<String>, constructor: F) -> &Self
    where
        F: Fn(&ConfigMap<'_>) -> Result<Processor> + Send + Sync + 'static,
    {
        let tag = tag.into();
        debug!(kind = "processor", tag = %tag, "registered type");
        self.processor_types.write().insert(tag, Arc::new(constructor));
        self
    }

    // ---------------------------------------------------------------------
    // Declarative bootstrap
    // ---------------------------------------------------------------------

    /// Create every artifact described by `config`
    ///
    /// Processors are built first, then handlers, formatters and loggers,
    /// so references resolve against entries of the same configuration.
    /// Stops at the first error; artifacts created before it stay registered.
    pub fn load(&self, config: &FactoryConfig) -> Result<&Self> {
        for (id, entry) in &config.processors {
            self.create_processor(id, &entry.kind, &Value::Object(entry.options.clone()))?;
        }
        for (id, entry) in &config.handlers {
            let level = entry.level.to_level()?;
            self.create_handler(id, &entry.kind, level, &Value::Object(entry.options.clone()))?;
        }
        for (id, entry) in &config.formatters {
            self.create_formatter(id, &entry.kind, &Value::Object(entry.options.clone()))?;
        }
        for (id, logger_config) in &config.loggers {
            self.create_logger(id, logger_config)?;
        }
        debug!(
            processors = config.processors.len(),
            handlers = config.handlers.len(),
            formatters = config.formatters.len(),
            loggers = config.loggers.len(),
            "factory configuration loaded"
        );
        Ok(self)
    }
}

fn reserved_tag(kind: ArtifactKind, tag: &str) -> LoggerError {
    LoggerError::invalid_config_with_hint(
        "type",
        format!("a {} type tag that is not built in", kind),
        format!("'{}' is handled by the factory itself", tag),
    )
}

impl fmt::Debug for LoggerFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids = |names: Vec<&String>| {
            let mut names: Vec<String> = names.into_iter().cloned().collect();
            names.sort();
            names
        };
        f.debug_struct("LoggerFactory")
            .field("loggers", &ids(self.loggers.read().keys().collect()))
            .field("handlers", &ids(self.handlers.read().keys().collect()))
            .field("processors", &ids(self.processors.read().keys().collect()))
            .field("formatters", &ids(self.formatters.read().keys().collect()))
            .finish()
    }
}
