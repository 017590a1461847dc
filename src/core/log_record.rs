//! Log record structure

use super::log_context::{FieldValue, LogContext};
use super::log_level::LogLevel;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// A single log event as seen by processors, handlers and formatters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Name of the logger that emitted the record
    pub channel: String,
    pub level: LogLevel,
    pub message: String,
    pub datetime: DateTime<FixedOffset>,
    #[serde(default, skip_serializing_if = "LogContext::is_empty")]
    pub context: LogContext,
    /// Fields added by processors
    #[serde(default, skip_serializing_if = "LogContext::is_empty")]
    pub extra: LogContext,
}

impl LogRecord {
    /// Create a record stamped with the current time in UTC
    pub fn new(channel: impl Into<String>, level: LogLevel, message: impl Into<String>) -> Self {
        Self::at(channel, level, message, Utc::now().fixed_offset())
    }

    /// Create a record with an explicit timestamp
    pub fn at(
        channel: impl Into<String>,
        level: LogLevel,
        message: impl Into<String>,
        datetime: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            channel: channel.into(),
            level,
            message: message.into(),
            datetime,
            context: LogContext::new(),
            extra: LogContext::new(),
        }
    }

    pub fn with_context(mut self, context: LogContext) -> Self {
        self.context = context;
        self
    }

    /// Add an `extra` field; intended for processors
    pub fn with_extra<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.extra.add_field(key, value);
        self
    }
}
