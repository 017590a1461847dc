//! Configuration for factory-built artifacts
//!
//! Options arrive as JSON objects. [`ConfigMap`] extracts typed values and
//! reports the offending field on failure; the `*Options` structs hold the
//! defaults for each construction routine. [`FactoryConfig`] describes a
//! whole set of artifacts for [`LoggerFactory::load`](super::LoggerFactory::load).

use crate::core::{parse_timezone, LogLevel, LoggerError, LoggerTimezone, Result};
use crate::handlers::ErrorLogMessageType;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// Accepted spellings of each option; the first one is used in errors
pub mod keys {
    pub const HANDLERS: &[&str] = &["handlers"];
    pub const PROCESSORS: &[&str] = &["processors"];
    pub const TIMEZONE: &[&str] = &["timezone"];

    pub const PROCESSOR_IDS: &[&str] = &["processor_ids", "processorIds"];
    pub const STREAM: &[&str] = &["stream"];
    pub const BUBBLE: &[&str] = &["bubble"];
    pub const FILE_PERMISSION: &[&str] = &["file_permission", "filePermission"];
    pub const USE_LOCKING: &[&str] = &["use_locking", "useLocking"];
    pub const MESSAGE_TYPE: &[&str] = &["message_type", "messageType"];
    pub const EXPAND_NEWLINES: &[&str] = &["expand_newlines", "expandNewLines", "expandNewlines"];

    pub const FORMAT: &[&str] = &["format"];
    pub const DATE_FORMAT: &[&str] = &["date_format", "dateFormat"];
    pub const ALLOW_INLINE_LINE_BREAKS: &[&str] =
        &["allow_inline_line_breaks", "allowInlineLineBreaks"];
    pub const IGNORE_EMPTY_CONTEXT_AND_EXTRA: &[&str] =
        &["ignore_empty_context_and_extra", "ignoreEmptyContextAndExtra"];
}

/// Read-only view over a configuration object
///
/// `null` values count as absent, so an explicit `null` selects the default.
#[derive(Debug, Clone, Copy)]
pub struct ConfigMap<'a> {
    values: Option<&'a Map<String, Value>>,
}

impl<'a> ConfigMap<'a> {
    /// Accepts an object or `null` (no options)
    pub fn new(value: &'a Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self { values: Some(map) }),
            Value::Null => Ok(Self { values: None }),
            _ => Err(LoggerError::invalid_config("config", "an object of options")),
        }
    }

    pub fn from_map(map: &'a Map<String, Value>) -> Self {
        Self { values: Some(map) }
    }

    pub fn empty() -> Self {
        Self { values: None }
    }

    /// First non-null value among `names`
    pub fn get(&self, names: &[&str]) -> Option<&'a Value> {
        let values = self.values?;
        names
            .iter()
            .filter_map(|name| values.get(*name))
            .find(|value| !value.is_null())
    }

    pub fn contains(&self, names: &[&str]) -> bool {
        self.get(names).is_some()
    }

    pub fn required_str(&self, names: &[&str]) -> Result<&'a str> {
        match self.get(names) {
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(_) => Err(LoggerError::invalid_config(names[0], "a string")),
            None => Err(LoggerError::invalid_config_with_hint(
                names[0],
                "a string",
                "the option is required",
            )),
        }
    }

    pub fn optional_str(&self, names: &[&str]) -> Result<Option<&'a str>> {
        match self.get(names) {
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(LoggerError::invalid_config(names[0], "a string or null")),
            None => Ok(None),
        }
    }

    pub fn bool_or(&self, names: &[&str], default: bool) -> Result<bool> {
        match self.get(names) {
            Some(Value::Bool(b)) => Ok(*b),
            Some(_) => Err(LoggerError::invalid_config(names[0], "a boolean")),
            None => Ok(default),
        }
    }

    /// Unix permission bits as an integer, or an octal string such as `"0644"`
    pub fn optional_mode(&self, names: &[&str]) -> Result<Option<u32>> {
        let invalid = || LoggerError::invalid_config(names[0], "permission bits or null");
        match self.get(names) {
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|mode| u32::try_from(mode).ok())
                .filter(|mode| *mode <= 0o7777)
                .map(Some)
                .ok_or_else(invalid),
            Some(Value::String(s)) => u32::from_str_radix(s.trim_start_matches("0o"), 8)
                .ok()
                .filter(|mode| *mode <= 0o7777)
                .map(Some)
                .ok_or_else(invalid),
            Some(_) => Err(invalid()),
            None => Ok(None),
        }
    }

    /// A list of strings; absent means empty
    pub fn string_list(&self, names: &[&str]) -> Result<Vec<String>> {
        let expected = "a list of strings";
        match self.get(names) {
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(idx, item)| match item {
                    Value::String(s) => Ok(s.clone()),
                    _ => Err(LoggerError::invalid_config(
                        format!("{}[{}]", names[0], idx),
                        "a string",
                    )),
                })
                .collect(),
            Some(_) => Err(LoggerError::invalid_config(names[0], expected)),
            None => Ok(Vec::new()),
        }
    }
}

/// Options of `create_logger`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoggerOptions {
    pub handlers: Vec<String>,
    pub processors: Vec<String>,
    /// `None` selects local time
    pub timezone: Option<LoggerTimezone>,
}

impl LoggerOptions {
    pub fn from_config(config: &ConfigMap<'_>) -> Result<Self> {
        Ok(Self {
            handlers: config.string_list(keys::HANDLERS)?,
            processors: config.string_list(keys::PROCESSORS)?,
            timezone: config
                .optional_str(keys::TIMEZONE)?
                .map(parse_timezone)
                .transpose()?,
        })
    }
}

/// Options of the `stream` handler type
#[derive(Debug, Clone, PartialEq)]
pub struct StreamHandlerOptions {
    pub stream: String,
    pub bubble: bool,
    pub file_permission: Option<u32>,
    pub use_locking: bool,
}

impl StreamHandlerOptions {
    pub fn new(stream: impl Into<String>) -> Self {
        Self {
            stream: stream.into(),
            bubble: true,
            file_permission: None,
            use_locking: false,
        }
    }

    pub fn from_config(config: &ConfigMap<'_>) -> Result<Self> {
        Ok(Self {
            stream: config.required_str(keys::STREAM)?.to_string(),
            bubble: config.bool_or(keys::BUBBLE, true)?,
            file_permission: config.optional_mode(keys::FILE_PERMISSION)?,
            use_locking: config.bool_or(keys::USE_LOCKING, false)?,
        })
    }
}

/// Options of the `error_log` handler type
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorLogHandlerOptions {
    pub message_type: ErrorLogMessageType,
    pub bubble: bool,
    pub expand_newlines: bool,
}

impl Default for ErrorLogHandlerOptions {
    fn default() -> Self {
        Self {
            message_type: ErrorLogMessageType::Os,
            bubble: true,
            expand_newlines: false,
        }
    }
}

impl ErrorLogHandlerOptions {
    pub fn from_config(config: &ConfigMap<'_>) -> Result<Self> {
        let field = keys::MESSAGE_TYPE[0];
        let message_type = match config.get(keys::MESSAGE_TYPE) {
            None => ErrorLogMessageType::default(),
            Some(Value::Number(n)) => n
                .as_i64()
                .and_then(|code| ErrorLogMessageType::try_from(code).ok())
                .ok_or_else(|| LoggerError::invalid_config(field, "0 (os) or 4 (sapi)"))?,
            Some(Value::String(s)) => s
                .parse::<ErrorLogMessageType>()
                .map_err(|_| LoggerError::invalid_config(field, "\"os\" or \"sapi\""))?,
            Some(_) => return Err(LoggerError::invalid_config(field, "a message type")),
        };

        Ok(Self {
            message_type,
            bubble: config.bool_or(keys::BUBBLE, true)?,
            expand_newlines: config.bool_or(keys::EXPAND_NEWLINES, false)?,
        })
    }
}

/// Options of the `line` formatter type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineFormatterOptions {
    /// `None` selects the default template
    pub format: Option<String>,
    /// `None` selects the default timestamp format
    pub date_format: Option<String>,
    pub allow_inline_line_breaks: bool,
    pub ignore_empty_context_and_extra: bool,
}

impl LineFormatterOptions {
    pub fn from_config(config: &ConfigMap<'_>) -> Result<Self> {
        Ok(Self {
            format: config.optional_str(keys::FORMAT)?.map(str::to_string),
            date_format: config.optional_str(keys::DATE_FORMAT)?.map(str::to_string),
            allow_inline_line_breaks: config.bool_or(keys::ALLOW_INLINE_LINE_BREAKS, false)?,
            ignore_empty_context_and_extra: config
                .bool_or(keys::IGNORE_EMPTY_CONTEXT_AND_EXTRA, false)?,
        })
    }
}

/// Level given as a numeric code or a name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelSetting {
    Code(u16),
    Name(String),
}

impl Default for LevelSetting {
    fn default() -> Self {
        LevelSetting::Code(LogLevel::Debug.code())
    }
}

impl LevelSetting {
    pub fn to_level(&self) -> Result<LogLevel> {
        let parsed = match self {
            LevelSetting::Code(code) => LogLevel::try_from(*code),
            LevelSetting::Name(name) => name.parse(),
        };
        parsed.map_err(|e| LoggerError::invalid_config_with_hint("level", "a log level", e))
    }
}

/// A typed artifact description: `{"type": "...", ...options}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactEntry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

/// A handler description: `{"type": "...", "level": ..., ...options}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandlerEntry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub level: LevelSetting,
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

/// Declarative description of a whole factory
///
/// # Example
///
/// ```
/// use rust_logger_factory::factory::FactoryConfig;
///
/// let config = FactoryConfig::from_json_str(r#"{
///     "handlers": {"console": {"type": "stream", "level": "info", "stream": "stderr"}},
///     "loggers": {"app": {"handlers": ["console"]}}
/// }"#).unwrap();
/// assert_eq!(config.handlers["console"].kind, "stream");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    pub processors: BTreeMap<String, ArtifactEntry>,
    pub handlers: BTreeMap<String, HandlerEntry>,
    pub formatters: BTreeMap<String, ArtifactEntry>,
    pub loggers: BTreeMap<String, Value>,
}

impl FactoryConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading factory configuration",
                format!("cannot read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json_str(&json)
    }
}
