//! Error types for the logger factory

use std::fmt;

pub type Result<T> = std::result::Result<T, LoggerError>;

/// The four namespaces owned by the factory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Logger,
    Handler,
    Processor,
    Formatter,
}

impl ArtifactKind {
    pub fn to_str(&self) -> &'static str {
        match self {
            ArtifactKind::Logger => "logger",
            ArtifactKind::Handler => "handler",
            ArtifactKind::Processor => "processor",
            ArtifactKind::Formatter => "formatter",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Lookup of an identifier that is absent from its namespace
    #[error("No {kind} is registered under '{id}'")]
    NotRegistered { kind: ArtifactKind, id: String },

    /// Missing, wrongly typed or dangling configuration value
    #[error("Invalid configuration for '{field}': expected {expected}{}", hint_suffix(.hint))]
    InvalidConfig {
        field: String,
        expected: String,
        hint: Option<String>,
    },

    /// Type tag without a construction routine
    #[error("Unsupported {kind} type '{tag}'{}", hint_suffix(.hint))]
    UnsupportedType {
        kind: ArtifactKind,
        tag: String,
        hint: Option<String>,
    },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File lock error
    #[error("Failed to acquire file lock on '{path}'")]
    FileLockError { path: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

fn hint_suffix(hint: &Option<String>) -> String {
    match hint {
        Some(hint) => format!(" ({})", hint),
        None => String::new(),
    }
}

impl LoggerError {
    /// Create a not-registered error
    pub fn not_registered(kind: ArtifactKind, id: impl Into<String>) -> Self {
        LoggerError::NotRegistered {
            kind,
            id: id.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(field: impl Into<String>, expected: impl Into<String>) -> Self {
        LoggerError::InvalidConfig {
            field: field.into(),
            expected: expected.into(),
            hint: None,
        }
    }

    /// Create an invalid configuration error with a remediation hint
    pub fn invalid_config_with_hint(
        field: impl Into<String>,
        expected: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        LoggerError::InvalidConfig {
            field: field.into(),
            expected: expected.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an unsupported type error pointing at the manual registration method
    pub fn unsupported_type(kind: ArtifactKind, tag: impl Into<String>) -> Self {
        let setter = match kind {
            ArtifactKind::Logger => "set_logger",
            ArtifactKind::Handler => "set_handler",
            ArtifactKind::Processor => "set_processor",
            ArtifactKind::Formatter => "set_formatter",
        };
        LoggerError::UnsupportedType {
            kind,
            tag: tag.into(),
            hint: Some(format!("register the {} manually with {}()", kind, setter)),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a file lock error
    pub fn file_lock(path: impl Into<String>) -> Self {
        LoggerError::FileLockError { path: path.into() }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
