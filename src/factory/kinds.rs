//! Built-in type tags and constructor signatures for registered types

use super::config::ConfigMap;
use crate::core::{Formatter, Handler, LogLevel, Processor, Result};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Handler types the factory builds without registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerType {
    Stream,
    ErrorLog,
    Null,
}

impl HandlerType {
    pub const ALL: [HandlerType; 3] = [HandlerType::Stream, HandlerType::ErrorLog, HandlerType::Null];

    pub fn tag(&self) -> &'static str {
        match self {
            HandlerType::Stream => "stream",
            HandlerType::ErrorLog => "error_log",
            HandlerType::Null => "null",
        }
    }
}

impl fmt::Display for HandlerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for HandlerType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        HandlerType::ALL
            .into_iter()
            .find(|t| t.tag() == s)
            .ok_or_else(|| format!("Unknown handler type: '{}'", s))
    }
}

/// Formatter types the factory builds without registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatterType {
    Line,
}

impl FormatterType {
    pub const ALL: [FormatterType; 1] = [FormatterType::Line];

    pub fn tag(&self) -> &'static str {
        match self {
            FormatterType::Line => "line",
        }
    }
}

impl fmt::Display for FormatterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for FormatterType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        FormatterType::ALL
            .into_iter()
            .find(|t| t.tag() == s)
            .ok_or_else(|| format!("Unknown formatter type: '{}'", s))
    }
}

/// Builds a handler of a registered type from its level and options
///
/// The factory attaches `processor_ids` after construction.
pub type HandlerConstructor =
    Arc<dyn Fn(LogLevel, &ConfigMap<'_>) -> Result<Box<dyn Handler>> + Send + Sync>;

/// Builds a formatter of a registered type from its options
pub type FormatterConstructor =
    Arc<dyn Fn(&ConfigMap<'_>) -> Result<Arc<dyn Formatter>> + Send + Sync>;

/// Builds a processor of a registered type from its options
pub type ProcessorConstructor = Arc<dyn Fn(&ConfigMap<'_>) -> Result<Processor> + Send + Sync>;
