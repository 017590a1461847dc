//! Formatter trait for rendering records as text

use super::log_record::LogRecord;
use std::fmt;

pub trait Formatter: Send + Sync {
    fn format(&self, record: &LogRecord) -> String;
    fn name(&self) -> &str;
}

impl fmt::Debug for dyn Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formatter").field("name", &self.name()).finish()
    }
}
