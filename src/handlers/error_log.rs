//! Error-log handler: writes records to the process's error-logging facility

use crate::core::{Formatter, Handler, HandlerCore, LogLevel, LogRecord, Processor, Result};
use crate::formatters::LineFormatter;
use parking_lot::Mutex;
use std::any::Any;
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;

/// Template of the default formatter; the handler terminates each entry
pub const ERROR_LOG_FORMAT: &str = "[%datetime%] %channel%.%level_name%: %message% %context% %extra%";

/// Destination of error-log entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorLogMessageType {
    /// The operating system's error log of the process (standard error)
    #[default]
    Os = 0,
    /// The embedding host's log sink; standard error when there is no host
    Sapi = 4,
}

impl ErrorLogMessageType {
    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            ErrorLogMessageType::Os => "os",
            ErrorLogMessageType::Sapi => "sapi",
        }
    }
}

impl fmt::Display for ErrorLogMessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl TryFrom<i64> for ErrorLogMessageType {
    type Error = String;

    fn try_from(code: i64) -> std::result::Result<Self, Self::Error> {
        match code {
            0 => Ok(ErrorLogMessageType::Os),
            4 => Ok(ErrorLogMessageType::Sapi),
            _ => Err(format!("Invalid error log message type: {}", code)),
        }
    }
}

impl FromStr for ErrorLogMessageType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "os" | "0" => Ok(ErrorLogMessageType::Os),
            "sapi" | "4" => Ok(ErrorLogMessageType::Sapi),
            _ => Err(format!("Invalid error log message type: '{}'", s)),
        }
    }
}

pub struct ErrorLogHandler {
    core: HandlerCore,
    message_type: ErrorLogMessageType,
    expand_newlines: bool,
    custom_formatter: bool,
    writer: Mutex<Option<Box<dyn Write + Send>>>,
}

impl ErrorLogHandler {
    pub fn new(level: LogLevel) -> Self {
        Self {
            core: HandlerCore::new(level, Arc::new(Self::default_formatter(false))),
            message_type: ErrorLogMessageType::default(),
            expand_newlines: false,
            custom_formatter: false,
            writer: Mutex::new(None),
        }
    }

    fn default_formatter(allow_inline_line_breaks: bool) -> LineFormatter {
        LineFormatter::new(Some(ERROR_LOG_FORMAT), None)
            .with_allow_inline_line_breaks(allow_inline_line_breaks)
    }

    #[must_use]
    pub fn with_message_type(mut self, message_type: ErrorLogMessageType) -> Self {
        self.message_type = message_type;
        self
    }

    #[must_use]
    pub fn with_bubble(mut self, bubble: bool) -> Self {
        self.core.bubble = bubble;
        self
    }

    /// Emit every line of a multi-line entry separately
    #[must_use]
    pub fn with_expand_newlines(mut self, expand_newlines: bool) -> Self {
        self.expand_newlines = expand_newlines;
        if !self.custom_formatter {
            self.core.formatter = Arc::new(Self::default_formatter(expand_newlines));
        }
        self
    }

    /// Send entries to `writer` instead of standard error
    #[must_use]
    pub fn with_writer(self, writer: Box<dyn Write + Send>) -> Self {
        *self.writer.lock() = Some(writer);
        self
    }

    pub fn message_type(&self) -> ErrorLogMessageType {
        self.message_type
    }

    pub fn expand_newlines(&self) -> bool {
        self.expand_newlines
    }

    fn emit(&self, entry: &str) -> Result<()> {
        let mut writer = self.writer.lock();
        match writer.as_mut() {
            Some(sink) => {
                sink.write_all(entry.as_bytes())?;
                sink.write_all(b"\n")?;
            }
            None => {
                let mut stderr = std::io::stderr().lock();
                stderr.write_all(entry.as_bytes())?;
                stderr.write_all(b"\n")?;
            }
        }
        Ok(())
    }
}

impl Handler for ErrorLogHandler {
    fn level(&self) -> LogLevel {
        self.core.level
    }

    fn bubble(&self) -> bool {
        self.core.bubble
    }

    fn handle(&self, record: &LogRecord) -> Result<bool> {
        if !self.is_handling(record.level) {
            return Ok(false);
        }

        let formatted = self.core.render(record);
        if self.expand_newlines {
            for line in formatted.split(['\r', '\n']).filter(|line| !line.is_empty()) {
                self.emit(line)?;
            }
        } else {
            self.emit(formatted.trim_end_matches('\n'))?;
        }
        Ok(!self.core.bubble)
    }

    fn push_processor(&mut self, processor: Processor) {
        self.core.processors.push(processor);
    }

    fn processors(&self) -> &[Processor] {
        &self.core.processors
    }

    fn set_formatter(&mut self, formatter: Arc<dyn Formatter>) {
        self.core.formatter = formatter;
        self.custom_formatter = true;
    }

    fn flush(&self) -> Result<()> {
        match self.writer.lock().as_mut() {
            Some(sink) => sink.flush()?,
            None => std::io::stderr().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "error_log"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
