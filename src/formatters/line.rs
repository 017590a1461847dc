//! Single-line text formatter driven by a placeholder template
//!
//! Supported placeholders: `%datetime%`, `%channel%`, `%level_name%`,
//! `%level%`, `%message%`, `%context%`, `%extra%`, `%context.KEY%` and
//! `%extra.KEY%`. Fields consumed by a `%context.KEY%` or `%extra.KEY%`
//! placeholder are left out of the `%context%`/`%extra%` dumps.

use crate::core::{Formatter, LogContext, LogRecord, TimestampFormat};

/// Default template used when none is configured
pub const SIMPLE_FORMAT: &str = "[%datetime%] %channel%.%level_name%: %message% %context% %extra%\n";

#[derive(Debug, Clone, PartialEq)]
pub struct LineFormatter {
    format: String,
    date_format: TimestampFormat,
    allow_inline_line_breaks: bool,
    ignore_empty_context_and_extra: bool,
}

impl Default for LineFormatter {
    fn default() -> Self {
        Self {
            format: SIMPLE_FORMAT.to_string(),
            date_format: TimestampFormat::default(),
            allow_inline_line_breaks: false,
            ignore_empty_context_and_extra: false,
        }
    }
}

impl LineFormatter {
    /// `None` for either argument selects the default
    pub fn new(format: Option<&str>, date_format: Option<&str>) -> Self {
        Self {
            format: format.unwrap_or(SIMPLE_FORMAT).to_string(),
            date_format: TimestampFormat::from_pattern(date_format),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_allow_inline_line_breaks(mut self, allow: bool) -> Self {
        self.allow_inline_line_breaks = allow;
        self
    }

    #[must_use]
    pub fn with_ignore_empty_context_and_extra(mut self, ignore: bool) -> Self {
        self.ignore_empty_context_and_extra = ignore;
        self
    }

    #[must_use]
    pub fn with_date_format(mut self, format: TimestampFormat) -> Self {
        self.date_format = format;
        self
    }

    pub fn template(&self) -> &str {
        &self.format
    }

    pub fn date_format(&self) -> &TimestampFormat {
        &self.date_format
    }

    pub fn allows_inline_line_breaks(&self) -> bool {
        self.allow_inline_line_breaks
    }

    pub fn ignores_empty_context_and_extra(&self) -> bool {
        self.ignore_empty_context_and_extra
    }

    fn normalize(&self, value: &str) -> String {
        if self.allow_inline_line_breaks {
            value.to_string()
        } else {
            value.replace("\r\n", " ").replace(['\r', '\n'], " ")
        }
    }

    /// Drop fields that the template prints individually
    fn remaining(&self, fields: &LogContext, prefix: &str) -> LogContext {
        let mut rest = LogContext::new();
        for (key, value) in fields.fields() {
            let placeholder = format!("%{}.{}%", prefix, key);
            if !self.format.contains(&placeholder) {
                rest.add_field(key.clone(), value.clone());
            }
        }
        rest
    }

    fn dump(&self, fields: &LogContext) -> Option<String> {
        if fields.is_empty() && self.ignore_empty_context_and_extra {
            None
        } else {
            Some(self.normalize(&fields.to_json()))
        }
    }

    fn resolve(
        &self,
        token: &str,
        record: &LogRecord,
        context: &Option<String>,
        extra: &Option<String>,
    ) -> Option<String> {
        let value = match token {
            "datetime" => self.date_format.format(&record.datetime),
            "channel" => self.normalize(&record.channel),
            "level_name" => record.level.to_str().to_string(),
            "level" => record.level.code().to_string(),
            "message" => self.normalize(&record.message),
            "context" => context.clone().unwrap_or_default(),
            "extra" => extra.clone().unwrap_or_default(),
            _ => {
                if let Some(key) = token.strip_prefix("context.") {
                    record
                        .context
                        .get(key)
                        .map(|v| self.normalize(&v.to_string()))
                        .unwrap_or_default()
                } else if let Some(key) = token.strip_prefix("extra.") {
                    record
                        .extra
                        .get(key)
                        .map(|v| self.normalize(&v.to_string()))
                        .unwrap_or_default()
                } else {
                    return None;
                }
            }
        };
        Some(value)
    }

    /// Template with empty `%context%`/`%extra%` removed, along with the
    /// space in front of them
    fn effective_template(&self, context: &Option<String>, extra: &Option<String>) -> String {
        let mut template = self.format.clone();
        for (placeholder, value) in [("%context%", context), ("%extra%", extra)] {
            if value.is_none() {
                let spaced = format!(" {}", placeholder);
                template = if template.contains(&spaced) {
                    template.replace(&spaced, "")
                } else {
                    template.replace(placeholder, "")
                };
            }
        }
        template
    }
}

impl Formatter for LineFormatter {
    fn format(&self, record: &LogRecord) -> String {
        let context = self.dump(&self.remaining(&record.context, "context"));
        let extra = self.dump(&self.remaining(&record.extra, "extra"));
        let template = self.effective_template(&context, &extra);

        let mut output = String::with_capacity(template.len() + record.message.len());
        let mut rest = template.as_str();
        while let Some(start) = rest.find('%') {
            output.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            match after.find('%') {
                Some(end) => match self.resolve(&after[..end], record, &context, &extra) {
                    Some(value) => {
                        output.push_str(&value);
                        rest = &after[end + 1..];
                    }
                    None => {
                        output.push('%');
                        rest = after;
                    }
                },
                None => {
                    output.push('%');
                    rest = after;
                }
            }
        }
        output.push_str(rest);
        output
    }

    fn name(&self) -> &str {
        "line"
    }
}
