//! Timestamp formatting and timezone parsing
//!
//! Records are stamped in the logger's timezone, so every format here works
//! on `DateTime<FixedOffset>` and keeps the offset in its output. The offset
//! is resolved per record, so local time and named zones follow DST changes.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Local, Offset, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use rust_logger_factory::core::TimestampFormat;
/// use chrono::Utc;
///
/// let format = TimestampFormat::default();
/// let timestamp = format.format(&Utc::now().fixed_offset());
/// assert!(timestamp.ends_with("+00:00"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// RFC 3339 with microseconds: `2025-01-08T10:30:45.123456+02:00`
    #[default]
    Rfc3339Micros,

    /// RFC 3339 with seconds: `2025-01-08T10:30:45+02:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format, e.g. `%d/%b/%Y:%H:%M:%S %z`
    Custom(String),
}

impl TimestampFormat {
    /// `None` selects the default format, anything else is a strftime pattern
    #[must_use]
    pub fn from_pattern(pattern: Option<&str>) -> Self {
        match pattern {
            Some(pattern) => TimestampFormat::Custom(pattern.to_string()),
            None => TimestampFormat::default(),
        }
    }

    /// Like [`from_pattern`](Self::from_pattern) but rejects patterns with
    /// unknown `%` specifiers
    pub fn parse_pattern(pattern: &str) -> Result<Self> {
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err(LoggerError::invalid_config_with_hint(
                "date_format",
                "a strftime pattern",
                format!("got '{}'", pattern),
            ));
        }
        Ok(TimestampFormat::Custom(pattern.to_string()))
    }

    #[must_use]
    pub fn format(&self, datetime: &DateTime<FixedOffset>) -> String {
        match self {
            TimestampFormat::Rfc3339Micros => {
                datetime.format("%Y-%m-%dT%H:%M:%S%.6f%:z").to_string()
            }
            TimestampFormat::Rfc3339 => datetime.format("%Y-%m-%dT%H:%M:%S%:z").to_string(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => {
                let mut output = String::new();
                if write!(output, "{}", datetime.format(format_str)).is_err() {
                    return TimestampFormat::Rfc3339Micros.format(datetime);
                }
                output
            }
        }
    }
}

/// Timezone a logger stamps its records in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoggerTimezone {
    /// The system timezone, looked up for every record
    #[default]
    Local,
    Fixed(FixedOffset),
    /// An IANA zone such as `Europe/Paris`
    Named(Tz),
}

impl LoggerTimezone {
    /// Current time in this timezone
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.at(Utc::now())
    }

    /// `instant` converted to this timezone
    pub fn at(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            LoggerTimezone::Local => instant.with_timezone(&Local).fixed_offset(),
            LoggerTimezone::Fixed(offset) => instant.with_timezone(offset),
            LoggerTimezone::Named(tz) => instant.with_timezone(tz).fixed_offset(),
        }
    }
}

impl From<FixedOffset> for LoggerTimezone {
    fn from(offset: FixedOffset) -> Self {
        LoggerTimezone::Fixed(offset)
    }
}

impl From<Tz> for LoggerTimezone {
    fn from(tz: Tz) -> Self {
        LoggerTimezone::Named(tz)
    }
}

/// Parse a timezone given as `UTC`, `Z`, `local`, a fixed offset
/// (`+02:00`, `-0530`, `+09`) or an IANA name (`Europe/Paris`)
pub fn parse_timezone(value: &str) -> Result<LoggerTimezone> {
    let value = value.trim();
    match value.to_ascii_lowercase().as_str() {
        "utc" | "z" | "gmt" => return Ok(LoggerTimezone::Fixed(Utc.fix())),
        "local" => return Ok(LoggerTimezone::Local),
        _ => {}
    }

    if let Some(offset) = parse_offset(value) {
        return Ok(LoggerTimezone::Fixed(offset));
    }
    value
        .parse::<Tz>()
        .map(LoggerTimezone::Named)
        .map_err(|_| {
            LoggerError::invalid_config_with_hint(
                "timezone",
                "UTC, local, a fixed offset like +02:00 or an IANA zone name",
                format!("got '{}'", value),
            )
        })
}

fn parse_offset(value: &str) -> Option<FixedOffset> {
    let (sign, rest) = match value.as_bytes().first()? {
        b'+' => (1, &value[1..]),
        b'-' => (-1, &value[1..]),
        _ => return None,
    };
    if !rest.is_ascii() {
        return None;
    }

    let (hours, minutes) = match rest.len() {
        2 => (rest, "00"),
        4 => (&rest[..2], &rest[2..]),
        5 if rest.as_bytes()[2] == b':' => (&rest[..2], &rest[3..]),
        _ => return None,
    };
    if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<FixedOffset> {
        let offset = FixedOffset::east_opt(2 * 3600).expect("valid offset");
        offset
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_default_format() {
        let result = TimestampFormat::default().format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45.123456+02:00");
    }

    #[test]
    fn test_rfc3339_format() {
        let result = TimestampFormat::Rfc3339.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45+02:00");
    }

    #[test]
    fn test_unix_formats() {
        let secs: i64 = TimestampFormat::Unix
            .format(&fixed_datetime())
            .parse()
            .expect("valid unix timestamp");
        let millis: i64 = TimestampFormat::UnixMillis
            .format(&fixed_datetime())
            .parse()
            .expect("valid unix millis timestamp");
        assert_eq!(secs * 1000 + 123, millis);
    }

    #[test]
    fn test_custom_format() {
        let format = TimestampFormat::from_pattern(Some("%Y/%m/%d %H:%M"));
        assert_eq!(format.format(&fixed_datetime()), "2025/01/08 10:30");
        assert_eq!(TimestampFormat::from_pattern(None), TimestampFormat::default());
    }

    #[test]
    fn test_invalid_custom_pattern() {
        assert!(TimestampFormat::parse_pattern("%Y-%m-%d").is_ok());
        let err = TimestampFormat::parse_pattern("%Y-%Q").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfig { ref field, .. } if field == "date_format"));

        // Unchecked patterns fall back instead of panicking
        let format = TimestampFormat::from_pattern(Some("%Q"));
        assert_eq!(format.format(&fixed_datetime()), "2025-01-08T10:30:45.123456+02:00");
    }

    #[test]
    fn test_parse_timezone() {
        let fixed = |value: &str| match parse_timezone(value).unwrap() {
            LoggerTimezone::Fixed(offset) => offset.local_minus_utc(),
            other => panic!("expected a fixed offset, got {other:?}"),
        };
        assert_eq!(fixed("UTC"), 0);
        assert_eq!(fixed("+02:00"), 7200);
        assert_eq!(fixed("-0530"), -19800);
        assert_eq!(fixed("+09"), 32400);
        assert_eq!(parse_timezone("local").unwrap(), LoggerTimezone::Local);
    }

    #[test]
    fn test_parse_named_timezone() {
        assert_eq!(
            parse_timezone("Europe/Paris").unwrap(),
            LoggerTimezone::Named(chrono_tz::Europe::Paris)
        );
    }

    #[test]
    fn test_parse_timezone_rejects_unknown() {
        let err = parse_timezone("Mars/Olympus").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfig { ref field, .. } if field == "timezone"));
        assert!(parse_timezone("+25:00").is_err());
        assert!(parse_timezone("+2:0").is_err());
    }

    #[test]
    fn test_named_timezone_follows_dst() {
        let paris = LoggerTimezone::Named(chrono_tz::Europe::Paris);
        let winter = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
        let summer = Utc.with_ymd_and_hms(2025, 7, 15, 12, 0, 0).unwrap();

        assert_eq!(paris.at(winter).offset().local_minus_utc(), 3600);
        assert_eq!(paris.at(summer).offset().local_minus_utc(), 7200);
        assert_eq!(paris.at(summer).format("%H:%M").to_string(), "14:00");
    }

    #[test]
    fn test_local_resolves_per_instant() {
        let winter = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
        let summer = Utc.with_ymd_and_hms(2025, 7, 15, 12, 0, 0).unwrap();

        for instant in [winter, summer] {
            let expected = instant.with_timezone(&Local).offset().fix();
            assert_eq!(*LoggerTimezone::Local.at(instant).offset(), expected);
        }
        assert_eq!(LoggerTimezone::default(), LoggerTimezone::Local);
    }
}
