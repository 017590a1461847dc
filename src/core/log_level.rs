//! Log level definitions
//!
//! Levels carry the numeric severity codes used in configuration files
//! (`100` debug through `600` emergency).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[repr(u16)]
pub enum LogLevel {
    #[default]
    Debug = 100,
    Info = 200,
    Notice = 250,
    Warning = 300,
    Error = 400,
    Critical = 500,
    Alert = 550,
    Emergency = 600,
}

impl LogLevel {
    pub const ALL: [LogLevel; 8] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Notice,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Critical,
        LogLevel::Alert,
        LogLevel::Emergency,
    ];

    /// Numeric severity code
    #[inline]
    pub fn code(&self) -> u16 {
        *self as u16
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Notice => "NOTICE",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
            LogLevel::Alert => "ALERT",
            LogLevel::Emergency => "EMERGENCY",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl TryFrom<u16> for LogLevel {
    type Error = String;

    fn try_from(code: u16) -> Result<Self, String> {
        LogLevel::ALL
            .iter()
            .copied()
            .find(|level| level.code() == code)
            .ok_or_else(|| format!("Invalid log level code: {}", code))
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(code) = s.trim().parse::<u16>() {
            return LogLevel::try_from(code);
        }

        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "NOTICE" => Ok(LogLevel::Notice),
            "WARNING" | "WARN" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            "CRITICAL" => Ok(LogLevel::Critical),
            "ALERT" => Ok(LogLevel::Alert),
            "EMERGENCY" => Ok(LogLevel::Emergency),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(LogLevel::Debug.code(), 100);
        assert_eq!(LogLevel::Notice.code(), 250);
        assert_eq!(LogLevel::Alert.code(), 550);
        assert_eq!(LogLevel::Emergency.code(), 600);
    }

    #[test]
    fn test_try_from_code() {
        assert_eq!(LogLevel::try_from(200), Ok(LogLevel::Info));
        assert!(LogLevel::try_from(201).is_err());
    }

    #[test]
    fn test_parse_names_and_codes() {
        assert_eq!("warn".parse::<LogLevel>(), Ok(LogLevel::Warning));
        assert_eq!("Critical".parse::<LogLevel>(), Ok(LogLevel::Critical));
        assert_eq!("400".parse::<LogLevel>(), Ok(LogLevel::Error));
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_ordering_follows_code() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Critical < LogLevel::Alert);
    }
}
