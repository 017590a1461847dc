//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. Each expands to a
//! call on the logger and evaluates to its `bool` result.
//!
//! # Examples
//!
//! ```
//! use rust_logger_factory::prelude::*;
//! use rust_logger_factory::{info, warning};
//! use std::sync::Arc;
//!
//! let logger = Logger::builder("app")
//!     .handler(Arc::new(NullHandler::new(LogLevel::Debug)))
//!     .build();
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! warning!(logger, "{} connections pending", 12);
//! ```

/// Log a message at an explicit level with automatic formatting.
///
/// # Examples
///
/// ```
/// # use rust_logger_factory::prelude::*;
/// # let logger = Logger::new("app", Vec::new(), Vec::new(), None);
/// use rust_logger_factory::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a notice-level message: normal but significant events.
#[macro_export]
macro_rules! notice {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Notice, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_logger_factory::prelude::*;
/// # let logger = Logger::new("app", Vec::new(), Vec::new(), None);
/// use rust_logger_factory::warning;
/// warning!(logger, "Low disk space");
/// warning!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}

/// Log an alert-level message: action must be taken immediately.
#[macro_export]
macro_rules! alert {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Alert, $($arg)+)
    };
}

/// Log an emergency-level message: the system is unusable.
#[macro_export]
macro_rules! emergency {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Emergency, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogLevel, LogRecord, Logger, processor};
    use crate::handlers::NullHandler;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn capturing_logger(level: LogLevel) -> (Logger, Arc<Mutex<Vec<(LogLevel, String)>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let logger = Logger::builder("macros")
            .processor(processor(move |r: LogRecord| {
                sink.lock().push((r.level, r.message.clone()));
                r
            }))
            .handler(Arc::new(NullHandler::new(level)))
            .build();
        (logger, seen)
    }

    #[test]
    fn test_log_macro() {
        let (logger, seen) = capturing_logger(LogLevel::Debug);
        assert!(log!(logger, LogLevel::Info, "Test message"));
        assert!(log!(logger, LogLevel::Info, "Formatted: {}", 42));
        assert_eq!(seen.lock()[1].1, "Formatted: 42");
    }

    #[test]
    fn test_level_macros() {
        let (logger, seen) = capturing_logger(LogLevel::Debug);
        debug!(logger, "d");
        info!(logger, "i {}", 1);
        notice!(logger, "n");
        warning!(logger, "w");
        error!(logger, "e");
        critical!(logger, "c");
        alert!(logger, "a");
        emergency!(logger, "em {}", "x");

        let levels: Vec<LogLevel> = seen.lock().iter().map(|(level, _)| *level).collect();
        assert_eq!(levels, LogLevel::ALL.to_vec());
        assert_eq!(seen.lock()[7].1, "em x");
    }

    #[test]
    fn test_macro_below_handler_level() {
        let (logger, seen) = capturing_logger(LogLevel::Error);
        assert!(!debug!(logger, "dropped"));
        assert!(seen.lock().is_empty());
    }
}
