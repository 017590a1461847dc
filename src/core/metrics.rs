//! Logger metrics
//!
//! Counters for records a logger dispatched, records no handler accepted,
//! and handler failures.

use std::sync::atomic::{AtomicU64, Ordering};

/// Dispatch counters for a single logger
///
/// # Example
///
/// ```
/// use rust_logger_factory::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_handled();
/// metrics.record_unhandled();
///
/// assert_eq!(metrics.handled_count(), 1);
/// assert_eq!(metrics.unhandled_count(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records taken by at least one handler
    handled_count: AtomicU64,

    /// Records no handler was interested in
    unhandled_count: AtomicU64,

    /// Errors returned by handlers
    handler_failures: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            handled_count: AtomicU64::new(0),
            unhandled_count: AtomicU64::new(0),
            handler_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn handled_count(&self) -> u64 {
        self.handled_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn unhandled_count(&self) -> u64 {
        self.unhandled_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn handler_failures(&self) -> u64 {
        self.handler_failures.load(Ordering::Relaxed)
    }

    /// Returns the previous value
    #[inline]
    pub fn record_handled(&self) -> u64 {
        self.handled_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_unhandled(&self) -> u64 {
        self.unhandled_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_handler_failure(&self) -> u64 {
        self.handler_failures.fetch_add(1, Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.handled_count.store(0, Ordering::Relaxed);
        self.unhandled_count.store(0, Ordering::Relaxed);
        self.handler_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            handled_count: AtomicU64::new(self.handled_count()),
            unhandled_count: AtomicU64::new(self.unhandled_count()),
            handler_failures: AtomicU64::new(self.handler_failures()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.handled_count(), 0);
        assert_eq!(metrics.unhandled_count(), 0);
        assert_eq!(metrics.handler_failures(), 0);
    }

    #[test]
    fn test_record_returns_previous() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_handled(), 0);
        assert_eq!(metrics.record_handled(), 1);
        assert_eq!(metrics.handled_count(), 2);
    }

    #[test]
    fn test_metrics_reset() {
        let metrics = LoggerMetrics::new();
        metrics.record_handled();
        metrics.record_handler_failure();
        metrics.reset();
        assert_eq!(metrics.handled_count(), 0);
        assert_eq!(metrics.handler_failures(), 0);
    }

    #[test]
    fn test_metrics_clone_is_snapshot() {
        let metrics = LoggerMetrics::new();
        metrics.record_unhandled();

        let snapshot = metrics.clone();
        metrics.record_unhandled();

        assert_eq!(metrics.unhandled_count(), 2);
        assert_eq!(snapshot.unhandled_count(), 1);
    }
}
