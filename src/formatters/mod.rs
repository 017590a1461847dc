//! Formatter implementations

pub mod line;

pub use line::{LineFormatter, SIMPLE_FORMAT};

pub use crate::core::Formatter;
