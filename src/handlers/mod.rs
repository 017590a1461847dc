//! Handler implementations

pub mod error_log;
pub mod null;
pub mod stream;

pub use error_log::{ErrorLogHandler, ErrorLogMessageType, ERROR_LOG_FORMAT};
pub use null::NullHandler;
pub use stream::{StreamHandler, StreamTarget};

pub use crate::core::{Handler, HandlerCore};
