use std::io;

use thiserror::Error;

use crate::log::log_level::LogLevel;

/// Errors raised while building or driving a [`Log`](crate::log::logger::Log).
///
/// Every variant is a caller contract violation of the invalid-argument kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogError {
    #[error("component is required")]
    MissingComponent,

    #[error("Invalid log level name \"{name}\". Valid levels are: {valid}", valid = LogLevel::valid_names())]
    InvalidLevelName { name: String },

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(i64),

    #[error("{0}")]
    InvalidArgument(String),
}

/// Errors that can be rebuilt with a different message while keeping their kind.
///
/// Used by [`Log::throw_error`](crate::log::logger::Log::throw_error). Types that
/// cannot be rewritten keep the default, which returns `None`.
pub trait WithMessage: Sized {
    fn with_message(&self, _message: &str) -> Option<Self> {
        None
    }
}

impl WithMessage for LogError {
    fn with_message(&self, message: &str) -> Option<Self> {
        Some(LogError::InvalidArgument(message.to_string()))
    }
}

impl WithMessage for io::Error {
    fn with_message(&self, message: &str) -> Option<Self> {
        Some(io::Error::new(self.kind(), message.to_string()))
    }
}
