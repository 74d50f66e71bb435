use std::fmt;

use crate::log::{log_level::LogLevel, log_sink::LogSink};

/// Sink bound to [`LogLevel::Off`]: drops everything.
#[derive(Debug, Clone, Default)]
pub struct NoopLogSink;

impl LogSink for NoopLogSink {
    #[inline]
    fn emit(&self, _level: LogLevel, _values: &[&dyn fmt::Display]) {}
}
