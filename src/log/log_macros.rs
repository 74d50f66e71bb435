//! Variadic leveled logging macros for [`Log`](crate::log::logger::Log).
//!
//! Every argument after the log is an expression implementing `Display`; the
//! values are handed to the sink in order, without being formatted together.
//!
//! ```
//! use rustyrtc_log::{log::logger::Log, log_info};
//!
//! let log = Log::new(Some("ice"), Some("IceAgent"), None)?;
//! let pairs = 4;
//! log_info!(log, "checking", pairs, "candidate pairs");
//! # Ok::<(), rustyrtc_log::log::log_error::LogError>(())
//! ```

// ============================================================================
// 1. GENERIC MACRO
// ============================================================================

/// Logs at an arbitrary rank. Expands to the `Result` of [`Log::log`](crate::log::logger::Log::log).
#[macro_export]
macro_rules! log_at {
    ($log:expr, $rank:expr $(, $value:expr)* $(,)?) => {
        $log.log($rank, &[$(&$value as &dyn ::std::fmt::Display),*])
    };
}

// ============================================================================
// 2. LEVEL-SPECIFIC MACROS
// ============================================================================

#[macro_export]
macro_rules! log_debug {
    ($log:expr $(, $value:expr)* $(,)?) => {
        $log.debug(&[$(&$value as &dyn ::std::fmt::Display),*])
    };
}

#[macro_export]
macro_rules! log_info {
    ($log:expr $(, $value:expr)* $(,)?) => {
        $log.info(&[$(&$value as &dyn ::std::fmt::Display),*])
    };
}

#[macro_export]
macro_rules! log_warn {
    ($log:expr $(, $value:expr)* $(,)?) => {
        $log.warn(&[$(&$value as &dyn ::std::fmt::Display),*])
    };
}

#[macro_export]
macro_rules! log_error {
    ($log:expr $(, $value:expr)* $(,)?) => {
        $log.error(&[$(&$value as &dyn ::std::fmt::Display),*])
    };
}
