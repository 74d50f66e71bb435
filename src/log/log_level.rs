use std::{fmt, str::FromStr};

use crate::log::log_error::LogError;

/// Defines the severity levels for log messages.
///
/// Levels are totally ordered by their rank: a lower rank is more verbose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Designates fine-grained informational events that are most useful to debug an application.
    Debug = 0,
    /// Designates informational messages that highlight the progress of the application at coarse-grained level.
    Info = 1,
    /// Designates potentially harmful situations.
    Warn = 2,
    /// Designates error events that might still allow the application to continue running.
    Error = 3,
    /// Disables output entirely. Messages are never emitted at this level.
    Off = 4,
}

/// Level used for a module that has no entry in its level table.
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

impl LogLevel {
    /// Every level, in rank order.
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Off,
    ];

    #[must_use]
    pub const fn rank(self) -> i64 {
        self as i64
    }

    /// Uppercase name printed in log lines and accepted in level tables.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Off => "OFF",
        }
    }

    #[must_use]
    pub fn from_rank(rank: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.rank() == rank)
    }

    /// Case-insensitive lookup of a symbolic level name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|l| l.name().eq_ignore_ascii_case(name))
    }

    /// Comma-separated list of the valid names, in rank order.
    #[must_use]
    pub fn valid_names() -> String {
        Self::ALL.map(LogLevel::name).join(", ")
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl AsRef<str> for LogLevel {
    fn as_ref(&self) -> &str {
        self.name()
    }
}

impl FromStr for LogLevel {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| LogError::InvalidLevelName {
            name: s.to_string(),
        })
    }
}

/// A validated entry of a level table.
///
/// Symbolic names are checked against [`LogLevel::ALL`]. Numeric ranks are kept
/// as-is without a range check; an unknown rank is only rejected when a message
/// is dispatched with it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelSpec {
    Named(LogLevel),
    Rank(i64),
}

impl LevelSpec {
    /// Validates a raw table value (`"warn"`, `"WARN"`, `"2"`, `"99"`...).
    ///
    /// # Errors
    /// Returns [`LogError::InvalidLevelName`] when the value is neither numeric nor
    /// a known level name.
    pub fn parse(value: &str) -> Result<Self, LogError> {
        if let Some(rank) = parse_rank(value) {
            return Ok(LevelSpec::Rank(rank));
        }
        value.parse::<LogLevel>().map(LevelSpec::Named)
    }

    #[must_use]
    pub const fn rank(self) -> i64 {
        match self {
            LevelSpec::Named(level) => level.rank(),
            LevelSpec::Rank(rank) => rank,
        }
    }
}

impl From<LogLevel> for LevelSpec {
    fn from(level: LogLevel) -> Self {
        LevelSpec::Named(level)
    }
}

impl fmt::Display for LevelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelSpec::Named(level) => write!(f, "{level}"),
            LevelSpec::Rank(rank) => write!(f, "{rank}"),
        }
    }
}

/// Resolves a level name or numeric rank to its rank.
///
/// Numeric input is returned unchanged, even outside the known range.
///
/// # Errors
/// Returns [`LogError::InvalidLevelName`] for an unrecognized name.
pub fn get_level_by_name(name: &str) -> Result<i64, LogError> {
    LevelSpec::parse(name).map(LevelSpec::rank)
}

/// Leading integer part of a numeric value: `"2.5"` → 2, `"1e1"` → 1.
///
/// The value counts as numeric when it parses as a finite float. Ranks beyond
/// `i64` saturate.
fn parse_rank(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if !trimmed.parse::<f64>().is_ok_and(f64::is_finite) {
        return None;
    }

    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut rank: Option<i64> = None;
    for digit in unsigned.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(digit - b'0');
        let acc = rank.unwrap_or(0).saturating_mul(10);
        rank = Some(if negative {
            acc.saturating_sub(digit)
        } else {
            acc.saturating_add(digit)
        });
    }
    rank
}
