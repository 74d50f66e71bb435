use std::{
    fmt::{self, Write as _},
    io::{self, Write},
    sync::{Mutex, PoisonError},
};

use crate::log::log_level::LogLevel;

/// Destination for formatted log entries of one severity level.
///
/// `values` is the full sequence handed over by the logger: the timestamp date
/// and time parts, the separator, the level name, `in`, `<component>:` and then
/// every message value in call order.
pub trait LogSink: Send + Sync {
    fn emit(&self, level: LogLevel, values: &[&dyn fmt::Display]);
}

/// Renders a value sequence as `<date>|<time> | <LEVEL> in <name>: <message...>`.
///
/// The first two values are joined with `|`, everything after with single spaces.
#[must_use]
pub fn render_line(values: &[&dyn fmt::Display]) -> String {
    let mut line = String::new();
    for (i, value) in values.iter().enumerate() {
        match i {
            0 => {}
            1 => line.push('|'),
            _ => line.push(' '),
        }
        let _ = write!(line, "{value}");
    }
    line
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Writes one rendered line per entry to stdout or stderr.
#[derive(Debug, Clone)]
pub struct ConsoleSink {
    stream: Stream,
}

impl ConsoleSink {
    #[must_use]
    pub const fn stdout() -> Self {
        Self {
            stream: Stream::Stdout,
        }
    }

    #[must_use]
    pub const fn stderr() -> Self {
        Self {
            stream: Stream::Stderr,
        }
    }

    #[must_use]
    pub const fn stream(&self) -> Stream {
        self.stream
    }
}

impl LogSink for ConsoleSink {
    fn emit(&self, _level: LogLevel, values: &[&dyn fmt::Display]) {
        let line = render_line(values);
        // A closed console must never take the caller down.
        let _ = match self.stream {
            Stream::Stdout => writeln!(io::stdout().lock(), "{line}"),
            Stream::Stderr => writeln!(io::stderr().lock(), "{line}"),
        };
    }
}

/// Forwards entries to whatever `log` backend the host application installed.
#[derive(Debug, Clone)]
pub struct FacadeSink {
    target: &'static str,
}

impl FacadeSink {
    #[must_use]
    pub const fn new(target: &'static str) -> Self {
        Self { target }
    }
}

impl Default for FacadeSink {
    fn default() -> Self {
        Self::new(env!("CARGO_CRATE_NAME"))
    }
}

impl LogSink for FacadeSink {
    fn emit(&self, level: LogLevel, values: &[&dyn fmt::Display]) {
        let lvl = match level {
            LogLevel::Debug => ::log::Level::Debug,
            LogLevel::Info => ::log::Level::Info,
            LogLevel::Warn => ::log::Level::Warn,
            LogLevel::Error => ::log::Level::Error,
            LogLevel::Off => return,
        };
        ::log::log!(target: self.target, lvl, "{}", render_line(values));
    }
}

/// Keeps every emitted entry in memory, e.g. to feed a UI log pane.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<(LogLevel, Vec<String>)>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Each entry as its level and the individually stringified values.
    #[must_use]
    pub fn entries(&self) -> Vec<(LogLevel, Vec<String>)> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Each entry rendered with [`render_line`].
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.entries()
            .iter()
            .map(|(_, values)| {
                let refs: Vec<&dyn fmt::Display> =
                    values.iter().map(|v| v as &dyn fmt::Display).collect();
                render_line(&refs)
            })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl LogSink for MemorySink {
    fn emit(&self, level: LogLevel, values: &[&dyn fmt::Display]) {
        let values = values.iter().map(ToString::to_string).collect();
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, values));
    }
}
