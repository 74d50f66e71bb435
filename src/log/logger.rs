use std::{fmt, sync::Arc};

use chrono::{DateTime, Utc};

use crate::log::{
    level_table::LevelTable,
    log_error::{LogError, WithMessage},
    log_level::{DEFAULT_LOG_LEVEL, LevelSpec, LogLevel},
    sink_table::{LevelDescriptor, SinkTable},
};

/// Separator placed between the timestamp and the level name.
const SEPARATOR: &str = "|";

/// Number of values the logger puts in front of every message.
const PREFIX_LEN: usize = 6;

/// A named logging channel for one component.
///
/// A `Log` resolves its level on every call from a [`LevelTable`] shared with
/// every `Log` derived from the same root, so [`set_levels`](Self::set_levels)
/// on any of them is seen by all of them immediately.
///
/// # Examples
/// ```
/// use rustyrtc_log::log::{level_table::LevelTable, logger::Log};
///
/// let levels = LevelTable::from_entries([("media", "WARN")])?;
/// let log = Log::builder()
///     .module_name("media")
///     .component(&"MediaAgent")
///     .levels(levels)
///     .build()?;
///
/// let child = log.create_child(Some("media"), &"Encoder");
/// log.set_levels([("media", "ERROR")])?;
/// assert_eq!(child.current_level(), 3);
/// # Ok::<(), rustyrtc_log::log::log_error::LogError>(())
/// ```
#[derive(Clone)]
pub struct Log {
    module_name: Option<String>,
    name: String,
    levels: LevelTable,
    sinks: Arc<SinkTable>,
    default_level: LevelSpec,
}

impl fmt::Debug for Log {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Log")
            .field("module_name", &self.module_name)
            .field("name", &self.name)
            .field("levels", &self.levels)
            .field("default_level", &self.default_level)
            .finish_non_exhaustive()
    }
}

/// Collects the pieces of a root [`Log`]. Obtained from [`Log::builder`].
#[derive(Clone)]
pub struct LogBuilder {
    module_name: Option<String>,
    component: Option<String>,
    levels: Option<LevelTable>,
    sinks: Option<Arc<SinkTable>>,
    default_level: LevelSpec,
}

impl Default for LogBuilder {
    fn default() -> Self {
        Self {
            module_name: None,
            component: None,
            levels: None,
            sinks: None,
            default_level: LevelSpec::Named(DEFAULT_LOG_LEVEL),
        }
    }
}

impl LogBuilder {
    /// Key looked up in the level table. An empty name counts as no name.
    #[must_use]
    pub fn module_name(mut self, module_name: &str) -> Self {
        self.module_name = Some(module_name.to_string()).filter(|m| !m.is_empty());
        self
    }

    /// The component this channel logs for. Its `Display` output is captured now.
    #[must_use]
    pub fn component<C: fmt::Display + ?Sized>(mut self, component: &C) -> Self {
        self.component = Some(component.to_string());
        self
    }

    /// Shares `levels` with the new root instead of starting from an empty table.
    #[must_use]
    pub fn levels(mut self, levels: LevelTable) -> Self {
        self.levels = Some(levels);
        self
    }

    #[must_use]
    pub fn sinks(mut self, sinks: impl Into<Arc<SinkTable>>) -> Self {
        self.sinks = Some(sinks.into());
        self
    }

    /// Level used when the module has no entry in the table.
    #[must_use]
    pub fn default_level(mut self, level: impl Into<LevelSpec>) -> Self {
        self.default_level = level.into();
        self
    }

    /// # Errors
    /// Returns [`LogError::MissingComponent`] if no component was given.
    pub fn build(self) -> Result<Log, LogError> {
        let name = self.component.ok_or(LogError::MissingComponent)?;
        Ok(Log {
            module_name: self.module_name,
            name,
            levels: self.levels.unwrap_or_default(),
            sinks: self.sinks.unwrap_or_else(SinkTable::global),
            default_level: self.default_level,
        })
    }
}

impl Log {
    #[must_use]
    pub fn builder() -> LogBuilder {
        LogBuilder::default()
    }

    /// Creates a root log on the process-wide sinks.
    ///
    /// `levels` is shared as-is; `None` starts an empty table.
    ///
    /// # Errors
    /// Returns [`LogError::MissingComponent`] when `component` is `None`.
    pub fn new<C: fmt::Display + ?Sized>(
        module_name: Option<&str>,
        component: Option<&C>,
        levels: Option<LevelTable>,
    ) -> Result<Self, LogError> {
        let mut builder = Self::builder();
        if let Some(module_name) = module_name {
            builder = builder.module_name(module_name);
        }
        if let Some(component) = component {
            builder = builder.component(component);
        }
        if let Some(levels) = levels {
            builder = builder.levels(levels);
        }
        builder.build()
    }

    /// Derives a log for another component that shares this log's level table,
    /// sinks and default level. `self` is left untouched.
    #[must_use]
    pub fn create_child<C: fmt::Display + ?Sized>(
        &self,
        module_name: Option<&str>,
        component: &C,
    ) -> Log {
        Log {
            module_name: module_name.filter(|m| !m.is_empty()).map(str::to_string),
            name: component.to_string(),
            levels: self.levels.clone(),
            sinks: self.sinks.clone(),
            default_level: self.default_level,
        }
    }

    /// Validates `levels` and merges them into the shared table.
    ///
    /// # Errors
    /// Returns [`LogError::InvalidLevelName`] and leaves the table untouched if
    /// any value is invalid.
    pub fn set_levels<I, K, V>(&self, levels: I) -> Result<&Self, LogError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        self.levels.merge(levels)?;
        Ok(self)
    }

    /// Emits `message` at `rank` if the current level lets it through.
    ///
    /// # Errors
    /// Returns [`LogError::InvalidLogLevel`] if `rank` is not the rank of a
    /// [`LogLevel`]. Suppressed messages are not an error.
    pub fn log(&self, rank: i64, message: &[&dyn fmt::Display]) -> Result<&Self, LogError> {
        let descriptor = self
            .sinks
            .descriptor(rank)
            .ok_or(LogError::InvalidLogLevel(rank))?;
        self.dispatch(descriptor, message);
        Ok(self)
    }

    pub fn debug(&self, message: &[&dyn fmt::Display]) -> &Self {
        self.log_at(LogLevel::Debug, message)
    }

    pub fn info(&self, message: &[&dyn fmt::Display]) -> &Self {
        self.log_at(LogLevel::Info, message)
    }

    pub fn warn(&self, message: &[&dyn fmt::Display]) -> &Self {
        self.log_at(LogLevel::Warn, message)
    }

    pub fn error(&self, message: &[&dyn fmt::Display]) -> &Self {
        self.log_at(LogLevel::Error, message)
    }

    /// Logs `error` once at ERROR and hands it back for the caller to return.
    ///
    /// With a `custom_message`, errors implementing [`WithMessage::with_message`]
    /// are rebuilt with that message first; others are passed through unchanged.
    ///
    /// ```
    /// use rustyrtc_log::log::{log_error::LogError, logger::Log};
    ///
    /// fn open(log: &Log) -> Result<(), LogError> {
    ///     Err(log.throw_error(LogError::MissingComponent, Some("no camera")))
    /// }
    /// ```
    #[must_use = "the error must be propagated"]
    pub fn throw_error<E>(&self, error: E, custom_message: Option<&str>) -> E
    where
        E: WithMessage + fmt::Display,
    {
        let error = custom_message
            .and_then(|message| error.with_message(message))
            .unwrap_or(error);
        self.error(&[&error]);
        error
    }

    /// Rank currently in effect: the table entry for this module, or the default.
    #[must_use]
    pub fn current_level(&self) -> i64 {
        self.module_name
            .as_deref()
            .and_then(|module| self.levels.get(module))
            .unwrap_or(self.default_level)
            .rank()
    }

    /// [`current_level`](Self::current_level) as a [`LogLevel`], if it is a known rank.
    #[must_use]
    pub fn effective_level(&self) -> Option<LogLevel> {
        LogLevel::from_rank(self.current_level())
    }

    #[must_use]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.current_level() <= level.rank()
    }

    /// Component name printed in every line.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn module_name(&self) -> Option<&str> {
        self.module_name.as_deref()
    }

    #[must_use]
    pub fn level_table(&self) -> &LevelTable {
        &self.levels
    }

    fn log_at(&self, level: LogLevel, message: &[&dyn fmt::Display]) -> &Self {
        if let Some(descriptor) = self.sinks.descriptor(level.rank()) {
            self.dispatch(descriptor, message);
        }
        self
    }

    fn dispatch(&self, descriptor: &LevelDescriptor, message: &[&dyn fmt::Display]) {
        let level = descriptor.level;
        if self.current_level() > level.rank() {
            return;
        }

        let (date, time) = timestamp_parts(Utc::now());
        let label = format!("{}:", self.name);

        let mut values: Vec<&dyn fmt::Display> = Vec::with_capacity(PREFIX_LEN + message.len());
        values.extend([
            &date as &dyn fmt::Display,
            &time,
            &SEPARATOR,
            &level,
            &"in",
            &label,
        ]);
        values.extend_from_slice(message);
        descriptor.sink.emit(level, &values);
    }
}

/// Splits an instant into its ISO-8601 date and time parts.
fn timestamp_parts(now: DateTime<Utc>) -> (String, String) {
    (
        now.format("%Y-%m-%d").to_string(),
        now.format("%H:%M:%S%.3fZ").to_string(),
    )
}
