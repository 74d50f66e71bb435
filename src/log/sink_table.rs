use std::sync::{Arc, OnceLock};

use crate::log::{
    log_level::LogLevel,
    log_sink::{ConsoleSink, LogSink},
    noop_log_sink::NoopLogSink,
};

/// One row of the level table: a level and the sink its messages go to.
#[derive(Clone)]
pub struct LevelDescriptor {
    pub level: LogLevel,
    pub sink: Arc<dyn LogSink>,
}

/// Fixed, rank-ordered mapping from every [`LogLevel`] to its output sink.
///
/// `OFF` is always bound to [`NoopLogSink`]. A table never changes once built;
/// every `Log` derived from the same root shares it.
#[derive(Clone)]
pub struct SinkTable {
    descriptors: [LevelDescriptor; 5],
}

impl LevelDescriptor {
    #[must_use]
    pub fn new(level: LogLevel, sink: Arc<dyn LogSink>) -> Self {
        Self { level, sink }
    }
}

static GLOBAL_SINKS: OnceLock<Arc<SinkTable>> = OnceLock::new();

impl SinkTable {
    #[must_use]
    pub fn new(
        debug: Arc<dyn LogSink>,
        info: Arc<dyn LogSink>,
        warn: Arc<dyn LogSink>,
        error: Arc<dyn LogSink>,
    ) -> Self {
        let off: Arc<dyn LogSink> = Arc::new(NoopLogSink);
        Self {
            descriptors: [
                LevelDescriptor::new(LogLevel::Debug, debug),
                LevelDescriptor::new(LogLevel::Info, info),
                LevelDescriptor::new(LogLevel::Warn, warn),
                LevelDescriptor::new(LogLevel::Error, error),
                LevelDescriptor::new(LogLevel::Off, off),
            ],
        }
    }

    /// Same sink for every level except `OFF`.
    #[must_use]
    pub fn uniform(sink: Arc<dyn LogSink>) -> Self {
        Self::new(sink.clone(), sink.clone(), sink.clone(), sink)
    }

    /// DEBUG and INFO on stdout, WARN and ERROR on stderr, one sink per level.
    #[must_use]
    pub fn console() -> Self {
        Self::new(
            Arc::new(ConsoleSink::stdout()),
            Arc::new(ConsoleSink::stdout()),
            Arc::new(ConsoleSink::stderr()),
            Arc::new(ConsoleSink::stderr()),
        )
    }

    /// Looks up the descriptor for a rank; `None` for unknown ranks.
    #[must_use]
    pub fn descriptor(&self, rank: i64) -> Option<&LevelDescriptor> {
        self.descriptors.iter().find(|d| d.level.rank() == rank)
    }

    /// Installs the process-wide table used by roots built without explicit sinks.
    ///
    /// Only the first call wins; later calls hand the rejected table back.
    ///
    /// # Errors
    /// Returns the table unchanged if a global table was already installed or
    /// already read by [`SinkTable::global`].
    pub fn install_global(table: SinkTable) -> Result<(), SinkTable> {
        GLOBAL_SINKS
            .set(Arc::new(table))
            .map_err(Arc::unwrap_or_clone)
    }

    /// The process-wide table, defaulting to [`SinkTable::console`].
    #[must_use]
    pub fn global() -> Arc<SinkTable> {
        GLOBAL_SINKS
            .get_or_init(|| Arc::new(SinkTable::console()))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::log::log_sink::MemorySink;

    #[test]
    fn descriptors_are_rank_ordered() {
        let table = SinkTable::console();
        for level in LogLevel::ALL {
            assert_eq!(table.descriptor(level.rank()).unwrap().level, level);
        }
        assert!(table.descriptor(5).is_none());
        assert!(table.descriptor(99).is_none());
        assert!(table.descriptor(-1).is_none());
    }

    #[test]
    fn console_levels_have_distinct_sinks() {
        let table = SinkTable::console();
        let sinks: Vec<&Arc<dyn LogSink>> = LogLevel::ALL
            .iter()
            .map(|l| &table.descriptor(l.rank()).unwrap().sink)
            .collect();
        for (i, a) in sinks.iter().enumerate() {
            for b in &sinks[i + 1..] {
                assert!(!Arc::ptr_eq(a, b));
            }
        }
    }

    #[test]
    fn off_never_reaches_user_sink() {
        let mem = Arc::new(MemorySink::new());
        let table = SinkTable::uniform(mem.clone());

        let off = table.descriptor(LogLevel::Off.rank()).unwrap();
        off.sink.emit(LogLevel::Off, &[&"dropped"]);
        assert!(mem.is_empty());

        let warn = table.descriptor(LogLevel::Warn.rank()).unwrap();
        warn.sink.emit(LogLevel::Warn, &[&"kept"]);
        assert_eq!(mem.len(), 1);
    }

    #[test]
    fn global_is_installed_once() {
        let first = SinkTable::global();
        assert!(SinkTable::install_global(SinkTable::console()).is_err());
        assert!(Arc::ptr_eq(&first, &SinkTable::global()));
    }
}
