pub mod level_table;
pub mod log_error;
pub mod log_level;
pub mod log_macros;
pub mod log_sink;
pub mod logger;
pub mod noop_log_sink;
pub mod sink_table;
pub use level_table::LevelTable;
pub use log_error::{LogError, WithMessage};
pub use log_level::{LevelSpec, LogLevel, get_level_by_name};
pub use logger::Log;
pub use noop_log_sink::NoopLogSink;
