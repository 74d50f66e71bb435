//! Hierarchical leveled logging for the RustyRTC client library.
//!
//! Each subsystem (media, ICE, SCTP, ...) logs through its own [`Log`](crate::log::Log)
//! channel. Channels derived from one root share a level table, so verbosity
//! can be changed per module at runtime and every related channel picks the
//! change up on its next call.

/// Loads the INI-style configuration file and the `[Logging]` settings.
pub mod config;
/// Levels, sinks and the `Log` channel type.
pub mod log;
