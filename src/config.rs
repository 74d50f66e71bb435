use std::{collections::HashMap, fs, io};

use thiserror::Error;

use crate::log::{
    level_table::LevelTable,
    log_error::LogError,
    log_level::{DEFAULT_LOG_LEVEL, LevelSpec},
    logger::{Log, LogBuilder},
};

/// Section holding the logging keys.
pub const LOGGING_SECTION: &str = "Logging";

/// Key of the fallback level for modules without an entry.
pub const DEFAULT_LEVEL_KEY: &str = "default_level";

/// Prefix of per-module keys, e.g. `level.media = WARN`.
pub const MODULE_LEVEL_PREFIX: &str = "level.";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Error reading file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid logging configuration: {0}")]
    Logging(#[from] LogError),
}

/// INI-style key/value configuration: global keys plus `[Section]` blocks.
#[derive(Debug)]
pub struct Config {
    pub globals: HashMap<String, String>,
    pub sections: HashMap<String, HashMap<String, String>>,
}

impl Config {
    /// # Errors
    /// Returns [`ConfigError::Read`] if the file cannot be read.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Ok(Self::parse(&content))
    }

    /// Parses configuration text. Blank lines, `#` comments and lines without
    /// `=` are skipped; values may be wrapped in double quotes.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut globals = HashMap::new();
        let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current_section: Option<String> = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                current_section = Some(name.trim().to_string());
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim().to_string();
                let value = value.trim().trim_matches('"').to_string();

                match &current_section {
                    None => {
                        globals.insert(key, value);
                    }
                    Some(sec) => {
                        sections.entry(sec.clone()).or_default().insert(key, value);
                    }
                }
            }
        }
        Config { globals, sections }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            globals: HashMap::new(),
            sections: HashMap::new(),
        }
    }

    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|sec| sec.get(key))
            .map(|s| s.as_str())
    }

    #[must_use]
    pub fn get_non_empty(&self, section: &str, key: &str) -> Option<&str> {
        self.get(section, key).filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn get_global(&self, key: &str) -> Option<&str> {
        self.globals.get(key).map(|s| s.as_str())
    }

    /// All keys of `section`, in no particular order.
    pub fn section(&self, section: &str) -> impl Iterator<Item = (&str, &str)> {
        self.sections
            .get(section)
            .into_iter()
            .flatten()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Logging setup read from the `[Logging]` section.
///
/// ```text
/// [Logging]
/// default_level = WARN
/// level.media = DEBUG
/// level.ice = ERROR
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub default_level: LevelSpec,
    pub module_levels: HashMap<String, LevelSpec>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            default_level: LevelSpec::Named(DEFAULT_LOG_LEVEL),
            module_levels: HashMap::new(),
        }
    }
}

impl LoggingSettings {
    /// # Errors
    /// Returns [`LogError::InvalidLevelName`] for the first value that is not a
    /// level name or rank.
    pub fn from_config(config: &Config) -> Result<Self, LogError> {
        let default_level = config
            .get_non_empty(LOGGING_SECTION, DEFAULT_LEVEL_KEY)
            .map(LevelSpec::parse)
            .transpose()?
            .unwrap_or(LevelSpec::Named(DEFAULT_LOG_LEVEL));

        let module_levels = config
            .section(LOGGING_SECTION)
            .filter_map(|(key, value)| {
                key.strip_prefix(MODULE_LEVEL_PREFIX)
                    .filter(|module| !module.is_empty())
                    .map(|module| (module, value))
            })
            .map(|(module, value)| LevelSpec::parse(value).map(|spec| (module.to_string(), spec)))
            .collect::<Result<_, _>>()?;

        Ok(Self {
            default_level,
            module_levels,
        })
    }

    /// # Errors
    /// See [`Config::load`] and [`LoggingSettings::from_config`].
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let config = Config::load(path)?;
        Ok(Self::from_config(&config)?)
    }

    /// A fresh level table holding the configured module levels.
    #[must_use]
    pub fn level_table(&self) -> LevelTable {
        self.module_levels.clone().into_iter().collect()
    }

    /// Starts a root log builder carrying this level table and default level.
    #[must_use]
    pub fn log_builder(&self) -> LogBuilder {
        Log::builder()
            .levels(self.level_table())
            .default_level(self.default_level)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::log::log_level::LogLevel;

    const SAMPLE: &str = r#"
# client settings
app_name = "rustyrtc"

[Logging]
default_level = warn
level.media = DEBUG
level.ice = "3"
client_log_path = ~/logs

[Media]
fps = 30
"#;

    #[test]
    fn parse_sections_and_globals() {
        let config = Config::parse(SAMPLE);
        assert_eq!(config.get_global("app_name"), Some("rustyrtc"));
        assert_eq!(config.get("Media", "fps"), Some("30"));
        assert_eq!(config.get("Logging", "level.ice"), Some("3"));
        assert_eq!(config.get("Logging", "missing"), None);
        assert_eq!(config.section("Nope").count(), 0);
    }

    #[test]
    fn settings_from_config() {
        let settings = LoggingSettings::from_config(&Config::parse(SAMPLE)).unwrap();
        assert_eq!(settings.default_level, LevelSpec::Named(LogLevel::Warn));
        assert_eq!(settings.module_levels.len(), 2);
        assert_eq!(settings.module_levels["media"], LevelSpec::Named(LogLevel::Debug));
        assert_eq!(settings.module_levels["ice"], LevelSpec::Rank(3));
    }

    #[test]
    fn settings_default_without_section() {
        let settings = LoggingSettings::from_config(&Config::empty()).unwrap();
        assert_eq!(settings, LoggingSettings::default());
    }

    #[test]
    fn settings_reject_bad_level() {
        let config = Config::parse("[Logging]\nlevel.media = chatty\n");
        let err = LoggingSettings::from_config(&config).unwrap_err();
        assert!(matches!(err, LogError::InvalidLevelName { ref name } if name == "chatty"));

        let config = Config::parse("[Logging]\ndefault_level = loud\n");
        assert!(LoggingSettings::from_config(&config).is_err());
    }

    #[test]
    fn log_builder_applies_settings() {
        let settings = LoggingSettings::from_config(&Config::parse(SAMPLE)).unwrap();

        let media = settings
            .log_builder()
            .module_name("media")
            .component(&"MediaAgent")
            .build()
            .unwrap();
        assert_eq!(media.effective_level(), Some(LogLevel::Debug));

        let rtp = media.create_child(Some("rtp"), &"RtpSession");
        assert_eq!(rtp.effective_level(), Some(LogLevel::Warn));

        let ice = media.create_child(Some("ice"), &"IceAgent");
        assert_eq!(ice.current_level(), 3);
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = LoggingSettings::load("/definitely/not/here.conf").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/definitely/not/here.conf"));
    }

    #[test]
    fn load_reads_file() {
        let path = std::env::temp_dir().join(format!("rustyrtc-log-{}.conf", std::process::id()));
        std::fs::write(&path, SAMPLE).unwrap();

        let settings = LoggingSettings::load(path.to_str().unwrap()).unwrap();
        assert_eq!(settings.default_level, LevelSpec::Named(LogLevel::Warn));

        let _ = std::fs::remove_file(&path);
    }
}
