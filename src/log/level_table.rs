use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use crate::log::{log_error::LogError, log_level::LevelSpec};

/// Module name → level mapping shared by a whole family of `Log` handles.
///
/// Cloning a `LevelTable` clones the handle, not the map: every clone reads and
/// writes the same entries.
#[derive(Clone, Debug, Default)]
pub struct LevelTable {
    inner: Arc<RwLock<HashMap<String, LevelSpec>>>,
}

impl LevelTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from raw entries, rejecting the whole input on the first
    /// invalid level.
    ///
    /// # Errors
    /// Returns [`LogError::InvalidLevelName`] for a value that is neither a level
    /// name nor numeric.
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self, LogError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        Ok(validate(entries)?.into_iter().collect())
    }

    #[must_use]
    pub fn get(&self, module: &str) -> Option<LevelSpec> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(module)
            .copied()
    }

    /// Validates every entry, then overwrites them key by key under one write lock.
    ///
    /// # Errors
    /// Same as [`LevelTable::from_entries`]; nothing is written on error.
    pub fn merge<I, K, V>(&self, entries: I) -> Result<(), LogError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let entries = validate(entries)?;
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(entries);
        Ok(())
    }

    /// Point-in-time copy of the mapping.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, LevelSpec> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// True when both handles point at the same mapping.
    #[must_use]
    pub fn same_table(&self, other: &LevelTable) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl FromIterator<(String, LevelSpec)> for LevelTable {
    fn from_iter<T: IntoIterator<Item = (String, LevelSpec)>>(iter: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(iter.into_iter().collect())),
        }
    }
}

fn validate<I, K, V>(entries: I) -> Result<Vec<(String, LevelSpec)>, LogError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<str>,
{
    entries
        .into_iter()
        .map(|(module, value)| LevelSpec::parse(value.as_ref()).map(|spec| (module.into(), spec)))
        .collect()
}
