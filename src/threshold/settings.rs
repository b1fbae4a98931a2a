//! Cached dotenv-format settings file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::error::ConfigurationError;

/// Contents of the settings file at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsSnapshot {
    entries: HashMap<String, String>,
    load_error: Option<ConfigurationError>,
}

impl SettingsSnapshot {
    /// Snapshot holding the given entries.
    pub fn from_entries(entries: HashMap<String, String>) -> Self {
        Self {
            entries,
            load_error: None,
        }
    }

    /// Snapshot recording a failed load.
    pub fn failed(error: ConfigurationError) -> Self {
        Self {
            entries: HashMap::new(),
            load_error: Some(error),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Error from the load that produced this snapshot, if any.
    pub fn load_error(&self) -> Option<&ConfigurationError> {
        self.load_error.as_ref()
    }
}

/// Read a dotenv-format file. A file that does not exist yields no entries.
pub fn read_settings(path: &Path) -> Result<HashMap<String, String>, ConfigurationError> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let load_failure = |reason: String| ConfigurationError::LoadFailure {
        path: path.display().to_string(),
        reason,
    };

    let iter = dotenv::from_path_iter(path).map_err(|e| load_failure(e.to_string()))?;
    let mut entries = HashMap::new();
    for item in iter {
        let (key, value) = item.map_err(|e| load_failure(e.to_string()))?;
        entries.insert(key, value);
    }
    Ok(entries)
}

/// Holder of the current settings snapshot.
#[derive(Debug)]
pub struct SettingsStore {
    path: Option<PathBuf>,
    current: ArcSwap<SettingsSnapshot>,
}

impl SettingsStore {
    /// Load the settings file once. A failed load is recorded, not returned.
    pub fn load(path: Option<PathBuf>) -> Self {
        let snapshot = match &path {
            Some(path) => match read_settings(path) {
                Ok(entries) => SettingsSnapshot::from_entries(entries),
                Err(e) => {
                    tracing::error!(error = %e, "Settings file could not be loaded");
                    SettingsSnapshot::failed(e)
                }
            },
            None => SettingsSnapshot::default(),
        };

        Self {
            path,
            current: ArcSwap::from_pointee(snapshot),
        }
    }

    /// Store with fixed entries and no backing file.
    pub fn from_entries(entries: HashMap<String, String>) -> Self {
        Self {
            path: None,
            current: ArcSwap::from_pointee(SettingsSnapshot::from_entries(entries)),
        }
    }

    /// Path of the backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<SettingsSnapshot> {
        self.current.load_full()
    }

    /// Re-read the backing file.
    ///
    /// On failure the last good snapshot stays in place. A store that never
    /// loaded successfully keeps reporting the latest failure.
    pub fn reload(&self) -> Result<(), ConfigurationError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        match read_settings(path) {
            Ok(entries) => {
                self.current
                    .store(Arc::new(SettingsSnapshot::from_entries(entries)));
                tracing::info!(path = %path.display(), "Settings reloaded");
                Ok(())
            }
            Err(e) => {
                if self.current.load().load_error().is_some() {
                    self.current.store(Arc::new(SettingsSnapshot::failed(e.clone())));
                }
                tracing::error!(error = %e, "Failed to reload settings. Keeping current snapshot.");
                Err(e)
            }
        }
    }
}
