//! Settings file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::threshold::SettingsStore;

/// A watcher that reloads the threshold settings file when it changes.
pub struct SettingsWatcher {
    path: PathBuf,
    store: Arc<SettingsStore>,
}

impl SettingsWatcher {
    /// Create a watcher for the store's backing file.
    ///
    /// Returns `None` when the store has no backing file.
    pub fn new(store: Arc<SettingsStore>) -> Option<Self> {
        let path = store.path()?.to_path_buf();
        Some(Self { path, store })
    }

    /// Start watching. The returned watcher must be kept alive.
    ///
    /// The parent directory is watched so the file may be created or
    /// replaced after startup.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let store = self.store.clone();
        let target = self.path.clone();
        let file_name = target.file_name().map(|n| n.to_os_string());

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    let touches_target = event
                        .paths
                        .iter()
                        .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
                    if touches_target
                        && (event.kind.is_modify() || event.kind.is_create() || event.kind.is_remove())
                    {
                        tracing::info!(path = %target.display(), "Settings file change detected, reloading...");
                        let _ = store.reload();
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(watch_root(&self.path), RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Settings watcher started");
        Ok(watcher)
    }
}

fn watch_root(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_watch_root() {
        assert_eq!(watch_root(Path::new(".env")), Path::new("."));
        assert_eq!(watch_root(Path::new("/etc/optimizer/.env")), Path::new("/etc/optimizer"));
    }

    #[test]
    fn test_no_watcher_without_backing_file() {
        let store = Arc::new(SettingsStore::from_entries(HashMap::new()));
        assert!(SettingsWatcher::new(store).is_none());
    }

    #[tokio::test]
    async fn test_reloads_on_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "X=1\n").unwrap();

        let store = Arc::new(SettingsStore::load(Some(path.clone())));
        let _watcher = SettingsWatcher::new(store.clone()).unwrap().run().unwrap();

        std::fs::write(&path, "X=7\n").unwrap();

        let mut reloaded = false;
        for _ in 0..50 {
            if store.snapshot().get("X") == Some("7") {
                reloaded = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(reloaded, "settings should be reloaded after the file changes");
    }
}
