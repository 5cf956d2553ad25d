//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (performance.now on web, a monotonic clock natively)
//! - Storage (LocalStorage on web, a JSON file natively)

#[cfg(target_arch = "wasm32")]
mod web_storage {
    use crate::persistence::KeyValueStore;

    /// Browser LocalStorage. Every call re-resolves the window so a store
    /// created before the page is ready still works later.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct LocalStorage;

    impl LocalStorage {
        fn storage() -> Option<web_sys::Storage> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
        }
    }

    impl KeyValueStore for LocalStorage {
        fn get(&self, key: &str) -> Option<String> {
            Self::storage()?.get_item(key).ok().flatten()
        }

        fn set(&mut self, key: &str, value: &str) {
            match Self::storage() {
                Some(storage) => {
                    if storage.set_item(key, value).is_err() {
                        log::warn!("LocalStorage rejected write to {key}");
                    }
                }
                None => log::warn!("LocalStorage unavailable, {key} not saved"),
            }
        }

        fn remove(&mut self, key: &str) {
            match Self::storage() {
                Some(storage) => {
                    if storage.remove_item(key).is_err() {
                        log::warn!("LocalStorage rejected removal of {key}");
                    }
                }
                None => log::warn!("LocalStorage unavailable, {key} not removed"),
            }
        }
    }

    /// Milliseconds from `performance.now()`, falling back to `Date.now()`
    pub fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }
}

#[cfg(target_arch = "wasm32")]
pub use web_storage::{LocalStorage, now_ms};

#[cfg(not(target_arch = "wasm32"))]
mod native_storage {
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::OnceLock;
    use std::time::Instant;

    use crate::persistence::KeyValueStore;

    /// Key-value pairs kept in a single JSON file, rewritten on every change
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
        entries: HashMap<String, String>,
    }

    impl FileStore {
        /// Open `path`, starting empty if it is missing or unreadable
        pub fn open(path: impl AsRef<Path>) -> Self {
            let path = path.as_ref().to_path_buf();
            let entries = match std::fs::read_to_string(&path) {
                Ok(json) => match serde_json::from_str(&json) {
                    Ok(entries) => entries,
                    Err(e) => {
                        log::warn!("Ignoring corrupt store {}: {e}", path.display());
                        HashMap::new()
                    }
                },
                Err(_) => HashMap::new(),
            };
            Self { path, entries }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn flush(&self) {
            let result = serde_json::to_string_pretty(&self.entries)
                .map_err(std::io::Error::other)
                .and_then(|json| std::fs::write(&self.path, json));
            if let Err(e) = result {
                log::warn!("Failed to write {}: {e}", self.path.display());
            }
        }
    }

    impl KeyValueStore for FileStore {
        fn get(&self, key: &str) -> Option<String> {
            self.entries.get(key).cloned()
        }

        fn set(&mut self, key: &str, value: &str) {
            self.entries.insert(key.to_string(), value.to_string());
            self.flush();
        }

        fn remove(&mut self, key: &str) {
            if self.entries.remove(key).is_some() {
                self.flush();
            }
        }
    }

    /// Milliseconds since the first call
    pub fn now_ms() -> f64 {
        static START: OnceLock<Instant> = OnceLock::new();
        START.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_file_store_persists_across_opens() {
            let path = std::env::temp_dir().join(format!("neon_arcade_store_{}.json", std::process::id()));
            let _ = std::fs::remove_file(&path);

            let mut store = FileStore::open(&path);
            assert!(store.get("brickBreaker_highScore").is_none());
            store.set("brickBreaker_highScore", "12");

            let reopened = FileStore::open(&path);
            assert_eq!(reopened.get("brickBreaker_highScore").as_deref(), Some("12"));

            let _ = std::fs::remove_file(&path);
        }

        #[test]
        fn test_file_store_remove_is_persisted() {
            let path = std::env::temp_dir().join(format!("neon_arcade_remove_{}.json", std::process::id()));
            let _ = std::fs::remove_file(&path);

            let mut store = FileStore::open(&path);
            store.set("neon_arcade_settings", "{}");
            store.remove("neon_arcade_settings");
            // Removing a missing key is a no-op
            store.remove("neon_arcade_settings");

            let reopened = FileStore::open(&path);
            assert!(reopened.get("neon_arcade_settings").is_none());
            let _ = std::fs::remove_file(&path);
        }

        #[test]
        fn test_corrupt_file_opens_empty() {
            let path = std::env::temp_dir().join(format!("neon_arcade_corrupt_{}.json", std::process::id()));
            std::fs::write(&path, "not json").unwrap();
            let store = FileStore::open(&path);
            assert!(store.get("anything").is_none());
            let _ = std::fs::remove_file(&path);
        }

        #[test]
        fn test_now_ms_is_monotonic() {
            let a = now_ms();
            let b = now_ms();
            assert!(b >= a);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native_storage::{FileStore, now_ms};
