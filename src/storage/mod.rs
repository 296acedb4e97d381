//! Preference storage for portal state.
//!
//! The browser portal keeps user preferences (theme, per-agent configuration,
//! per-post like flags) in local storage; the CLI keeps the same keys in a
//! JSON document under the portal data directory. Both sit behind the
//! [`PreferenceStore`] trait, which exposes an explicit availability flag so
//! callers query capability once instead of wrapping every access in its own
//! error handling. An unavailable store degrades to defaults and is never
//! fatal.

use crate::Result;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Key for the persisted theme preference.
pub const THEME_KEY: &str = "theme";

/// Storage key for an agent's saved configuration, namespaced by name.
pub fn agent_config_key(agent_name: &str) -> String {
    format!("agent-config-{agent_name}")
}

/// Storage key for a blog post's like flag, namespaced by page path.
pub fn like_key(page_path: &str) -> String {
    format!("liked_{page_path}")
}

/// Trait for key-value preference stores.
pub trait PreferenceStore {
    /// Whether the store can persist values. Callers should query this once
    /// and fall back to defaults when it is false.
    fn available(&self) -> bool;

    /// Read a value. Unavailable stores return `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove a value. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-process store, used by tests and as the degraded fallback.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn available(&self) -> bool {
        true
    }

    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// File-backed store: one JSON document under the portal data directory.
///
/// `open` never fails; when the directory or file cannot be used the store
/// comes up unavailable with a single warning, and every later operation is
/// a no-op.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
    available: bool,
}

impl FileStore {
    /// Open (or create) the preference document in `data_dir`.
    pub fn open(data_dir: &Path) -> Self {
        let path = data_dir.join("preferences.json");

        if let Err(e) = fs::create_dir_all(data_dir) {
            eprintln!(
                "Warning: preference storage unavailable ({}): {}",
                data_dir.display(),
                e
            );
            return Self {
                path,
                values: BTreeMap::new(),
                available: false,
            };
        }

        let values = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(values) => values,
                Err(e) => {
                    eprintln!(
                        "Warning: ignoring corrupt preference file {}: {}",
                        path.display(),
                        e
                    );
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(), // first run
        };

        Self {
            path,
            values,
            available: true,
        }
    }

    /// Open the store rooted at the resolved portal data directory.
    pub fn open_default() -> Self {
        Self::open(&data_dir())
    }

    fn flush(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl PreferenceStore for FileStore {
    fn available(&self) -> bool {
        self.available
    }

    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if !self.available {
            return Ok(());
        }
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if !self.available {
            return Ok(());
        }
        self.values.remove(key);
        self.flush()
    }
}

/// Resolve the portal data directory.
///
/// Priority: `PORTAL_DATA_DIR` env var > XDG data dir > `.portal` in cwd.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PORTAL_DATA_DIR") {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::data_dir()
        .map(|d| d.join("agentopia-portal"))
        .unwrap_or_else(|| PathBuf::from(".portal"))
}

/// Load an agent's stored configuration, best-effort.
///
/// A missing key, an unavailable store, and a corrupt value all yield an
/// empty map; corruption is warned about but never surfaced.
pub fn load_agent_config(store: &dyn PreferenceStore, agent_name: &str) -> BTreeMap<String, String> {
    let Some(raw) = store.get(&agent_config_key(agent_name)) else {
        return BTreeMap::new();
    };
    match serde_json::from_str(&raw) {
        Ok(map) => map,
        Err(e) => {
            eprintln!("Warning: corrupt stored config for \"{agent_name}\": {e}");
            BTreeMap::new()
        }
    }
}

/// Persist an agent's configuration, JSON-encoded under its storage key.
pub fn save_agent_config(
    store: &mut dyn PreferenceStore,
    agent_name: &str,
    values: &BTreeMap<String, String>,
) -> Result<()> {
    if !store.available() {
        return Err(crate::Error::StorageUnavailable);
    }
    let json = serde_json::to_string(values)?;
    store.set(&agent_config_key(agent_name), &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_key_namespacing() {
        assert_eq!(agent_config_key("Data Analyzer"), "agent-config-Data Analyzer");
        assert_eq!(like_key("/blog/post.html"), "liked_/blog/post.html");
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.available());
        assert!(store.get("theme").is_none());
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
        store.remove("theme").unwrap();
        assert!(store.get("theme").is_none());
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = TempDir::new().unwrap();
        {
            let mut store = FileStore::open(dir.path());
            assert!(store.available());
            store.set("theme", "dark").unwrap();
        }
        let store = FileStore::open(dir.path());
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_file_store_corrupt_file_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("preferences.json"), "{not json").unwrap();
        let store = FileStore::open(dir.path());
        assert!(store.available());
        assert!(store.get("theme").is_none());
    }

    #[test]
    fn test_agent_config_roundtrip() {
        let mut store = MemoryStore::new();
        let mut values = BTreeMap::new();
        values.insert("apiKey".to_string(), "abc".to_string());
        save_agent_config(&mut store, "X", &values).unwrap();
        let loaded = load_agent_config(&store, "X");
        assert_eq!(loaded.get("apiKey").map(String::as_str), Some("abc"));
        // Other agents are unaffected.
        assert!(load_agent_config(&store, "Y").is_empty());
    }

    #[test]
    fn test_corrupt_agent_config_yields_empty() {
        let mut store = MemoryStore::new();
        store.set(&agent_config_key("X"), "not json").unwrap();
        assert!(load_agent_config(&store, "X").is_empty());
    }
}
