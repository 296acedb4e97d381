//! Portal configuration.
//!
//! Settings are resolved in priority order: command-line flag, environment
//! variable, `portal.toml` in the user config directory, built-in default.
//! A missing config file is the normal case; a malformed one is warned about
//! and ignored rather than aborting the command.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Catalog locations probed in order until one loads.
pub const DEFAULT_CATALOG_SOURCES: &[&str] = &[
    "js/agents-data.json",
    "public/data/agents-data.json",
    "agents-data.json",
];

/// Default blog metadata document path.
pub const DEFAULT_BLOG_PATH: &str = "blog/posts/metadata.json";

/// Default GitHub organization for the repository listing.
pub const DEFAULT_ORG: &str = "Agentopia";

/// Contents of `portal.toml`. All fields optional; absent fields fall through
/// to the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Catalog sources tried in order. Entries may be file paths or URLs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub catalog_sources: Vec<String>,

    /// Blog metadata document path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog_path: Option<String>,

    /// GitHub organization for `portal repos`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,

    /// Theme used when no preference is stored ("light" or "dark").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_theme: Option<String>,
}

impl PortalConfig {
    /// Load `portal.toml` from the user config directory.
    ///
    /// Missing file yields the default config; a malformed file is warned
    /// about and ignored.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load from an explicit path. Used by tests.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(text) = fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str(&text) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: ignoring malformed {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Location of the config file, if a config directory exists.
    pub fn path() -> Option<PathBuf> {
        if let Ok(dir) = std::env::var("PORTAL_CONFIG_DIR") {
            if !dir.is_empty() {
                return Some(PathBuf::from(dir).join("portal.toml"));
            }
        }
        dirs::config_dir().map(|d| d.join("agentopia-portal").join("portal.toml"))
    }

    /// Resolve the ordered catalog sources.
    ///
    /// Priority: `--catalog` flag > `PORTAL_CATALOG` env var > config file >
    /// built-in probe list. Flag and env var name a single source; the config
    /// file and defaults give an ordered fallback list.
    pub fn resolve_catalog_sources(&self, flag: Option<&str>) -> Vec<String> {
        if let Some(flag) = flag {
            return vec![flag.to_string()];
        }
        if let Ok(env) = std::env::var("PORTAL_CATALOG") {
            if !env.is_empty() {
                return vec![env];
            }
        }
        if !self.catalog_sources.is_empty() {
            return self.catalog_sources.clone();
        }
        DEFAULT_CATALOG_SOURCES
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Resolve the blog metadata path.
    pub fn resolve_blog_path(&self, flag: Option<&str>) -> String {
        if let Some(flag) = flag {
            return flag.to_string();
        }
        if let Ok(env) = std::env::var("PORTAL_BLOG") {
            if !env.is_empty() {
                return env;
            }
        }
        self.blog_path
            .clone()
            .unwrap_or_else(|| DEFAULT_BLOG_PATH.to_string())
    }

    /// Resolve the GitHub organization.
    pub fn resolve_org(&self, flag: Option<&str>) -> String {
        if let Some(flag) = flag {
            return flag.to_string();
        }
        self.org.clone().unwrap_or_else(|| DEFAULT_ORG.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = PortalConfig::load_from(&dir.path().join("portal.toml"));
        assert!(config.catalog_sources.is_empty());
        assert!(config.blog_path.is_none());
        assert_eq!(config.resolve_org(None), "Agentopia");
    }

    #[test]
    fn test_malformed_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("portal.toml");
        std::fs::write(&path, "catalog_sources = not-a-list").unwrap();
        let config = PortalConfig::load_from(&path);
        assert!(config.catalog_sources.is_empty());
    }

    #[test]
    fn test_file_values_parse() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("portal.toml");
        std::fs::write(
            &path,
            "catalog_sources = [\"a.json\", \"b.json\"]\nblog_path = \"posts.json\"\norg = \"Example\"\n",
        )
        .unwrap();
        let config = PortalConfig::load_from(&path);
        assert_eq!(config.catalog_sources, ["a.json", "b.json"]);
        assert_eq!(config.resolve_blog_path(None), "posts.json");
        assert_eq!(config.resolve_org(None), "Example");
    }

    #[test]
    fn test_flag_beats_file() {
        let config = PortalConfig {
            catalog_sources: vec!["file.json".to_string()],
            blog_path: Some("file-posts.json".to_string()),
            org: Some("FileOrg".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_catalog_sources(Some("flag.json")),
            ["flag.json"]
        );
        assert_eq!(config.resolve_blog_path(Some("flag-posts.json")), "flag-posts.json");
        assert_eq!(config.resolve_org(Some("FlagOrg")), "FlagOrg");
    }

    #[test]
    #[serial_test::serial]
    fn test_default_probe_list_order() {
        std::env::remove_var("PORTAL_CATALOG");
        let config = PortalConfig::default();
        let sources = config.resolve_catalog_sources(None);
        assert_eq!(sources.first().map(String::as_str), Some("js/agents-data.json"));
        assert_eq!(sources.len(), 3);
    }

    #[test]
    #[serial_test::serial]
    fn test_env_var_beats_file_but_not_flag() {
        std::env::set_var("PORTAL_CATALOG", "env.json");
        let config = PortalConfig {
            catalog_sources: vec!["file.json".to_string()],
            ..Default::default()
        };
        assert_eq!(config.resolve_catalog_sources(None), ["env.json"]);
        assert_eq!(config.resolve_catalog_sources(Some("flag.json")), ["flag.json"]);
        std::env::remove_var("PORTAL_CATALOG");
    }
}
