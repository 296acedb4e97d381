//! Common test utilities for portal integration tests.
//!
//! Provides `TestEnv` for isolated test environments that don't pollute
//! the user's data or config directories.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;
pub use tempfile::TempDir;

/// A test environment with isolated directories.
///
/// Each `TestEnv` creates two temporary directories:
/// - `work_dir`: Acts as the site root the CLI runs in
/// - `data_dir`: Holds preference storage and the action log
///   (via the `PORTAL_DATA_DIR` env var)
///
/// The `portal()` method returns a `Command` that sets the isolation env vars
/// per-invocation, making tests parallel-safe.
pub struct TestEnv {
    pub work_dir: TempDir,
    pub data_dir: TempDir,
}

impl TestEnv {
    /// Create a new test environment with isolated directories.
    pub fn new() -> Self {
        Self {
            work_dir: TempDir::new().unwrap(),
            data_dir: TempDir::new().unwrap(),
        }
    }

    /// Get a Command for the portal binary with isolated directories.
    pub fn portal(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_portal"));
        cmd.current_dir(self.work_dir.path());
        cmd.env("PORTAL_DATA_DIR", self.data_dir.path());
        // Keep the user's portal.toml out of the picture.
        cmd.env("PORTAL_CONFIG_DIR", self.data_dir.path());
        cmd.env_remove("PORTAL_CATALOG");
        cmd.env_remove("PORTAL_BLOG");
        cmd
    }

    /// Write a catalog document into the work directory and return its path
    /// relative to it.
    pub fn write_catalog(&self, json: &str) -> String {
        let path = self.work_dir.path().join("agents-data.json");
        std::fs::write(&path, json).unwrap();
        "agents-data.json".to_string()
    }

    /// Write a catalog document at the first default probe location.
    pub fn write_catalog_at_default(&self, json: &str) {
        let dir = self.work_dir.path().join("js");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("agents-data.json"), json).unwrap();
    }

    /// Write the blog metadata document at its default location.
    pub fn write_blog(&self, json: &str) {
        let dir = self.work_dir.path().join("blog").join("posts");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("metadata.json"), json).unwrap();
    }

    /// Write one agent manifest under the given agents directory.
    pub fn write_manifest(&self, agents_dir: &str, folder: &str, json: &str) {
        let dir = self.work_dir.path().join(agents_dir).join(folder);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("agent.json"), json).unwrap();
    }

    /// Get the path to the work directory.
    pub fn path(&self) -> &Path {
        self.work_dir.path()
    }

    /// Get the path to the data directory.
    pub fn data_path(&self) -> &Path {
        self.data_dir.path()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// A small two-agent catalog used across tests.
pub const SAMPLE_CATALOG: &str = r#"[
    {
        "name": "Data Analyzer",
        "emoji": "📊",
        "category": "Analytics",
        "agentType": "Assistant",
        "agentScale": "Single-Agent",
        "description": "Analyzes structured data",
        "long_description": "Understands **CSV** files.",
        "rating": 4.5,
        "reviews": 1200,
        "tags": ["data", "csv"],
        "configFields": [
            {"name": "apiKey", "label": "API Key", "type": "password"},
            {"name": "model", "type": "select", "options": ["gpt-4", "claude"], "default": "gpt-4"}
        ]
    },
    {
        "name": "Writer Bot",
        "category": "Content",
        "type": "Autonomous",
        "scale": "Advanced",
        "description": "Writes blog posts",
        "rating": 3.0,
        "reviews": 7,
        "tags": ["text"]
    }
]"#;

/// A small blog metadata document used across tests.
pub const SAMPLE_BLOG: &str = r#"{
    "posts": [
        {
            "title": "Older Post",
            "description": "First one",
            "date": "2025-01-05",
            "categories": ["News"],
            "readTime": 3,
            "url": "/blog/posts/older.html"
        },
        {
            "title": "Newest Post",
            "description": "Latest news",
            "date": "2025-06-10",
            "categories": ["News", "Agents"],
            "readTime": 5,
            "url": "/blog/posts/newest.html"
        },
        {
            "title": "Featured Post",
            "description": "The big one",
            "date": "2025-03-01",
            "categories": ["Agents"],
            "readTime": 8,
            "featured": true,
            "url": "/blog/posts/featured.html"
        }
    ]
}"#;
