//! Best-effort action log.
//!
//! Every CLI invocation appends one JSON line to `action.log` in the portal
//! data directory. Logging must never affect the command outcome: any failure
//! to record is swallowed. Values that look like secrets are redacted before
//! they hit disk.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// One logged invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionEntry {
    /// RFC 3339 UTC timestamp.
    pub timestamp: String,

    /// Subcommand path, e.g. `agent show`.
    pub command: String,

    /// Remaining arguments, secret-looking values redacted.
    pub args: Vec<String>,

    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub duration_ms: u64,
}

impl ActionEntry {
    pub fn new(command: &str, args: &[String], success: bool, error: Option<String>, duration_ms: u64) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            command: command.to_string(),
            args: sanitize_args(args),
            success,
            error,
            duration_ms,
        }
    }
}

/// Append an entry to the action log. Failures are silently ignored.
pub fn record(entry: &ActionEntry) {
    let path = log_path();
    if let Some(parent) = path.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(json) = serde_json::to_string(entry) else {
        return;
    };
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&path) {
        let _ = writeln!(file, "{json}");
    }
}

/// Location of the log file.
pub fn log_path() -> PathBuf {
    crate::storage::data_dir().join("action.log")
}

/// Redact the value following any `key=value` or flag whose name suggests a
/// secret.
fn sanitize_args(args: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len());
    let mut redact_next = false;
    for arg in args {
        if redact_next {
            out.push("<redacted>".to_string());
            redact_next = false;
            continue;
        }
        if let Some((key, _)) = arg.split_once('=') {
            if is_secret_name(key) {
                out.push(format!("{key}=<redacted>"));
                continue;
            }
        }
        if arg.starts_with("--") && is_secret_name(arg) {
            redact_next = true;
        }
        out.push(arg.clone());
    }
    out
}

fn is_secret_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    ["password", "secret", "token", "key"]
        .iter()
        .any(|s| lower.contains(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_key_value_pairs() {
        let args = vec![
            "apiKey=sk-123".to_string(),
            "model=gpt-4".to_string(),
            "password=hunter2".to_string(),
        ];
        let out = sanitize_args(&args);
        assert_eq!(out, ["apiKey=<redacted>", "model=gpt-4", "password=<redacted>"]);
    }

    #[test]
    fn test_sanitize_flag_value() {
        let args = vec!["--token".to_string(), "abc".to_string(), "list".to_string()];
        let out = sanitize_args(&args);
        assert_eq!(out, ["--token", "<redacted>", "list"]);
    }

    #[test]
    fn test_entry_shape() {
        let entry = ActionEntry::new("agent show", &["X".to_string()], true, None, 12);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"command\":\"agent show\""));
        assert!(json.contains("\"duration_ms\":12"));
        assert!(!json.contains("\"error\""));
    }
}
