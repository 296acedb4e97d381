//! Manifest sync: merge per-agent `agent.json` manifests into the catalog.
//!
//! Each agent project publishes a manifest; the portal catalog additionally
//! holds manually curated entries. Syncing maps every manifest into catalog
//! field names, then merges by `name`: curated entries absent from the
//! manifests are preserved untouched, a matching entry is updated field-wise,
//! and new manifests are appended. The merge works on raw JSON values so
//! fields this crate doesn't model survive a sync round-trip.

use crate::{Error, Result};
use serde_json::{json, Map, Value};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Outcome of one sync run.
#[derive(Debug, Default, serde::Serialize)]
pub struct SyncReport {
    /// Manifests successfully read.
    pub scanned: usize,
    /// Agent names newly added to the catalog.
    pub added: Vec<String>,
    /// Agent names updated from a manifest.
    pub updated: Vec<String>,
    /// Manifest paths that could not be parsed.
    pub skipped: Vec<String>,
    /// Total entries written.
    pub total: usize,
}

/// Merge every `<agents_dir>/*/agent.json` manifest into the catalog file at
/// `catalog_path`, writing the result atomically. A missing catalog file is
/// treated as an empty catalog.
pub fn sync_catalog(agents_dir: &Path, catalog_path: &Path) -> Result<SyncReport> {
    if !agents_dir.is_dir() {
        return Err(Error::InvalidInput(format!(
            "agents directory not found: {}",
            agents_dir.display()
        )));
    }

    let mut existing: Vec<Value> = match fs::read_to_string(catalog_path) {
        Ok(text) => serde_json::from_str(&text)?,
        Err(_) => Vec::new(),
    };

    let mut report = SyncReport::default();

    let mut folders: Vec<_> = fs::read_dir(agents_dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .collect();
    folders.sort_by_key(|entry| entry.file_name());

    for (idx, folder) in folders.iter().enumerate() {
        let manifest_path = folder.path().join("agent.json");
        if !manifest_path.exists() {
            continue;
        }

        let manifest: Map<String, Value> = match fs::read_to_string(&manifest_path)
            .map_err(Error::from)
            .and_then(|text| serde_json::from_str(&text).map_err(Error::from))
        {
            Ok(m) => m,
            Err(e) => {
                eprintln!("Warning: could not parse {}: {}", manifest_path.display(), e);
                report.skipped.push(manifest_path.display().to_string());
                continue;
            }
        };

        report.scanned += 1;
        let folder_name = folder.file_name().to_string_lossy().to_string();
        let mapped = map_manifest(&folder_name, idx, &manifest);
        let name = mapped["name"].as_str().unwrap_or(&folder_name).to_string();

        match existing
            .iter_mut()
            .find(|entry| entry["name"].as_str() == Some(name.as_str()))
        {
            Some(entry) => {
                // Field-wise overlay: manifest fields win, everything else
                // on the curated entry is preserved.
                if let (Some(target), Value::Object(source)) = (entry.as_object_mut(), mapped) {
                    for (key, value) in source {
                        target.insert(key, value);
                    }
                }
                report.updated.push(name);
            }
            None => {
                existing.push(mapped);
                report.added.push(name);
            }
        }
    }

    report.total = existing.len();
    write_atomic(catalog_path, &serde_json::to_string_pretty(&existing)?)?;
    Ok(report)
}

/// Map one manifest into the catalog entry shape.
///
/// Manifests use snake_case link keys; the catalog emits camelCase. Ratings
/// default to 5.0 and reviews to 0 for entries that have never been reviewed.
fn map_manifest(folder: &str, idx: usize, manifest: &Map<String, Value>) -> Value {
    let get = |keys: &[&str]| -> Value {
        keys.iter()
            .find_map(|k| manifest.get(*k).filter(|v| !v.is_null()))
            .cloned()
            .unwrap_or(Value::Null)
    };
    let get_or = |keys: &[&str], fallback: Value| -> Value {
        match get(keys) {
            Value::Null => fallback,
            v => v,
        }
    };

    json!({
        // Positional only; never a durable key.
        "id": idx + 1,
        "name": get_or(&["name"], json!(folder)),
        "icon": get_or(&["icon", "emoji"], json!("🤖")),
        "emoji": get_or(&["emoji", "icon"], json!("🤖")),
        "version": get_or(&["version"], json!("0.1.0")),
        "author": get_or(&["author"], json!("Agentopia Team")),
        "category": get_or(&["category"], json!("Uncategorized")),
        "agentType": get_or(&["agentType", "type"], json!("Assistant")),
        "agentScale": get_or(&["agentScale", "scale"], json!("Single-Agent")),
        "subcategory": get_or(&["subcategory"], json!("")),
        "description": get_or(&["description"], json!("")),
        "configFields": get_or(&["config_fields", "configFields"], json!([])),
        "features": get_or(&["features"], json!([])),
        "tags": get_or(&["tags"], json!([])),
        "demoUrl": get_or(&["demo_url", "demoUrl"], json!("")),
        "sourceUrl": get_or(&["source_url", "sourceUrl"], json!("")),
        "rating": get_or(&["rating"], json!(5.0)),
        "reviews": get_or(&["reviews"], json!(0)),
        "long_description": get_or(&["long_description", "description"], json!("")),
        "entry_point": get(&["entry_point"]),
        "deployment_status": get_or(&["deployment_status"], json!("N/A")),
        "use_cases": get_or(&["use_cases"], json!([])),
        "requirements": get_or(&["requirements"], json!([])),
        "roadmap_features": get_or(&["roadmap_features"], json!([])),
        "llm_dependency": get(&["llm_dependency"]),
        "privacy_considerations": get_or(&["privacy_considerations"], json!("")),
        "docker_image_name": get(&["docker_image_name"]),
        "docker_pull_instructions": get(&["docker_pull_instructions"]),
        "docker_run_instructions": get(&["docker_run_instructions"]),
        "setup_instructions": get_or(&["setup_instructions", "setupInstructions"], json!("")),
    })
}

/// Write via a temporary file in the same directory, then rename.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.persist(path)
        .map_err(|e| Error::Io(e.error))?;
    Ok(())
}
