//! Agent catalog: loading, validation, lookup, and filtering.
//!
//! The catalog is a JSON array of agent records fetched fresh per page load.
//! Loading tries a list of sources in order (the original pages attempt a
//! relative path and fall back to an absolute one); validation happens once
//! here at the data boundary so malformed records never reach rendering.

pub mod sync;

use crate::models::AgentRecord;
use crate::{Error, Result};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

/// Sentinel category that matches every record.
pub const ALL_CATEGORY: &str = "All";

/// Where a catalog (or blog) document can be loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Url(String),
}

impl Source {
    /// Classify a CLI/config string: `http(s)://...` is a URL, anything else
    /// is a file path.
    pub fn parse(s: &str) -> Self {
        if s.starts_with("http://") || s.starts_with("https://") {
            Source::Url(s.to_string())
        } else {
            Source::File(PathBuf::from(s))
        }
    }

    /// Fetch the document body.
    pub fn fetch(&self) -> Result<String> {
        match self {
            Source::File(path) => Ok(fs::read_to_string(path)?),
            Source::Url(url) => {
                let body = ureq::get(url)
                    .set("Accept", "application/json")
                    .call()
                    .map_err(Box::new)?
                    .into_string()?;
                Ok(body)
            }
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Validated, ordered collection of agent records.
///
/// Owns the lookup-by-name and prev/next navigation that the pages need,
/// replacing the module-scope `allAgents`/`currentAgentIndex` globals of the
/// original scripts with explicit state.
#[derive(Debug, Default)]
pub struct Catalog {
    agents: Vec<AgentRecord>,
    /// Boundary-validation warnings; informational, never fatal.
    pub warnings: Vec<String>,
}

impl Catalog {
    /// Parse and validate a catalog document.
    ///
    /// Records with a blank name are dropped, later duplicates of a name are
    /// dropped (the first occurrence wins), and each kept record is
    /// normalized. Every repair is reported as a warning.
    pub fn from_json(text: &str) -> Result<Self> {
        let records: Vec<AgentRecord> = serde_json::from_str(text)?;
        let mut warnings = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut agents = Vec::with_capacity(records.len());

        for (idx, mut record) in records.into_iter().enumerate() {
            warnings.append(&mut record.normalize());

            if record.name.is_empty() {
                warnings.push(format!("record #{idx}: blank name, dropped"));
                continue;
            }
            if !seen.insert(record.name.clone()) {
                warnings.push(format!(
                    "duplicate agent name \"{}\", keeping the first occurrence",
                    record.name
                ));
                continue;
            }
            agents.push(record);
        }

        Ok(Self { agents, warnings })
    }

    /// Load the catalog from the first source that yields a parseable
    /// document. Exhausting every candidate is error taxonomy (b): the
    /// caller renders an error panel with the underlying message.
    pub fn load(sources: &[Source]) -> Result<Self> {
        let mut last_error: Option<Error> = None;
        for source in sources {
            match source.fetch().and_then(|text| Self::from_json(&text)) {
                Ok(catalog) => return Ok(catalog),
                Err(e) => last_error = Some(e),
            }
        }
        Err(Error::SourceExhausted {
            what: "agent catalog",
            detail: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no sources configured".to_string()),
        })
    }

    pub fn agents(&self) -> &[AgentRecord] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Look up an agent by its name (the only stable join key).
    pub fn get(&self, name: &str) -> Option<&AgentRecord> {
        self.agents.iter().find(|a| a.name == name)
    }

    /// Position of an agent in catalog order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.agents.iter().position(|a| a.name == name)
    }

    /// The agent before `name` in catalog order; `None` at the first entry.
    pub fn prev(&self, name: &str) -> Option<&AgentRecord> {
        let pos = self.position(name)?;
        if pos == 0 {
            None
        } else {
            self.agents.get(pos - 1)
        }
    }

    /// The agent after `name` in catalog order; `None` at the last entry.
    pub fn next(&self, name: &str) -> Option<&AgentRecord> {
        let pos = self.position(name)?;
        self.agents.get(pos + 1)
    }

    /// Case-insensitive substring search over name, description, and tags.
    /// An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&AgentRecord> {
        let needle = query.to_lowercase();
        self.agents
            .iter()
            .filter(|a| {
                let haystack = format!(
                    "{} {} {}",
                    a.name,
                    a.description,
                    a.tags.join(" ")
                )
                .to_lowercase();
                haystack.contains(&needle)
            })
            .collect()
    }

    /// Filter by category; the `"All"` sentinel returns every record in
    /// catalog order.
    pub fn by_category(&self, category: &str) -> Vec<&AgentRecord> {
        if category == ALL_CATEGORY {
            return self.agents.iter().collect();
        }
        self.agents
            .iter()
            .filter(|a| a.category.as_deref() == Some(category))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::from_json(
            r#"[
                {"name": "Alpha", "description": "Summarizes documents", "category": "Productivity", "tags": ["nlp"]},
                {"name": "Beta", "description": "Watches repos", "category": "DevOps", "tags": ["git", "ci"]},
                {"name": "Gamma", "description": "Chats", "category": "Productivity"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_lookup_and_navigation() {
        let catalog = sample();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.get("Beta").is_some());
        assert!(catalog.get("Delta").is_none());

        assert!(catalog.prev("Alpha").is_none());
        assert_eq!(catalog.next("Alpha").unwrap().name, "Beta");
        assert_eq!(catalog.prev("Gamma").unwrap().name, "Beta");
        assert!(catalog.next("Gamma").is_none());
    }

    #[test]
    fn test_search_case_insensitive_and_empty_query() {
        let catalog = sample();
        assert_eq!(catalog.search("").len(), 3);
        assert_eq!(catalog.search("WATCHES").len(), 1);
        // Tag text is searchable too.
        assert_eq!(catalog.search("nlp")[0].name, "Alpha");
    }

    #[test]
    fn test_by_category_all_sentinel_is_identity() {
        let catalog = sample();
        let all = catalog.by_category(ALL_CATEGORY);
        assert_eq!(all.len(), 3);
        // Unchanged order.
        assert_eq!(all[0].name, "Alpha");
        assert_eq!(all[2].name, "Gamma");

        assert_eq!(catalog.by_category("Productivity").len(), 2);
        assert_eq!(catalog.by_category("Nothing").len(), 0);
    }

    #[test]
    fn test_duplicate_names_keep_first() {
        let catalog = Catalog::from_json(
            r#"[
                {"name": "Alpha", "description": "first"},
                {"name": "Alpha", "description": "second"}
            ]"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("Alpha").unwrap().description, "first");
        assert_eq!(catalog.warnings.len(), 1);
    }

    #[test]
    fn test_blank_name_dropped_with_warning() {
        let catalog = Catalog::from_json(r#"[{"name": "  ", "description": "x"}]"#).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.warnings.len(), 1);
    }

    #[test]
    fn test_load_falls_back_to_next_source() {
        let dir = tempfile::TempDir::new().unwrap();
        let good = dir.path().join("agents-data.json");
        std::fs::write(&good, r#"[{"name": "Alpha", "description": "x"}]"#).unwrap();

        let sources = vec![
            Source::File(dir.path().join("missing.json")),
            Source::File(good),
        ];
        let catalog = Catalog::load(&sources).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_load_exhausted_reports_last_error() {
        let sources = vec![Source::File(PathBuf::from("/nonexistent/a.json"))];
        let err = Catalog::load(&sources).unwrap_err();
        assert!(matches!(err, Error::SourceExhausted { .. }));
    }

    #[test]
    fn test_source_parse() {
        assert_eq!(
            Source::parse("https://example.com/a.json"),
            Source::Url("https://example.com/a.json".to_string())
        );
        assert_eq!(
            Source::parse("js/agents-data.json"),
            Source::File(PathBuf::from("js/agents-data.json"))
        );
    }
}
