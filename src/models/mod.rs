//! Data models for portal entities.
//!
//! This module defines the typed forms of the documents the portal consumes:
//! - `AgentRecord` - one catalog entry describing an agent
//! - `ConfigField` - one entry of an agent's configuration form
//! - `BlogPost` - blog post metadata for the listing/search page
//!
//! The catalog JSON is produced by the manifest sync and by manually curated
//! entries, so field naming is mixed (camelCase and snake_case) and several
//! fields have more than one historical shape. Shape differences are resolved
//! here with serde aliases and untagged enums; collection-level normalization
//! (duplicate names, flattened docker fields) lives in [`crate::catalog`].

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// One catalog entry describing a third-party or demo AI agent.
///
/// `name` is the only stable identity: the numeric `id` is reassigned by
/// folder enumeration order on every sync run and must never be used as a
/// join key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRecord {
    /// Positional id from the last sync run. Not durable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,

    /// Unique name within the catalog; lookup key and storage-key component.
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,

    /// Classification, e.g. "Assistant" or "Autonomous".
    /// Manual entries may still carry the legacy `type` key.
    #[serde(
        rename = "agentType",
        alias = "type",
        skip_serializing_if = "Option::is_none"
    )]
    pub agent_type: Option<String>,

    /// Complexity scale, e.g. "Single-Agent" or "Advanced".
    #[serde(
        rename = "agentScale",
        alias = "scale",
        skip_serializing_if = "Option::is_none"
    )]
    pub scale: Option<String>,

    #[serde(default)]
    pub description: String,

    /// Markdown body for the detail page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_status: Option<String>,

    /// Demo link. `""` and the `"#"` placeholder are normalized to `None`.
    #[serde(rename = "demoUrl", skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,

    /// Source link. `""` and the `"#"` placeholder are normalized to `None`.
    #[serde(rename = "sourceUrl", skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    /// Star rating, clamped to 0..=5 at the data boundary.
    #[serde(default)]
    pub rating: f64,

    #[serde(default)]
    pub reviews: u64,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub features: Vec<Feature>,

    #[serde(default)]
    pub use_cases: Vec<String>,

    #[serde(default)]
    pub requirements: Vec<String>,

    #[serde(default)]
    pub roadmap_features: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_dependency: Option<LlmDependency>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy_considerations: Option<String>,

    /// Nested docker metadata. The sync output flattens these as
    /// `docker_image_name` etc.; normalization folds the flat fields in here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_info: Option<DockerInfo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_image_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_pull_instructions: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_run_instructions: Option<String>,

    /// Markdown string or structured `{docker, python, general}` sections.
    #[serde(
        alias = "setupInstructions",
        skip_serializing_if = "Option::is_none"
    )]
    pub setup_instructions: Option<SetupInstructions>,

    /// Configuration form fields, persisted per-agent in preference storage.
    #[serde(
        rename = "configFields",
        alias = "config_fields",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub config_fields: Vec<ConfigField>,
}

impl AgentRecord {
    /// Normalize a freshly deserialized record.
    ///
    /// Clamps the rating, folds flattened docker fields into `docker_info`,
    /// drops placeholder URLs, and defaults the emoji. Returns warnings for
    /// anything that had to be repaired.
    pub fn normalize(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();

        self.name = self.name.trim().to_string();

        if !(0.0..=5.0).contains(&self.rating) {
            warnings.push(format!(
                "agent \"{}\": rating {} clamped to 0..=5",
                self.name, self.rating
            ));
            self.rating = self.rating.clamp(0.0, 5.0);
        }

        self.demo_url = take_real_url(self.demo_url.take());
        self.source_url = take_real_url(self.source_url.take());

        // Fold sync-flattened docker fields into the nested struct. Nested
        // values win when both shapes are present.
        let flat_image = self.docker_image_name.take();
        let flat_pull = self.docker_pull_instructions.take();
        let flat_run = self.docker_run_instructions.take();
        if flat_image.is_some() || flat_pull.is_some() || flat_run.is_some() {
            let info = self.docker_info.get_or_insert_with(DockerInfo::default);
            if info.image_name.is_none() {
                info.image_name = flat_image;
            }
            if info.pull_instructions.is_none() {
                info.pull_instructions = flat_pull;
            }
            if info.run_instructions.is_none() {
                info.run_instructions = flat_run;
            }
        }

        if self.emoji.as_deref().map_or(true, |e| e.trim().is_empty()) {
            self.emoji = self.icon.clone().or_else(|| Some("🤖".to_string()));
        }

        warnings
    }

    /// Display emoji, always present after normalization.
    pub fn emoji(&self) -> &str {
        self.emoji.as_deref().unwrap_or("🤖")
    }
}

/// Treat empty strings and the `"#"` placeholder as "no link".
fn take_real_url(url: Option<String>) -> Option<String> {
    url.filter(|u| {
        let u = u.trim();
        !u.is_empty() && u != "#"
    })
}

/// A feature entry: either a bare string or a titled description.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Feature {
    Plain(String),
    Detailed {
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

impl Feature {
    pub fn title(&self) -> &str {
        match self {
            Feature::Plain(s) => s,
            Feature::Detailed { title, .. } => title,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Feature::Plain(_) => None,
            Feature::Detailed { description, .. } => description.as_deref(),
        }
    }
}

/// LLM requirements declared by an agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmDependency {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env_var: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_recommendation: Option<String>,

    /// Markdown notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Docker deployment metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DockerInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,

    /// Markdown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_instructions: Option<String>,

    /// Markdown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_instructions: Option<String>,
}

/// Setup instructions come in two historical shapes: a single markdown
/// string, or per-environment sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SetupInstructions {
    Text(String),
    Structured {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        docker: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        python: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        general: Option<String>,
    },
}

/// Input kind for a configuration form field.
///
/// Unknown kinds deserialize as `Text`, matching how the form renderer treats
/// anything it doesn't recognize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum FieldKind {
    #[default]
    Text,
    Password,
    Select,
}

impl From<String> for FieldKind {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "password" => FieldKind::Password,
            "select" => FieldKind::Select,
            _ => FieldKind::Text,
        }
    }
}

/// One entry of an agent's configuration form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigField {
    pub name: String,

    #[serde(default)]
    pub label: String,

    #[serde(rename = "type", default)]
    pub kind: FieldKind,

    /// Declared default value, used when nothing is stored for the field.
    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    #[serde(default)]
    pub required: bool,

    /// Choices for `select` fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

/// Blog post metadata from the posts document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Publication date; accepts `YYYY-MM-DD` or a full ISO datetime.
    #[serde(deserialize_with = "de_blog_date")]
    pub date: NaiveDate,

    #[serde(default)]
    pub categories: Vec<String>,

    /// Estimated read time in minutes.
    #[serde(rename = "readTime", default)]
    pub read_time: u32,

    /// Flag for prominent display. If several posts carry it, the first one
    /// found wins.
    #[serde(default)]
    pub featured: bool,

    pub url: String,
}

/// The blog metadata document: `{"posts": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogDoc {
    pub posts: Vec<BlogPost>,
}

fn de_blog_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        return Ok(date);
    }
    chrono::DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.date_naive())
        .map_err(|_| serde::de::Error::custom(format!("unparseable date: {raw}")))
}
