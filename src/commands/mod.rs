//! Command implementations for the portal CLI.
//!
//! Each command returns a result struct implementing [`Output`], which the
//! binary prints as JSON (default) or human-readable text (`-H`). Commands
//! hold the business logic; argument parsing lives in [`crate::cli`] and
//! printing/exit handling in the binary.

use crate::blog::{self, BlogIndex};
use crate::catalog::sync::{sync_catalog, SyncReport};
use crate::catalog::{Catalog, Source};
use crate::models::{AgentRecord, BlogPost};
use crate::pages::{DetailPage, ThemeController};
use crate::repos::{self, Repo};
use crate::storage::{load_agent_config, save_agent_config, PreferenceStore};
use crate::{Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

fn to_json_pretty<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Load the catalog from an ordered source list.
pub fn load_catalog(sources: &[String]) -> Result<Catalog> {
    let sources: Vec<Source> = sources.iter().map(|s| Source::parse(s)).collect();
    Catalog::load(&sources)
}

// --- agent list ---

#[derive(Debug, Serialize)]
pub struct AgentListResult {
    pub count: usize,
    pub agents: Vec<AgentRecord>,
}

pub fn agent_list(
    catalog: &Catalog,
    search: Option<&str>,
    category: Option<&str>,
) -> AgentListResult {
    let mut agents: Vec<&AgentRecord> = catalog.search(search.unwrap_or(""));
    if let Some(category) = category {
        let filtered = catalog.by_category(category);
        agents.retain(|a| filtered.iter().any(|f| f.name == a.name));
    }
    AgentListResult {
        count: agents.len(),
        agents: agents.into_iter().cloned().collect(),
    }
}

impl Output for AgentListResult {
    fn to_json(&self) -> String {
        to_json_pretty(self)
    }

    fn to_human(&self) -> String {
        if self.agents.is_empty() {
            return "No agents found matching your criteria.".to_string();
        }
        let mut out = format!("{} agent(s):\n", self.count);
        for agent in &self.agents {
            out.push_str(&format!(
                "  {} {} [{}] {:.1}★ - {}\n",
                agent.emoji(),
                agent.name,
                agent.category.as_deref().unwrap_or("Uncategorized"),
                agent.rating,
                agent.description
            ));
        }
        out.trim_end().to_string()
    }
}

// --- agent show ---

#[derive(Debug, Serialize)]
pub struct AgentShowResult {
    pub title: String,
    pub slots: BTreeMap<&'static str, String>,
    pub hidden_sections: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

pub fn agent_show(
    catalog: &Catalog,
    store: &dyn PreferenceStore,
    name: &str,
) -> Result<AgentShowResult> {
    let agent = catalog
        .get(name)
        .ok_or_else(|| Error::AgentNotFound(name.to_string()))?;
    let saved = load_agent_config(store, &agent.name);
    let page = DetailPage::populate(agent, &saved);
    Ok(AgentShowResult {
        title: page.title,
        slots: page.slots,
        hidden_sections: page.hidden_sections,
        prev: catalog.prev(name).map(|a| a.name.clone()),
        next: catalog.next(name).map(|a| a.name.clone()),
    })
}

impl Output for AgentShowResult {
    fn to_json(&self) -> String {
        to_json_pretty(self)
    }

    fn to_human(&self) -> String {
        let mut out = format!("{}\n", self.title);
        for (id, html) in &self.slots {
            if self.hidden_sections.contains(id) {
                continue;
            }
            out.push_str(&format!("\n[{id}]\n{html}\n"));
        }
        out.trim_end().to_string()
    }
}

// --- agent validate ---

#[derive(Debug, Serialize)]
pub struct ValidateResult {
    pub agents: usize,
    pub warnings: Vec<String>,
}

pub fn agent_validate(catalog: &Catalog) -> ValidateResult {
    ValidateResult {
        agents: catalog.len(),
        warnings: catalog.warnings.clone(),
    }
}

impl Output for ValidateResult {
    fn to_json(&self) -> String {
        to_json_pretty(self)
    }

    fn to_human(&self) -> String {
        let mut out = format!("{} agent(s) loaded", self.agents);
        if self.warnings.is_empty() {
            out.push_str(", no warnings.");
        } else {
            out.push_str(&format!(", {} warning(s):\n", self.warnings.len()));
            for warning in &self.warnings {
                out.push_str(&format!("  - {warning}\n"));
            }
        }
        out.trim_end().to_string()
    }
}

// --- blog ---

#[derive(Debug, Serialize)]
pub struct BlogListResult {
    pub count: usize,
    pub posts: Vec<BlogPost>,
}

pub fn blog_list(
    index: &BlogIndex,
    search: Option<&str>,
    category: Option<&str>,
) -> BlogListResult {
    let mut posts: Vec<&BlogPost> = index.search(search.unwrap_or(""));
    if let Some(category) = category {
        let filtered = index.by_category(category);
        posts.retain(|p| filtered.iter().any(|f| f.url == p.url));
    }
    posts.sort_by(|a, b| b.date.cmp(&a.date));
    BlogListResult {
        count: posts.len(),
        posts: posts.into_iter().cloned().collect(),
    }
}

impl Output for BlogListResult {
    fn to_json(&self) -> String {
        to_json_pretty(self)
    }

    fn to_human(&self) -> String {
        if self.posts.is_empty() {
            return "No posts found matching your criteria.".to_string();
        }
        let mut out = format!("{} post(s):\n", self.count);
        for post in &self.posts {
            out.push_str(&format!(
                "  {} - {} ({} min read)\n",
                blog::format_date(post),
                post.title,
                post.read_time
            ));
        }
        out.trim_end().to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct BlogFeaturedResult {
    pub post: BlogPost,
    pub card: String,
}

pub fn blog_featured(index: &BlogIndex) -> Result<BlogFeaturedResult> {
    let post = index
        .featured()
        .ok_or_else(|| Error::InvalidInput("no featured post".to_string()))?;
    Ok(BlogFeaturedResult {
        card: blog::render_featured(post),
        post: post.clone(),
    })
}

impl Output for BlogFeaturedResult {
    fn to_json(&self) -> String {
        to_json_pretty(self)
    }

    fn to_human(&self) -> String {
        format!(
            "Featured: {} ({})\n{}",
            self.post.title,
            blog::format_date(&self.post),
            self.post.description
        )
    }
}

// --- render ---

#[derive(Debug, Serialize)]
pub struct RenderResult {
    pub html: String,
}

/// Render markdown from a file, or stdin when no file is given.
pub fn render(file: Option<&Path>) -> Result<RenderResult> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(RenderResult {
        html: crate::markdown::render(&text),
    })
}

impl Output for RenderResult {
    fn to_json(&self) -> String {
        to_json_pretty(self)
    }

    fn to_human(&self) -> String {
        self.html.clone()
    }
}

// --- config ---

#[derive(Debug, Serialize)]
pub struct ConfigGetResult {
    pub agent: String,
    pub values: BTreeMap<String, String>,
}

pub fn config_get(store: &dyn PreferenceStore, catalog: &Catalog, name: &str) -> Result<ConfigGetResult> {
    let agent = catalog
        .get(name)
        .ok_or_else(|| Error::AgentNotFound(name.to_string()))?;
    Ok(ConfigGetResult {
        agent: agent.name.clone(),
        values: load_agent_config(store, &agent.name),
    })
}

impl Output for ConfigGetResult {
    fn to_json(&self) -> String {
        to_json_pretty(self)
    }

    fn to_human(&self) -> String {
        if self.values.is_empty() {
            return format!("No stored configuration for \"{}\".", self.agent);
        }
        let mut out = format!("Configuration for \"{}\":\n", self.agent);
        for (field, value) in &self.values {
            out.push_str(&format!("  {field} = {value}\n"));
        }
        out.trim_end().to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct ConfigSetResult {
    pub agent: String,
    pub field: String,
    pub saved: bool,
}

pub fn config_set(
    store: &mut dyn PreferenceStore,
    catalog: &Catalog,
    name: &str,
    field: &str,
    value: &str,
) -> Result<ConfigSetResult> {
    let agent = catalog
        .get(name)
        .ok_or_else(|| Error::AgentNotFound(name.to_string()))?;
    let mut values = load_agent_config(store, &agent.name);
    values.insert(field.to_string(), value.to_string());
    save_agent_config(store, &agent.name, &values)?;
    Ok(ConfigSetResult {
        agent: agent.name.clone(),
        field: field.to_string(),
        saved: true,
    })
}

impl Output for ConfigSetResult {
    fn to_json(&self) -> String {
        to_json_pretty(self)
    }

    fn to_human(&self) -> String {
        format!("Saved {} for \"{}\".", self.field, self.agent)
    }
}

#[derive(Debug, Serialize)]
pub struct ConfigShowResult {
    pub agent: String,
    pub form: String,
}

/// Render the agent's configuration form with stored values filled in.
pub fn config_show(store: &dyn PreferenceStore, catalog: &Catalog, name: &str) -> Result<ConfigShowResult> {
    let agent = catalog
        .get(name)
        .ok_or_else(|| Error::AgentNotFound(name.to_string()))?;
    let saved = load_agent_config(store, &agent.name);
    Ok(ConfigShowResult {
        agent: agent.name.clone(),
        form: crate::pages::detail::render_config_form(&agent.config_fields, &saved),
    })
}

impl Output for ConfigShowResult {
    fn to_json(&self) -> String {
        to_json_pretty(self)
    }

    fn to_human(&self) -> String {
        self.form.clone()
    }
}

// --- theme ---

#[derive(Debug, Serialize)]
pub struct ThemeResult {
    pub theme: String,
    pub stored: bool,
}

pub fn theme_get<S: PreferenceStore>(controller: &ThemeController<S>) -> ThemeResult {
    ThemeResult {
        theme: controller.current().as_str().to_string(),
        stored: controller.stored().is_some(),
    }
}

pub fn theme_toggle<S: PreferenceStore>(controller: &mut ThemeController<S>) -> ThemeResult {
    let theme = controller.toggle();
    ThemeResult {
        theme: theme.as_str().to_string(),
        stored: controller.stored().is_some(),
    }
}

impl Output for ThemeResult {
    fn to_json(&self) -> String {
        to_json_pretty(self)
    }

    fn to_human(&self) -> String {
        let source = if self.stored { "saved" } else { "default" };
        format!("Theme: {} ({source})", self.theme)
    }
}

// --- sync ---

#[derive(Debug, Serialize)]
pub struct SyncResult {
    #[serde(flatten)]
    pub report: SyncReport,
}

pub fn sync(agents_dir: &Path, out: &Path) -> Result<SyncResult> {
    let report = sync_catalog(agents_dir, out)?;
    Ok(SyncResult { report })
}

impl Output for SyncResult {
    fn to_json(&self) -> String {
        to_json_pretty(self)
    }

    fn to_human(&self) -> String {
        format!(
            "Scanned {} manifest(s): {} added, {} updated, {} skipped. Catalog now has {} agent(s).",
            self.report.scanned,
            self.report.added.len(),
            self.report.updated.len(),
            self.report.skipped.len(),
            self.report.total
        )
    }
}

// --- repos ---

#[derive(Debug, Serialize)]
pub struct ReposResult {
    pub org: String,
    pub count: usize,
    pub repos: Vec<Repo>,
}

pub fn org_repos(org: &str) -> Result<ReposResult> {
    let mut list = repos::fetch_org_repos(org)?;
    repos::sort_by_stars(&mut list);
    Ok(ReposResult {
        org: org.to_string(),
        count: list.len(),
        repos: list,
    })
}

impl Output for ReposResult {
    fn to_json(&self) -> String {
        to_json_pretty(self)
    }

    fn to_human(&self) -> String {
        if self.repos.is_empty() {
            return format!("No public repositories found for {}.", self.org);
        }
        let mut out = format!("{} repositories in {}:\n", self.count, self.org);
        for repo in &self.repos {
            out.push_str(&format!(
                "  ★{:<5} {} - {}\n",
                repo.stars,
                repo.name,
                repo.description.as_deref().unwrap_or("(no description)")
            ));
        }
        out.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    const CATALOG: &str = r#"[
        {"name": "Data Analyzer", "category": "Analytics", "description": "Analyzes data",
         "tags": ["data"], "rating": 4.5,
         "configFields": [{"name": "apiKey", "type": "password"}]},
        {"name": "Writer Bot", "category": "Content", "description": "Writes things",
         "tags": ["text"], "rating": 3.0}
    ]"#;

    fn catalog() -> Catalog {
        Catalog::from_json(CATALOG).unwrap()
    }

    #[test]
    fn test_agent_list_filters_compose() {
        let catalog = catalog();
        assert_eq!(agent_list(&catalog, None, None).count, 2);
        assert_eq!(agent_list(&catalog, Some("data"), None).count, 1);
        assert_eq!(agent_list(&catalog, None, Some("Content")).count, 1);
        assert_eq!(agent_list(&catalog, None, Some("All")).count, 2);
        assert_eq!(agent_list(&catalog, Some("data"), Some("Content")).count, 0);
    }

    #[test]
    fn test_agent_show_unknown_name_errors() {
        let catalog = catalog();
        let store = MemoryStore::new();
        let err = agent_show(&catalog, &store, "Ghost").unwrap_err();
        assert!(matches!(err, Error::AgentNotFound(_)));
    }

    #[test]
    fn test_agent_show_neighbors() {
        let catalog = catalog();
        let store = MemoryStore::new();
        let result = agent_show(&catalog, &store, "Data Analyzer").unwrap();
        assert!(result.prev.is_none());
        assert_eq!(result.next.as_deref(), Some("Writer Bot"));
    }

    #[test]
    fn test_config_set_then_get_roundtrip() {
        let catalog = catalog();
        let mut store = MemoryStore::new();
        config_set(&mut store, &catalog, "Data Analyzer", "apiKey", "sk-1").unwrap();
        let got = config_get(&store, &catalog, "Data Analyzer").unwrap();
        assert_eq!(got.values.get("apiKey").map(String::as_str), Some("sk-1"));
        // The rendered form picks the stored value up.
        let form = config_show(&store, &catalog, "Data Analyzer").unwrap();
        assert!(form.form.contains("sk-1"));
    }

    #[test]
    fn test_theme_toggle_output() {
        let mut controller = ThemeController::init(MemoryStore::new(), None);
        let result = theme_get(&controller);
        assert_eq!(result.theme, "light");
        assert!(!result.stored);

        let result = theme_toggle(&mut controller);
        assert_eq!(result.theme, "dark");
        assert!(result.stored);
    }

    #[test]
    fn test_human_output_empty_states() {
        let catalog = catalog();
        let empty = agent_list(&catalog, Some("zzz"), None);
        assert!(empty.to_human().contains("No agents found"));
        assert!(empty.to_json().contains("\"count\": 0"));
    }
}
