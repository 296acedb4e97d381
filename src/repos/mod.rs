//! Organization repository listing.
//!
//! Fetches the public repositories of a GitHub organization and renders them
//! as cards sorted by star count. Network failures surface as an inline error
//! card instead of an empty page.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

const API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("agentopia-portal/", env!("CARGO_PKG_VERSION"));

/// One repository as returned by the GitHub API, trimmed to the fields the
/// cards use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repo {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    pub html_url: String,

    #[serde(rename = "stargazers_count", default)]
    pub stars: u64,

    #[serde(rename = "forks_count", default)]
    pub forks: u64,

    #[serde(default)]
    pub language: Option<String>,

    /// RFC 3339 timestamp from the API.
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Repo {
    /// Date part of `updated_at` for card display.
    pub fn updated_date(&self) -> Option<&str> {
        self.updated_at
            .as_deref()
            .map(|ts| ts.split('T').next().unwrap_or(ts))
    }
}

/// Fetch an organization's public repositories.
pub fn fetch_org_repos(org: &str) -> Result<Vec<Repo>> {
    let url = format!("{API_BASE}/orgs/{org}/repos?per_page=100&type=public");
    let response = ureq::get(&url)
        .set("Accept", "application/vnd.github+json")
        .set("User-Agent", USER_AGENT)
        .call()
        .map_err(Box::new)?;

    let repos: Vec<Repo> = response.into_json().map_err(Error::Io)?;
    Ok(repos)
}

/// Sort repositories by star count, most starred first. Ties keep API order.
pub fn sort_by_stars(repos: &mut [Repo]) {
    repos.sort_by(|a, b| b.stars.cmp(&a.stars));
}

/// Card markup for the repository grid.
pub fn render_cards(repos: &[Repo]) -> String {
    if repos.is_empty() {
        return r#"<p class="empty-note">No public repositories found.</p>"#.to_string();
    }
    let mut html = String::new();
    for repo in repos {
        html.push_str(&render_card(repo));
    }
    html
}

fn render_card(repo: &Repo) -> String {
    use crate::markdown::escape_html;

    let description = repo
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or("No description provided.");
    let language = repo.language.as_deref().unwrap_or("N/A");
    let updated = repo.updated_date().unwrap_or("N/A");

    format!(
        concat!(
            r#"<div class="repo-card">"#,
            r#"<h3><a href="{url}" target="_blank">{name}</a></h3>"#,
            "<p>{description}</p>",
            r#"<div class="repo-meta">"#,
            r#"<span class="repo-language">{language}</span>"#,
            r#"<span class="repo-stars">★ {stars}</span>"#,
            r#"<span class="repo-forks">⑂ {forks}</span>"#,
            r#"<span class="repo-updated">Updated {updated}</span>"#,
            "</div>",
            "</div>"
        ),
        url = escape_html(&repo.html_url),
        name = escape_html(&repo.name),
        description = escape_html(description),
        language = escape_html(language),
        stars = repo.stars,
        forks = repo.forks,
        updated = escape_html(updated),
    )
}

/// Inline error card shown when the listing cannot be fetched.
pub fn render_error(org: &str) -> String {
    format!(
        concat!(
            r#"<div class="repo-error">"#,
            "<p>Could not load repositories for {org}. Please try again later.</p>",
            r#"<a href="https://github.com/{org}" target="_blank">View on GitHub</a>"#,
            "</div>"
        ),
        org = crate::markdown::escape_html(org)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str, stars: u64) -> Repo {
        Repo {
            name: name.to_string(),
            description: None,
            html_url: format!("https://github.com/Agentopia/{name}"),
            stars,
            forks: 0,
            language: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_sort_by_stars_descending() {
        let mut repos = vec![repo("a", 3), repo("b", 10), repo("c", 0)];
        sort_by_stars(&mut repos);
        let names: Vec<&str> = repos.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn test_deserialize_api_shape() {
        let json = r#"{
            "name": "portal",
            "description": "A happy place",
            "html_url": "https://github.com/Agentopia/portal",
            "stargazers_count": 42,
            "forks_count": 7,
            "language": "Rust",
            "updated_at": "2025-06-10T12:34:56Z"
        }"#;
        let repo: Repo = serde_json::from_str(json).unwrap();
        assert_eq!(repo.stars, 42);
        assert_eq!(repo.forks, 7);
        assert_eq!(repo.language.as_deref(), Some("Rust"));
        assert_eq!(repo.updated_date(), Some("2025-06-10"));
    }

    #[test]
    fn test_render_cards_empty_and_fallbacks() {
        assert!(render_cards(&[]).contains("No public repositories"));

        let card = render_cards(&[repo("x", 1)]);
        assert!(card.contains("No description provided."));
        assert!(card.contains("★ 1"));
        assert!(card.contains("N/A"));
        assert!(card.contains("Updated N/A"));
    }

    #[test]
    fn test_render_error_links_to_org() {
        let html = render_error("Agentopia");
        assert!(html.contains("https://github.com/Agentopia"));
        assert!(html.contains("try again later"));
    }
}
