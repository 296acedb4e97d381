//! Detail page population.
//!
//! The agent detail page is a static template with named slots; [`DetailPage`]
//! computes the HTML for every slot from one [`AgentRecord`] plus the agent's
//! stored configuration. Slots a record has no data for get an explicit "not
//! available" placeholder rather than being left empty, and optional sections
//! (setup, docker, LLM notes) report whether they should be hidden entirely.

use crate::markdown;
use crate::models::{AgentRecord, ConfigField, FieldKind, SetupInstructions};
use crate::pages::theme::{scale_color, type_color};
use std::collections::BTreeMap;

/// Placeholder markup for slots with no data.
pub const NA_PLACEHOLDER: &str = r#"<span class="text-muted">N/A</span>"#;

/// Slot ids of the detail template, in template order.
pub const SLOT_IDS: &[&str] = &[
    "agent-hero",
    "agent-long-description",
    "detail-agent-author",
    "detail-agent-version",
    "detail-agent-deployment-status",
    "detail-agent-type",
    "detail-agent-scale",
    "detail-agent-entry-point",
    "agent-features",
    "setup-section",
    "agent-use-cases",
    "agent-requirements",
    "agent-roadmap-features",
    "llm-type",
    "llm-api-key-env-var",
    "llm-model-recommendation",
    "llm-notes-content",
    "privacy-considerations-content",
    "docker-image-name",
    "docker-pull-instructions-content",
    "docker-run-instructions-content",
    "config-form",
];

/// Computed slot contents for one agent's detail page.
#[derive(Debug, Clone)]
pub struct DetailPage {
    /// Page title (`<agent name> - AI Agentopia`).
    pub title: String,
    /// Slot id -> HTML. Every id in [`SLOT_IDS`] is present.
    pub slots: BTreeMap<&'static str, String>,
    /// Sections with no data at all are hidden, not shown as N/A.
    pub hidden_sections: Vec<&'static str>,
}

impl DetailPage {
    /// Compute every slot from an agent record and its stored configuration.
    pub fn populate(agent: &AgentRecord, saved_config: &BTreeMap<String, String>) -> Self {
        let mut slots: BTreeMap<&'static str, String> = BTreeMap::new();
        let mut hidden_sections = Vec::new();

        slots.insert("agent-hero", render_hero(agent));
        slots.insert(
            "agent-long-description",
            non_empty_or_na(markdown::render_opt(agent.long_description.as_deref())),
        );

        slots.insert("detail-agent-author", text_or_na(agent.author.as_deref()));
        slots.insert("detail-agent-version", text_or_na(agent.version.as_deref()));
        slots.insert(
            "detail-agent-deployment-status",
            text_or_na(agent.deployment_status.as_deref()),
        );
        slots.insert(
            "detail-agent-type",
            colored_or_na(agent.agent_type.as_deref(), type_color(agent.agent_type.as_deref())),
        );
        slots.insert(
            "detail-agent-scale",
            colored_or_na(agent.scale.as_deref(), scale_color(agent.scale.as_deref())),
        );
        slots.insert(
            "detail-agent-entry-point",
            match agent.entry_point.as_deref() {
                Some(e) if !e.trim().is_empty() => {
                    format!("<code>{}</code>", markdown::escape_html(e))
                }
                _ => NA_PLACEHOLDER.to_string(),
            },
        );

        slots.insert("agent-features", render_features(agent));

        slots.insert("setup-section", render_setup(agent.setup_instructions.as_ref()));

        slots.insert(
            "agent-use-cases",
            render_string_list(&agent.use_cases, "No use cases listed yet."),
        );
        slots.insert(
            "agent-requirements",
            render_string_list(&agent.requirements, "No special requirements."),
        );
        slots.insert(
            "agent-roadmap-features",
            render_string_list(&agent.roadmap_features, "No roadmap items yet."),
        );

        let llm = agent.llm_dependency.as_ref();
        slots.insert(
            "llm-type",
            text_or_na(llm.and_then(|l| l.kind.as_deref())),
        );
        slots.insert(
            "llm-api-key-env-var",
            match llm.and_then(|l| l.api_key_env_var.as_deref()) {
                Some(v) if !v.trim().is_empty() => {
                    format!("<code>{}</code>", markdown::escape_html(v))
                }
                _ => NA_PLACEHOLDER.to_string(),
            },
        );
        slots.insert(
            "llm-model-recommendation",
            text_or_na(llm.and_then(|l| l.model_recommendation.as_deref())),
        );
        let llm_notes = markdown::render_opt(llm.and_then(|l| l.notes.as_deref()));
        if llm_notes.is_empty() {
            hidden_sections.push("llm-notes-content");
        }
        slots.insert("llm-notes-content", llm_notes);

        slots.insert(
            "privacy-considerations-content",
            non_empty_or_na(markdown::render_opt(
                agent.privacy_considerations.as_deref(),
            )),
        );

        let docker = agent.docker_info.as_ref();
        let image = docker.and_then(|d| d.image_name.as_deref());
        let pull = markdown::render_opt(docker.and_then(|d| d.pull_instructions.as_deref()));
        let run = markdown::render_opt(docker.and_then(|d| d.run_instructions.as_deref()));
        if image.map_or(true, |i| i.trim().is_empty()) && pull.is_empty() && run.is_empty() {
            hidden_sections.push("docker-image-name");
        }
        slots.insert(
            "docker-image-name",
            match image {
                Some(i) if !i.trim().is_empty() => {
                    format!("<code>{}</code>", markdown::escape_html(i))
                }
                _ => NA_PLACEHOLDER.to_string(),
            },
        );
        slots.insert("docker-pull-instructions-content", pull);
        slots.insert("docker-run-instructions-content", run);

        slots.insert("config-form", render_config_form(&agent.config_fields, saved_config));

        // Every declared slot gets a value even if a future template adds one
        // this populate doesn't know about yet.
        for id in SLOT_IDS {
            slots.entry(id).or_insert_with(|| NA_PLACEHOLDER.to_string());
        }

        Self {
            title: format!("{} - AI Agentopia", agent.name),
            slots,
            hidden_sections,
        }
    }

    /// Error panel shown when the page was opened without a `name` parameter.
    pub fn missing_name() -> String {
        error_panel("No agent specified. Please select an agent from the agents page.")
    }

    /// Error panel shown when the named agent is not in the catalog.
    pub fn not_found(name: &str) -> String {
        error_panel(&format!(
            "Agent \"{}\" was not found in the catalog.",
            markdown::escape_html(name)
        ))
    }

    /// Error panel shown when no catalog source could be loaded. Carries the
    /// underlying failure so the reader can see what went wrong.
    pub fn load_failed(err: &str) -> String {
        error_panel(&format!(
            "Failed to load agent data: {}. Please try again later.",
            markdown::escape_html(err)
        ))
    }
}

fn error_panel(message: &str) -> String {
    format!(
        concat!(
            r#"<div class="error-panel">"#,
            "<p>{}</p>",
            r#"<a href="agents.html" class="back-link">&larr; Back to Agents</a>"#,
            "</div>"
        ),
        message
    )
}

fn render_hero(agent: &AgentRecord) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        r#"<span class="agent-emoji">{}</span><h1>{}</h1>"#,
        markdown::escape_html(agent.emoji()),
        markdown::escape_html(&agent.name)
    ));
    let mut chips = String::new();
    if let Some(t) = agent.agent_type.as_deref() {
        chips.push_str(&format!(
            r#"<span class="chip {}">{}</span>"#,
            type_color(Some(t)),
            markdown::escape_html(t)
        ));
    }
    if let Some(s) = agent.scale.as_deref() {
        chips.push_str(&format!(
            r#"<span class="chip {}">{}</span>"#,
            scale_color(Some(s)),
            markdown::escape_html(s)
        ));
    }
    if let Some(c) = agent.category.as_deref() {
        chips.push_str(&format!(
            r#"<span class="chip">{}</span>"#,
            markdown::escape_html(c)
        ));
    }
    if let Some(v) = agent.version.as_deref() {
        chips.push_str(&format!(
            r#"<span class="chip">v{}</span>"#,
            markdown::escape_html(v)
        ));
    }
    if !chips.is_empty() {
        html.push_str(&format!(r#"<div class="agent-chips">{chips}</div>"#));
    }
    html.push_str(&format!(
        r#"<p class="agent-description">{}</p>"#,
        markdown::escape_html(&agent.description)
    ));
    html.push_str(&format!(
        r#"<div class="agent-rating">{} <span class="review-count">{}</span></div>"#,
        star_rating(agent.rating),
        format_reviews(agent.reviews)
    ));
    // No tags, no container: an empty chip row leaves layout artifacts.
    if !agent.tags.is_empty() {
        html.push_str(r#"<div class="agent-tags">"#);
        for tag in &agent.tags {
            html.push_str(&format!(
                r#"<span class="tag">{}</span>"#,
                markdown::escape_html(tag)
            ));
        }
        html.push_str("</div>");
    }
    let mut links = String::new();
    if let Some(url) = &agent.demo_url {
        links.push_str(&format!(
            r#"<a href="{}" class="btn btn-primary" target="_blank">Live Demo</a>"#,
            markdown::escape_html(url)
        ));
    }
    if let Some(url) = &agent.source_url {
        links.push_str(&format!(
            r#"<a href="{}" class="btn btn-secondary" target="_blank">View Source</a>"#,
            markdown::escape_html(url)
        ));
    }
    if !links.is_empty() {
        html.push_str(&format!(r#"<div class="agent-links">{links}</div>"#));
    }
    html
}

/// Five-star markup: full stars, one half star when the fraction reaches 0.5,
/// empty stars for the rest.
pub fn star_rating(rating: f64) -> String {
    let rating = rating.clamp(0.0, 5.0);
    let full = rating.floor() as usize;
    let half = rating - rating.floor() >= 0.5;
    let empty = 5 - full - usize::from(half);

    let mut html = String::from(r#"<span class="stars">"#);
    for _ in 0..full {
        html.push_str(r#"<i class="star full">★</i>"#);
    }
    if half {
        html.push_str(r#"<i class="star half">★</i>"#);
    }
    for _ in 0..empty {
        html.push_str(r#"<i class="star empty">☆</i>"#);
    }
    html.push_str("</span>");
    html
}

/// Human review count: `999 reviews`, `1.2k reviews`, `3.4M reviews`.
pub fn format_reviews(count: u64) -> String {
    let noun = if count == 1 { "review" } else { "reviews" };
    if count >= 1_000_000 {
        format!("{:.1}M {noun}", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}k {noun}", count as f64 / 1_000.0)
    } else {
        format!("{count} {noun}")
    }
}

fn render_features(agent: &AgentRecord) -> String {
    if agent.features.is_empty() {
        return r#"<p class="empty-note">No features listed yet.</p>"#.to_string();
    }
    let mut html = String::from("<ul>");
    for feature in &agent.features {
        html.push_str("<li>");
        html.push_str(&format!(
            "<strong>{}</strong>",
            markdown::escape_html(feature.title())
        ));
        if let Some(desc) = feature.description() {
            html.push_str(&format!(": {}", markdown::escape_html(desc)));
        }
        html.push_str("</li>");
    }
    html.push_str("</ul>");
    html
}

/// Setup section body.
///
/// Structured instructions render the Docker and Python sections; `general`
/// is the fallback shown only when neither is present. Absent instructions
/// get the empty-state message.
fn render_setup(setup: Option<&SetupInstructions>) -> String {
    const EMPTY: &str = r#"<p class="empty-note">No setup instructions provided.</p>"#;
    let html = match setup {
        None => String::new(),
        Some(SetupInstructions::Text(text)) => markdown::render_opt(Some(text)),
        Some(SetupInstructions::Structured {
            docker,
            python,
            general,
        }) => {
            let mut html = String::new();
            for (label, body) in [("Docker", docker), ("Python", python)] {
                let rendered = markdown::render_opt(body.as_deref());
                if rendered.is_empty() {
                    continue;
                }
                html.push_str(&format!(
                    r#"<div class="setup-subsection"><h4>{label}</h4>{rendered}</div>"#
                ));
            }
            if html.is_empty() {
                html = markdown::render_opt(general.as_deref());
            }
            html
        }
    };
    if html.is_empty() {
        EMPTY.to_string()
    } else {
        html
    }
}

/// Items may carry inline markdown (`**bold**`, links), so each goes through
/// the inline renderer rather than plain escaping.
fn render_string_list(items: &[String], empty_message: &str) -> String {
    if items.is_empty() {
        return format!(r#"<p class="empty-note">{empty_message}</p>"#);
    }
    let mut html = String::from("<ul>");
    for item in items {
        html.push_str("<li>");
        markdown::inline_to_html(item, &mut html);
        html.push_str("</li>");
    }
    html.push_str("</ul>");
    html
}

/// Configuration form markup.
///
/// Field value priority: stored value > declared default > empty. Unknown
/// field kinds already collapsed to `Text` at deserialization.
pub fn render_config_form(
    fields: &[ConfigField],
    saved: &BTreeMap<String, String>,
) -> String {
    if fields.is_empty() {
        return r#"<p class="empty-note">This agent has no configurable options.</p>"#.to_string();
    }

    let mut html = String::from(r#"<form id="agent-config">"#);
    for field in fields {
        let value = saved
            .get(&field.name)
            .map(String::as_str)
            .or(field.default_value.as_deref())
            .unwrap_or("");
        let required = if field.required { " required" } else { "" };
        let label = if field.label.is_empty() {
            &field.name
        } else {
            &field.label
        };

        html.push_str(r#"<div class="config-field">"#);
        html.push_str(&format!(
            r#"<label for="cfg-{name}">{label}</label>"#,
            name = markdown::escape_html(&field.name),
            label = markdown::escape_html(label)
        ));
        match field.kind {
            FieldKind::Select => {
                html.push_str(&format!(
                    r#"<select id="cfg-{name}" name="{name}"{required}>"#,
                    name = markdown::escape_html(&field.name)
                ));
                for option in &field.options {
                    let selected = if option == value { " selected" } else { "" };
                    html.push_str(&format!(
                        r#"<option value="{v}"{selected}>{v}</option>"#,
                        v = markdown::escape_html(option)
                    ));
                }
                html.push_str("</select>");
            }
            FieldKind::Password | FieldKind::Text => {
                let input_type = if field.kind == FieldKind::Password {
                    "password"
                } else {
                    "text"
                };
                html.push_str(&format!(
                    r#"<input type="{input_type}" id="cfg-{name}" name="{name}" value="{value}"{required}>"#,
                    name = markdown::escape_html(&field.name),
                    value = markdown::escape_html(value)
                ));
            }
        }
        html.push_str("</div>");
    }
    html.push_str(r#"<button type="submit" class="btn btn-primary">Save Configuration</button></form>"#);
    html
}

fn text_or_na(text: Option<&str>) -> String {
    match text {
        Some(t) if !t.trim().is_empty() => markdown::escape_html(t),
        _ => NA_PLACEHOLDER.to_string(),
    }
}

fn colored_or_na(text: Option<&str>, color_class: &str) -> String {
    match text {
        Some(t) if !t.trim().is_empty() => format!(
            r#"<span class="{color_class}">{}</span>"#,
            markdown::escape_html(t)
        ),
        _ => NA_PLACEHOLDER.to_string(),
    }
}

fn non_empty_or_na(html: String) -> String {
    if html.is_empty() {
        NA_PLACEHOLDER.to_string()
    } else {
        html
    }
}
