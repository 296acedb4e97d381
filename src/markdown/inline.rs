//! Inline markdown parsing: bold, italic, and links.
//!
//! Spans are parsed recursively, so a link inside a bold span (or emphasis
//! inside a link label) nests properly instead of depending on substitution
//! order. Unterminated markers fall back to literal text.

use super::escape_html;

/// An inline markdown node.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    Bold(Vec<Inline>),
    Italic(Vec<Inline>),
    Link { text: Vec<Inline>, url: String },
}

/// Parse a single line (or span) of inline markdown.
pub fn parse_inline(text: &str) -> Vec<Inline> {
    let mut nodes = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while !rest.is_empty() {
        // Bold before italic, so `**` is never half-consumed as `*`.
        if let Some(inner_rest) = rest.strip_prefix("**") {
            if let Some(close) = inner_rest.find("**") {
                flush_text(&mut plain, &mut nodes);
                nodes.push(Inline::Bold(parse_inline(&inner_rest[..close])));
                rest = &inner_rest[close + 2..];
                continue;
            }
        } else if let Some(inner_rest) = rest.strip_prefix('*') {
            if let Some(close) = inner_rest.find('*') {
                flush_text(&mut plain, &mut nodes);
                nodes.push(Inline::Italic(parse_inline(&inner_rest[..close])));
                rest = &inner_rest[close + 1..];
                continue;
            }
        } else if let Some((label, url, remainder)) = link_at(rest) {
            flush_text(&mut plain, &mut nodes);
            nodes.push(Inline::Link {
                text: parse_inline(label),
                url: url.to_string(),
            });
            rest = remainder;
            continue;
        }

        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            plain.push(c);
        }
        rest = chars.as_str();
    }

    flush_text(&mut plain, &mut nodes);
    nodes
}

/// Match `[label](url)` at the start of `text`.
///
/// Returns the label, the url, and the remainder after the closing paren.
/// URLs containing unbalanced parentheses are out of scope; the first `)`
/// closes the link.
fn link_at(text: &str) -> Option<(&str, &str, &str)> {
    let inner = text.strip_prefix('[')?;
    let label_end = inner.find(']')?;
    let after_label = inner[label_end + 1..].strip_prefix('(')?;
    let url_end = after_label.find(')')?;
    Some((
        &inner[..label_end],
        &after_label[..url_end],
        &after_label[url_end + 1..],
    ))
}

fn flush_text(plain: &mut String, nodes: &mut Vec<Inline>) {
    if !plain.is_empty() {
        nodes.push(Inline::Text(std::mem::take(plain)));
    }
}

/// Serialize an inline sequence to HTML.
pub fn to_html(nodes: &[Inline], out: &mut String) {
    for node in nodes {
        match node {
            Inline::Text(text) => out.push_str(&escape_html(text)),
            Inline::Bold(inner) => {
                out.push_str("<strong>");
                to_html(inner, out);
                out.push_str("</strong>");
            }
            Inline::Italic(inner) => {
                out.push_str("<em>");
                to_html(inner, out);
                out.push_str("</em>");
            }
            Inline::Link { text, url } => {
                out.push_str(&format!(
                    r#"<a href="{}" target="_blank">"#,
                    escape_html(url)
                ));
                to_html(text, out);
                out.push_str("</a>");
            }
        }
    }
}
