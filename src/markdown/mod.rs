//! Markdown-lite renderer for agent descriptions.
//!
//! The portal only needs the restricted subset its catalog content actually
//! uses: `#`/`##`/`###` headers, `**bold**`, `*italic*`, `[text](url)` links,
//! ordered and unordered lists, fenced code blocks, and paragraph/line
//! breaks. Input is parsed into a block/inline node sequence and then
//! serialized to HTML, so later constructs can't be corrupted by earlier
//! substitutions and all text content is escaped exactly once.

mod inline;

pub use inline::{parse_inline, Inline};

/// A block-level markdown node.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// `#`, `##`, or `###` header. Level is 1..=3.
    Heading { level: u8, content: Vec<Inline> },
    /// Consecutive non-blank lines; single newlines become `<br>`.
    Paragraph { lines: Vec<Vec<Inline>> },
    /// Contiguous run of `1. item` or `* item` lines.
    List { ordered: bool, items: Vec<Vec<Inline>> },
    /// Fenced code block. The language tag, if any, is ignored.
    CodeBlock { code: String },
}

/// Render markdown to HTML. Empty input yields an empty string.
pub fn render(text: &str) -> String {
    let mut html = String::new();
    for block in parse(text) {
        block_to_html(&block, &mut html);
    }
    html
}

/// Render optional markdown; `None` and blank input yield an empty string.
pub fn render_opt(text: Option<&str>) -> String {
    match text {
        Some(t) if !t.trim().is_empty() => render(t),
        _ => String::new(),
    }
}

/// Render one inline span (no block structure) into `out`.
pub fn inline_to_html(text: &str, out: &mut String) {
    inline::to_html(&parse_inline(text), out);
}

/// Parse markdown into a block sequence.
pub fn parse(text: &str) -> Vec<Block> {
    let lines: Vec<&str> = text.lines().collect();
    let mut blocks = Vec::new();
    let mut paragraph: Vec<Vec<Inline>> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        // Fenced code closes at the next fence line or end of input.
        if line.trim_start().starts_with("```") {
            flush_paragraph(&mut paragraph, &mut blocks);
            let mut code_lines = Vec::new();
            i += 1;
            while i < lines.len() && !lines[i].trim_start().starts_with("```") {
                code_lines.push(lines[i]);
                i += 1;
            }
            if i < lines.len() {
                i += 1; // consume the closing fence
            }
            blocks.push(Block::CodeBlock {
                code: code_lines.join("\n").trim().to_string(),
            });
            continue;
        }

        if let Some((level, rest)) = heading_line(line) {
            flush_paragraph(&mut paragraph, &mut blocks);
            blocks.push(Block::Heading {
                level,
                content: parse_inline(rest),
            });
            i += 1;
            continue;
        }

        if let Some((ordered, first)) = list_item(line) {
            flush_paragraph(&mut paragraph, &mut blocks);
            let mut items = vec![parse_inline(first)];
            i += 1;
            // A run closes on the first non-matching line; a kind change
            // (ordered vs unordered) starts a separate list.
            while i < lines.len() {
                match list_item(lines[i]) {
                    Some((kind, rest)) if kind == ordered => {
                        items.push(parse_inline(rest));
                        i += 1;
                    }
                    _ => break,
                }
            }
            blocks.push(Block::List { ordered, items });
            continue;
        }

        if line.trim().is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
        } else {
            paragraph.push(parse_inline(line));
        }
        i += 1;
    }

    flush_paragraph(&mut paragraph, &mut blocks);
    blocks
}

fn flush_paragraph(paragraph: &mut Vec<Vec<Inline>>, blocks: &mut Vec<Block>) {
    if !paragraph.is_empty() {
        blocks.push(Block::Paragraph {
            lines: std::mem::take(paragraph),
        });
    }
}

/// Match `# `, `## `, `### ` at line start.
fn heading_line(line: &str) -> Option<(u8, &str)> {
    for level in (1..=3u8).rev() {
        let marker = &"###"[..level as usize];
        if let Some(rest) = line.strip_prefix(marker) {
            if let Some(rest) = rest.strip_prefix(' ') {
                return Some((level, rest));
            }
        }
    }
    None
}

/// Match `<digits>. ` (ordered, true) or `* ` (unordered, false) at line start.
fn list_item(line: &str) -> Option<(bool, &str)> {
    if let Some(rest) = line.strip_prefix("* ") {
        return Some((false, rest));
    }
    let digits = line.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits > 0 {
        if let Some(rest) = line[digits..].strip_prefix(". ") {
            return Some((true, rest));
        }
    }
    None
}

fn block_to_html(block: &Block, out: &mut String) {
    match block {
        Block::Heading { level, content } => {
            out.push_str(&format!("<h{level}>"));
            inline::to_html(content, out);
            out.push_str(&format!("</h{level}>"));
        }
        Block::Paragraph { lines } => {
            out.push_str("<p>");
            for (idx, line) in lines.iter().enumerate() {
                if idx > 0 {
                    out.push_str("<br>");
                }
                inline::to_html(line, out);
            }
            out.push_str("</p>");
        }
        Block::List { ordered, items } => {
            let tag = if *ordered { "ol" } else { "ul" };
            out.push_str(&format!("<{tag}>"));
            for item in items {
                out.push_str("<li>");
                inline::to_html(item, out);
                out.push_str("</li>");
            }
            out.push_str(&format!("</{tag}>"));
        }
        Block::CodeBlock { code } => {
            out.push_str("<pre><code>");
            out.push_str(&escape_html(code));
            out.push_str("</code></pre>");
        }
    }
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(render(""), "");
        assert_eq!(render_opt(None), "");
        assert_eq!(render_opt(Some("   ")), "");
    }

    #[test]
    fn test_bold() {
        assert!(render("**a**").contains("<strong>a</strong>"));
    }

    #[test]
    fn test_italic() {
        assert!(render("*a*").contains("<em>a</em>"));
    }

    #[test]
    fn test_bold_not_consumed_by_italic() {
        // Adjacent bold and italic: the `**` pair must not be half-eaten.
        let html = render("**a***b*");
        assert!(html.contains("<strong>a</strong>"));
        assert!(html.contains("<em>b</em>"));
    }

    #[test]
    fn test_headers() {
        assert_eq!(render("# Title"), "<h1>Title</h1>");
        assert_eq!(render("## Title"), "<h2>Title</h2>");
        assert_eq!(render("### Title"), "<h3>Title</h3>");
    }

    #[test]
    fn test_header_requires_line_start() {
        // A `#` mid-line is plain text.
        assert_eq!(render("a # b"), "<p>a # b</p>");
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(render("1. a\n2. b"), "<ol><li>a</li><li>b</li></ol>");
    }

    #[test]
    fn test_unordered_list() {
        assert_eq!(render("* a\n* b"), "<ul><li>a</li><li>b</li></ul>");
    }

    #[test]
    fn test_mixed_adjacent_lists_split() {
        let html = render("1. a\n* b");
        assert_eq!(html, "<ol><li>a</li></ol><ul><li>b</li></ul>");
    }

    #[test]
    fn test_list_closes_on_non_matching_line() {
        let html = render("1. a\ntext");
        assert_eq!(html, "<ol><li>a</li></ol><p>text</p>");
    }

    #[test]
    fn test_link() {
        assert_eq!(
            render("[docs](https://example.com)"),
            r#"<p><a href="https://example.com" target="_blank">docs</a></p>"#
        );
    }

    #[test]
    fn test_link_inside_list_item() {
        let html = render("* see [docs](https://example.com)");
        assert!(html.contains(r#"<li>see <a href="https://example.com" target="_blank">docs</a></li>"#));
    }

    #[test]
    fn test_code_block_inert_markdown() {
        let html = render("```\n**not bold**\n# not a header\n```");
        assert_eq!(html, "<pre><code>**not bold**\n# not a header</code></pre>");
        assert!(!html.contains("<strong>"));
    }

    #[test]
    fn test_code_block_language_tag_ignored() {
        let html = render("```python\nprint(1)\n```");
        assert_eq!(html, "<pre><code>print(1)</code></pre>");
    }

    #[test]
    fn test_unclosed_fence_runs_to_end() {
        let html = render("```\ncode");
        assert_eq!(html, "<pre><code>code</code></pre>");
    }

    #[test]
    fn test_paragraph_and_line_breaks() {
        // Blank line separates paragraphs; single newline is a hard break.
        assert_eq!(render("a\nb\n\nc"), "<p>a<br>b</p><p>c</p>");
    }

    #[test]
    fn test_plain_text_only_wrapped() {
        // No headers or lists: output differs from input only by paragraph
        // wrapping and emphasis substitution.
        assert_eq!(render("hello world"), "<p>hello world</p>");
    }

    #[test]
    fn test_escaping() {
        assert_eq!(render("a < b & c"), "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn test_bold_inside_heading() {
        assert_eq!(render("## a **b**"), "<h2>a <strong>b</strong></h2>");
    }
}
