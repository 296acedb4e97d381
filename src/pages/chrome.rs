//! Shared chrome: navigation and footer fragments, mobile menu state.
//!
//! The fragments are fixed HTML injected into the `nav-placeholder` and
//! `footer-placeholder` nodes at page load. Pages live at different depths,
//! so injected relative links are rewritten with the right `../` prefix.

/// Navigation fragment for the `nav-placeholder` node.
pub const NAV_FRAGMENT: &str = r#"<header class="site-header">
  <nav class="desktop-nav">
    <a href="index.html" class="brand">
      <img src="images/logo.svg" alt="AI Agentopia Logo" class="brand-logo">
      <span class="brand-name">AI Agentopia</span>
    </a>
    <div class="nav-links">
      <a href="blog.html" class="nav-link">Blog</a>
      <a href="resources.html" class="nav-link">Resources</a>
      <a href="agents.html" class="nav-link">Agents</a>
      <a href="https://github.com/Agentopia" class="nav-link" target="_blank">GitHub</a>
      <button id="theme-toggle" class="theme-toggle-btn">
        <span class="light-mode-icon">🌞</span>
        <span class="dark-mode-icon">🌙</span>
      </button>
    </div>
  </nav>
  <nav class="mobile-nav">
    <button id="mobile-menu-toggle" class="menu-toggle">☰</button>
    <div id="mobile-menu" class="hidden">
      <button id="mobile-menu-close" class="menu-close">×</button>
      <a href="blog.html" class="nav-link">Blog</a>
      <a href="resources.html" class="nav-link">Resources</a>
      <a href="agents.html" class="nav-link">Agents</a>
      <a href="https://github.com/Agentopia" class="nav-link" target="_blank">GitHub</a>
    </div>
  </nav>
</header>"#;

/// Footer fragment for the `footer-placeholder` node.
pub const FOOTER_FRAGMENT: &str = r#"<footer class="site-footer">
  <div class="footer-grid">
    <div class="footer-about">
      <span class="brand-name">AI Agentopia</span>
      <p>A happy place for all kinds of AI agents.</p>
    </div>
    <div class="footer-links">
      <h3>Quick Links</h3>
      <ul>
        <li><a href="blog.html">Blog</a></li>
        <li><a href="resources.html">Resources</a></li>
        <li><a href="agents.html">Agents</a></li>
        <li><a href="tools/getting-started.html">Documentation</a></li>
      </ul>
    </div>
    <div class="footer-connect">
      <h3>Connect With Us</h3>
      <ul>
        <li><a href="https://x.com/AIMindfully" target="_blank">Twitter</a></li>
        <li><a href="https://www.linkedin.com/company/bixoryai" target="_blank">LinkedIn</a></li>
        <li><a href="https://github.com/Agentopia" target="_blank">GitHub Community</a></li>
      </ul>
    </div>
  </div>
  <div class="footer-legal">
    <a href="privacy-policy.html">Privacy Policy</a>
    <a href="terms-of-service.html">Terms of Service</a>
  </div>
</footer>"#;

/// Navigation fragment with relative links fixed for a page `depth` levels
/// below the site root.
pub fn nav_fragment(depth: usize) -> String {
    rewrite_relative_links(NAV_FRAGMENT, depth)
}

/// Footer fragment with relative links fixed for a page `depth` levels below
/// the site root.
pub fn footer_fragment(depth: usize) -> String {
    rewrite_relative_links(FOOTER_FRAGMENT, depth)
}

/// Prefix relative `href`/`src` values for a page `depth` levels below the
/// site root. Absolute URLs, fragment links, and root-relative paths are
/// left alone.
pub fn rewrite_relative_links(html: &str, depth: usize) -> String {
    let prefix = if depth == 0 {
        "./".to_string()
    } else {
        "../".repeat(depth)
    };

    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    loop {
        let Some(attr_at) = find_link_attr(rest) else {
            out.push_str(rest);
            return out;
        };
        let (before, attr, after_open) = attr_at;
        out.push_str(before);
        out.push_str(attr);
        let Some(close) = after_open.find('"') else {
            out.push_str(after_open);
            return out;
        };
        let value = &after_open[..close];
        if value.starts_with("http://")
            || value.starts_with("https://")
            || value.starts_with('#')
            || value.starts_with('/')
        {
            out.push_str(value);
        } else {
            out.push_str(&prefix);
            out.push_str(value);
        }
        rest = &after_open[close..];
    }
}

/// Find the next `href="` or `src="` in `html`.
///
/// Returns the text before it, the matched attribute prefix (including the
/// opening quote), and the remainder after the opening quote.
fn find_link_attr(html: &str) -> Option<(&str, &str, &str)> {
    let href = html.find("href=\"");
    let src = html.find("src=\"");
    let (at, len) = match (href, src) {
        (Some(h), Some(s)) if s < h => (s, "src=\"".len()),
        (Some(h), _) => (h, "href=\"".len()),
        (None, Some(s)) => (s, "src=\"".len()),
        (None, None) => return None,
    };
    Some((&html[..at], &html[at..at + len], &html[at + len..]))
}

/// Mobile menu open/closed state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    pub open: bool,
}

impl MobileMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle visibility (hamburger button).
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Close explicitly (close button).
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Visibility class for the menu container.
    pub fn visibility_class(&self) -> &'static str {
        if self.open {
            ""
        } else {
            "hidden"
        }
    }
}
