//! Blog listing, search, and card rendering.
//!
//! Works over the blog metadata document (`{"posts": [...]}`). Search and
//! category filtering return borrowed views; the grid re-sorts its working
//! set by date descending on every update and shows the featured post
//! separately.

use crate::markdown::escape_html;
use crate::models::{BlogDoc, BlogPost};
use crate::storage::{like_key, PreferenceStore};
use crate::Result;
use std::path::Path;

/// In-memory blog index over the posts document.
#[derive(Debug, Default)]
pub struct BlogIndex {
    posts: Vec<BlogPost>,
}

impl BlogIndex {
    pub fn from_json(text: &str) -> Result<Self> {
        let doc: BlogDoc = serde_json::from_str(text)?;
        Ok(Self { posts: doc.posts })
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn posts(&self) -> &[BlogPost] {
        &self.posts
    }

    /// Case-insensitive substring search over title, description, and
    /// categories. The empty query matches every post.
    pub fn search(&self, query: &str) -> Vec<&BlogPost> {
        let needle = query.to_lowercase();
        self.posts
            .iter()
            .filter(|post| {
                let haystack = format!(
                    "{} {} {}",
                    post.title,
                    post.description,
                    post.categories.join(" ")
                )
                .to_lowercase();
                haystack.contains(&needle)
            })
            .collect()
    }

    /// Filter by category. The `"All"` sentinel returns the full input
    /// sequence in unchanged order; any other value is an exact membership
    /// test against the post's category list.
    pub fn by_category(&self, category: &str) -> Vec<&BlogPost> {
        if category == crate::catalog::ALL_CATEGORY {
            return self.posts.iter().collect();
        }
        self.posts
            .iter()
            .filter(|post| post.categories.iter().any(|c| c == category))
            .collect()
    }

    /// The featured post, if any. When several posts are flagged, the first
    /// one found wins; there is no guaranteed single-winner rule.
    pub fn featured(&self) -> Option<&BlogPost> {
        self.posts.iter().find(|post| post.featured)
    }

    /// The regular grid for a working set: featured posts excluded, sorted
    /// by date descending.
    pub fn grid<'a>(&self, posts: Vec<&'a BlogPost>) -> Vec<&'a BlogPost> {
        let mut regular: Vec<&BlogPost> = posts.into_iter().filter(|p| !p.featured).collect();
        regular.sort_by(|a, b| b.date.cmp(&a.date));
        regular
    }
}

/// Long-format date for cards, e.g. "January 5, 2025".
pub fn format_date(post: &BlogPost) -> String {
    post.date.format("%B %-d, %Y").to_string()
}

/// Render one post card for the regular grid.
pub fn render_card(post: &BlogPost) -> String {
    render_post(post, "blog-card")
}

/// Render the featured post's prominent card.
pub fn render_featured(post: &BlogPost) -> String {
    render_post(post, "featured-post")
}

fn render_post(post: &BlogPost, class: &str) -> String {
    let chips: String = post
        .categories
        .iter()
        .map(|c| format!(r#"<span class="blog-category">{}</span>"#, escape_html(c)))
        .collect();
    format!(
        concat!(
            r#"<article class="{class}">"#,
            r#"<div class="categories">{chips}</div>"#,
            "<h2>{title}</h2>",
            "<p>{description}</p>",
            r#"<div class="meta"><span>{date}</span>"#,
            r#"<span class="read-time">{read_time} min read</span>"#,
            r#"<a href="{url}">Read More →</a></div>"#,
            "</article>"
        ),
        class = class,
        chips = chips,
        title = escape_html(&post.title),
        description = escape_html(&post.description),
        date = format_date(post),
        read_time = post.read_time,
        url = escape_html(&post.url),
    )
}

/// Whether the post at `page_path` is liked.
pub fn is_liked(store: &dyn PreferenceStore, page_path: &str) -> bool {
    store.get(&like_key(page_path)).as_deref() == Some("true")
}

/// Flip the like flag for the post at `page_path`; returns the new state.
pub fn toggle_like(store: &mut dyn PreferenceStore, page_path: &str) -> bool {
    let liked = !is_liked(store, page_path);
    let value = if liked { "true" } else { "false" };
    if let Err(e) = store.set(&like_key(page_path), value) {
        eprintln!("Warning: could not persist like state: {e}");
    }
    liked
}
