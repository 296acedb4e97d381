//! Agentopia portal - typed core for a static content portal.
//!
//! This library provides the logic behind the `portal` CLI tool and the
//! portal pages: agent catalog loading and lookup, a markdown-lite renderer,
//! detail-page population, blog listing/search, shared chrome (navigation,
//! footer, theme), and preference storage.

pub mod action_log;
pub mod blog;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod markdown;
pub mod models;
pub mod pages;
pub mod repos;
pub mod storage;

/// Library-level error type for portal operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] Box<ureq::Error>),

    #[error("Agent \"{0}\" not found")]
    AgentNotFound(String),

    #[error("Failed to load {what} from any source: {detail}")]
    SourceExhausted { what: &'static str, detail: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Preference storage is unavailable")]
    StorageUnavailable,

    #[error("{0}")]
    Other(String),
}

impl From<ureq::Error> for Error {
    fn from(e: ureq::Error) -> Self {
        Error::Http(Box::new(e))
    }
}

/// Result type alias for portal operations.
pub type Result<T> = std::result::Result<T, Error>;
