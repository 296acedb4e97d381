//! CLI argument definitions for the portal.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Agentopia portal - render and query the static agent portal from the
/// command line.
///
/// Output is JSON by default; pass `-H` for human-readable text.
#[derive(Parser, Debug)]
#[command(name = "portal")]
#[command(author, version, about = "Query and render the Agentopia agent portal", long_about = None)]
#[command(long_version = concat!(
    env!("CARGO_PKG_VERSION"),
    " (", env!("PORTAL_GIT_COMMIT"), ", built ", env!("PORTAL_BUILD_TIMESTAMP"), ")"
))]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Catalog source (file path or URL) to use instead of the configured
    /// fallback list. Can also be set via PORTAL_CATALOG.
    #[arg(long = "catalog", global = true, env = "PORTAL_CATALOG")]
    pub catalog: Option<String>,

    /// Blog metadata file to use instead of the configured path. Can also be
    /// set via PORTAL_BLOG.
    #[arg(long = "blog", global = true)]
    pub blog: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Agent catalog commands
    Agent {
        #[command(subcommand)]
        command: AgentCommands,
    },

    /// Blog listing commands
    Blog {
        #[command(subcommand)]
        command: BlogCommands,
    },

    /// Render markdown from a file or stdin to HTML
    Render {
        /// Input file; reads stdin when omitted
        file: Option<PathBuf>,
    },

    /// Stored agent configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Theme preference commands
    Theme {
        #[command(subcommand)]
        command: ThemeCommands,
    },

    /// Regenerate the catalog from per-agent manifest files
    Sync {
        /// Directory containing one folder per agent with an agent.json
        #[arg(long = "agents-dir", default_value = "agents")]
        agents_dir: PathBuf,

        /// Catalog file to update
        #[arg(long = "out", default_value = "public/data/agents-data.json")]
        out: PathBuf,
    },

    /// List an organization's public GitHub repositories by stars
    Repos {
        /// GitHub organization (defaults to the configured one)
        #[arg(long)]
        org: Option<String>,
    },
}

/// Agent catalog commands
#[derive(Subcommand, Debug)]
pub enum AgentCommands {
    /// List agents, optionally filtered
    List {
        /// Case-insensitive search over name, description, and tags
        #[arg(long)]
        query: Option<String>,

        /// Category filter ("All" matches everything)
        #[arg(long)]
        category: Option<String>,
    },

    /// Show one agent's detail page slots
    Show {
        /// Agent name
        name: String,
    },

    /// Load the catalog and report normalization warnings
    Validate,
}

/// Blog listing commands
#[derive(Subcommand, Debug)]
pub enum BlogCommands {
    /// List posts, newest first
    List {
        /// Case-insensitive search over title, description, and categories
        #[arg(long)]
        query: Option<String>,

        /// Category filter ("All" matches everything)
        #[arg(long)]
        category: Option<String>,
    },

    /// Show the featured post
    Featured,
}

/// Stored agent configuration commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show an agent's stored configuration
    Get {
        /// Agent name
        name: String,
    },

    /// Store one configuration value for an agent
    Set {
        /// Agent name
        name: String,

        /// Field name
        field: String,

        /// Value to store
        value: String,
    },

    /// Show an agent's rendered configuration form
    Show {
        /// Agent name
        name: String,
    },
}

/// Theme preference commands
#[derive(Subcommand, Debug)]
pub enum ThemeCommands {
    /// Show the effective theme
    Get,

    /// Flip between light and dark and persist the choice
    Toggle,
}
