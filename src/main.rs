//! Agentopia portal CLI.

use clap::Parser;
use portal::action_log::{self, ActionEntry};
use portal::cli::{
    AgentCommands, BlogCommands, Cli, Commands, ConfigCommands, ThemeCommands,
};
use portal::commands::{self, Output};
use portal::config::PortalConfig;
use portal::pages::ThemeController;
use portal::storage::FileStore;
use std::process;
use std::time::Instant;

fn main() {
    let cli = Cli::parse();
    let human = cli.human_readable;

    let (cmd_name, cmd_args) = describe_command(&cli.command);

    let start = Instant::now();
    let result = run_command(&cli, human);
    let duration = start.elapsed().as_millis() as u64;

    let (success, error) = match &result {
        Ok(_) => (true, None),
        Err(e) => (false, Some(e.to_string())),
    };

    // Best-effort; never affects the command outcome.
    action_log::record(&ActionEntry::new(
        &cmd_name, &cmd_args, success, error, duration,
    ));

    if let Err(e) = result {
        if human {
            eprintln!("Error: {}", e);
        } else {
            eprintln!(
                "{}",
                serde_json::json!({ "error": e.to_string() })
            );
        }
        process::exit(1);
    }
}

fn run_command(cli: &Cli, human: bool) -> Result<(), portal::Error> {
    let config = PortalConfig::load();
    let catalog_flag = cli.catalog.as_deref();

    match &cli.command {
        Commands::Agent { command } => {
            let catalog =
                commands::load_catalog(&config.resolve_catalog_sources(catalog_flag))?;
            match command {
                AgentCommands::List { query, category } => {
                    let result =
                        commands::agent_list(&catalog, query.as_deref(), category.as_deref());
                    output(&result, human);
                }
                AgentCommands::Show { name } => {
                    let store = FileStore::open_default();
                    let result = commands::agent_show(&catalog, &store, name)?;
                    output(&result, human);
                }
                AgentCommands::Validate => {
                    let result = commands::agent_validate(&catalog);
                    output(&result, human);
                }
            }
        }

        Commands::Blog { command } => {
            let path = config.resolve_blog_path(cli.blog.as_deref());
            let index = portal::blog::BlogIndex::load(path.as_ref())?;
            match command {
                BlogCommands::List { query, category } => {
                    let result =
                        commands::blog_list(&index, query.as_deref(), category.as_deref());
                    output(&result, human);
                }
                BlogCommands::Featured => {
                    let result = commands::blog_featured(&index)?;
                    output(&result, human);
                }
            }
        }

        Commands::Render { file } => {
            let result = commands::render(file.as_deref())?;
            output(&result, human);
        }

        Commands::Config { command } => {
            let catalog =
                commands::load_catalog(&config.resolve_catalog_sources(catalog_flag))?;
            let mut store = FileStore::open_default();
            match command {
                ConfigCommands::Get { name } => {
                    let result = commands::config_get(&store, &catalog, name)?;
                    output(&result, human);
                }
                ConfigCommands::Set { name, field, value } => {
                    let result =
                        commands::config_set(&mut store, &catalog, name, field, value)?;
                    output(&result, human);
                }
                ConfigCommands::Show { name } => {
                    let result = commands::config_show(&store, &catalog, name)?;
                    output(&result, human);
                }
            }
        }

        Commands::Theme { command } => {
            let store = FileStore::open_default();
            // The configured default stands in for the system preference.
            let fallback = config
                .default_theme
                .as_deref()
                .and_then(portal::pages::theme::Theme::parse);
            let mut controller = ThemeController::init(store, fallback);
            match command {
                ThemeCommands::Get => {
                    let result = commands::theme_get(&controller);
                    output(&result, human);
                }
                ThemeCommands::Toggle => {
                    let result = commands::theme_toggle(&mut controller);
                    output(&result, human);
                }
            }
        }

        Commands::Sync { agents_dir, out } => {
            let result = commands::sync(agents_dir, out)?;
            output(&result, human);
        }

        Commands::Repos { org } => {
            let org = config.resolve_org(org.as_deref());
            let result = commands::org_repos(&org)?;
            output(&result, human);
        }
    }

    Ok(())
}

/// Subcommand path and arguments for the action log.
fn describe_command(command: &Commands) -> (String, Vec<String>) {
    let name = match command {
        Commands::Agent { command } => match command {
            AgentCommands::List { .. } => "agent list",
            AgentCommands::Show { .. } => "agent show",
            AgentCommands::Validate => "agent validate",
        },
        Commands::Blog { command } => match command {
            BlogCommands::List { .. } => "blog list",
            BlogCommands::Featured => "blog featured",
        },
        Commands::Render { .. } => "render",
        Commands::Config { command } => match command {
            ConfigCommands::Get { .. } => "config get",
            ConfigCommands::Set { .. } => "config set",
            ConfigCommands::Show { .. } => "config show",
        },
        Commands::Theme { command } => match command {
            ThemeCommands::Get => "theme get",
            ThemeCommands::Toggle => "theme toggle",
        },
        Commands::Sync { .. } => "sync",
        Commands::Repos { .. } => "repos",
    };
    let args = std::env::args().skip(1).collect();
    (name.to_string(), args)
}

/// Print output in JSON or human-readable format.
fn output<T: Output>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}
