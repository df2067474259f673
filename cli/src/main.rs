//! mayo-menu CLI - Start and stop mayo port-forward sessions
//!
//! A command-line tool and terminal menu for picking a namespace or review
//! release to tunnel into, stopping the running tunnel and opening its
//! generated configuration file.

mod commands;
mod tui;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "MAYO_MENU_LOG";

#[derive(Parser)]
#[command(name = "mayo-menu")]
#[command(author, version, about = "Start and stop mayo port-forward sessions")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Disable interactive TUI mode
    #[arg(long, global = true)]
    no_tui: bool,

    /// Use a settings file other than ~/.mayo-menu/config.json
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the session menu
    #[command(alias = "ls")]
    Menu,

    /// Show whether a port-forward session is active
    Status,

    /// Start a detached port-forward into a namespace
    Start { namespace: String },

    /// Start a port-forward for a review release
    Review { namespace: String, release: String },

    /// Stop the running port-forward (tears down every session)
    Stop,

    /// Open the configuration file of the active session
    OpenConfig,

    /// Show or initialize settings
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective settings
    Show,
    /// Write the default settings file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Print the settings file path
    Path,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let interactive = cli.command.is_none() && !cli.no_tui && atty::is(atty::Stream::Stdout);
    init_tracing(cli.verbose, interactive)?;

    let store = commands::settings_store(cli.config.clone())?;

    match cli.command {
        Some(Commands::Menu) => {
            commands::menu::run(&commands::session(&store).await?, cli.json).await?
        }
        Some(Commands::Status) => {
            commands::status::run(&commands::session(&store).await?, cli.json).await?
        }
        Some(Commands::Start { namespace }) => {
            let controller = commands::session(&store).await?;
            commands::action::start(&controller, namespace, cli.json).await?
        }
        Some(Commands::Review { namespace, release }) => {
            let controller = commands::session(&store).await?;
            commands::action::review(&controller, namespace, release, cli.json).await?
        }
        Some(Commands::Stop) => {
            commands::action::stop(&commands::session(&store).await?, cli.json).await?
        }
        Some(Commands::OpenConfig) => {
            commands::action::open_config(&commands::session(&store).await?, cli.json).await?
        }
        Some(Commands::Config { action }) => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => commands::config::show(&store, cli.json).await?,
            ConfigAction::Init { force } => commands::config::init(&store, force).await?,
            ConfigAction::Path => commands::config::path(&store),
        },
        None => {
            let controller = commands::session(&store).await?;
            // Default: Launch TUI or print the menu
            if interactive {
                tui::run(&controller).await?;
            } else {
                commands::menu::run(&controller, cli.json).await?;
            }
        }
    }

    Ok(())
}

/// Logs go to stderr, except in the TUI where they would corrupt the screen.
fn init_tracing(verbose: bool, interactive: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = match std::env::var(LOG_ENV) {
        Ok(value) => EnvFilter::try_new(value),
        Err(_) => EnvFilter::try_new(default_level),
    }
    .or_else(|_| EnvFilter::try_new(default_level))
    .context("failed to initialize tracing filter")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact();

    let _ = if interactive {
        builder.with_writer(std::io::sink).try_init()
    } else {
        builder.with_writer(std::io::stderr).try_init()
    };

    Ok(())
}
