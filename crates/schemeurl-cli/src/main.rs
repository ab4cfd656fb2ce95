//! schemeurl CLI
//!
//! Command-line front end for schemeurl: handles links of the registered
//! scheme and manages saved scheme URLs.

use std::fs::OpenOptions;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use schemeurl_core::{Config, LaunchArgs, LinkIngestion};

mod commands;
mod context;
mod output;
mod prompt;

use context::AppContext;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "schemeurl")]
#[command(about = "schemeurl - Handle and save custom scheme URLs")]
#[command(version)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Verbose diagnostics on stderr (or the configured log file)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Link the application was launched with
    link: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Save a new scheme URL
    #[command(alias = "create")]
    Add {
        /// Display name
        #[arg(short, long)]
        name: Option<String>,
        /// Scheme URL
        #[arg(short, long)]
        url: Option<String>,
    },
    /// List saved scheme URLs
    #[command(alias = "ls")]
    List,
    /// Show a saved scheme URL
    Show {
        /// ID (full or prefix)
        id: String,
    },
    /// Delete a saved scheme URL
    #[command(alias = "rm")]
    Remove {
        /// ID (full or prefix)
        id: String,
    },
    /// Open a saved scheme URL with the system handler
    Open {
        /// ID (full or prefix)
        id: String,
    },
    /// Show how a URL's query parameters are parsed
    Parse {
        /// URL to parse
        url: String,
    },
    /// Read incoming links from stdin until EOF
    Listen {
        /// Link the application was launched with
        link: Option<String>,
    },
    /// Show or clear the application log
    Logs {
        /// Delete all log entries
        #[arg(long)]
        clear: bool,
    },
    /// Show or change preferences
    Settings {
        #[command(subcommand)]
        command: Option<SettingsCommands>,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Show current preferences
    Show,
    /// Set dark mode: on, off, or system
    DarkMode { value: String },
    /// Switch between light and dark
    ToggleTheme,
    /// Accept the user agreement
    AcceptEula,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, scheme, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands work even when the stored config is broken
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), &output);
    }

    let config = Config::load()?;
    init_logging(&config, cli.verbose);

    let launch_url = match &cli.command {
        Some(Commands::Listen { link }) => link.clone(),
        _ => cli.link.clone(),
    };
    let ingestion = LinkIngestion::new(&LaunchArgs::from_args(launch_url, &config.scheme));
    let ctx = AppContext::new(config);

    match cli.command {
        None => commands::home::show(&ctx, &ingestion, &output).await,
        Some(Commands::Add { name, url }) => commands::link::add(&ctx, name, url, &output).await,
        Some(Commands::List) => commands::link::list(&ctx, &output).await,
        Some(Commands::Show { id }) => commands::link::show(&ctx, id, &output).await,
        Some(Commands::Remove { id }) => commands::link::remove(&ctx, id, &output).await,
        Some(Commands::Open { id }) => commands::link::open(&ctx, id, &output).await,
        Some(Commands::Parse { url }) => commands::link::parse(url, &output),
        Some(Commands::Listen { .. }) => commands::listen::run(&ctx, &ingestion, &output).await,
        Some(Commands::Logs { clear }) => {
            if clear {
                commands::logs::clear(&ctx, &output).await
            } else {
                commands::logs::show(&ctx, &output).await
            }
        }
        Some(Commands::Settings { command }) => {
            handle_settings_command(command, &ctx, &output).await
        }
        Some(Commands::Config { .. }) => unreachable!(), // Handled above
    }
}

async fn handle_settings_command(
    command: Option<SettingsCommands>,
    ctx: &AppContext,
    output: &Output,
) -> Result<()> {
    match command {
        Some(SettingsCommands::Show) | None => commands::settings::show(ctx, output).await,
        Some(SettingsCommands::DarkMode { value }) => {
            commands::settings::dark_mode(ctx, value, output).await
        }
        Some(SettingsCommands::ToggleTheme) => commands::settings::toggle_theme(ctx, output).await,
        Some(SettingsCommands::AcceptEula) => commands::settings::accept_eula(ctx, output).await,
    }
}

fn handle_config_command(command: Option<ConfigCommands>, output: &Output) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(output),
        Some(ConfigCommands::Set { key, value }) => commands::config::set(key, value, output),
    }
}

/// Initialize diagnostics
///
/// RUST_LOG wins when set; otherwise `--verbose` selects debug and the
/// default is warnings only. Output goes to `config.log_file` when set.
fn init_logging(config: &Config, verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("schemeurl_core={},schemeurl_cli={}", level, level))
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false);

    // Ignore the error if a subscriber is already installed
    match &config.log_file {
        Some(path) => match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                let _ = builder.with_ansi(false).with_writer(Arc::new(file)).try_init();
            }
            Err(e) => {
                eprintln!("Warning: Could not open log file {:?}: {}", path, e);
                let _ = builder.with_writer(std::io::stderr).try_init();
            }
        },
        None => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
    }
}
