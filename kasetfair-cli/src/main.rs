//! Main entry point for the Kaset Fair registration CLI.

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use dotenv::dotenv;
use shared::config::client::{ClientConfig, ConfigOverrides};
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

use commands::{
    goods::GoodsCommand,
    profile::ProfileCommand,
    questions::QuestionsCommand,
    session::SessionCommand,
    wizard::{ClubInfoArgs, CreateArgs, StatusArgs, StoreDetailsArgs, SubmitArgs},
};

mod commands;

/// Kaset Fair CLI
#[derive(Parser)]
#[command(name = "kasetfair")]
#[command(about = "Command-line client for Kaset Fair store registration", long_about = None)]
struct Cli {
    /// Path to the configuration file (optional)
    #[arg(
        long,
        short,
        global = true,
        help = "Path to the configuration file (e.g., kasetfair.toml or kasetfair.json). If not provided, defaults will be used."
    )]
    config: Option<PathBuf>,

    /// Base URL of the store API
    #[arg(
        long,
        global = true,
        help = "Base URL of the store API (e.g., https://fair.example.org/api). Overrides the configuration file."
    )]
    api_url: Option<Url>,

    /// Logging level or filter directive
    #[arg(
        long,
        global = true,
        help = "Logging level or tracing filter directive (e.g., debug or client=trace)"
    )]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for the Kaset Fair CLI
#[derive(Subcommand)]
enum Commands {
    /// Show the store's registration progress and wizard steps
    Status(StatusArgs),

    /// Create a store with its name and members
    Create(CreateArgs),

    /// Fill in and submit the club information step
    ClubInfo(ClubInfoArgs),

    /// Save the booth layout step
    StoreDetails(StoreDetailsArgs),

    /// Submit the product step
    Submit(SubmitArgs),

    /// Leave the current store
    Leave,

    /// Check the store against the admission requirements
    Validate,

    /// Manage the goods sold by the store
    Goods {
        #[command(subcommand)]
        action: GoodsCommand,
    },

    /// Answer the store environment questions
    Questions {
        #[command(subcommand)]
        action: QuestionsCommand,
    },

    /// List invitations to other users' stores
    Invitations,

    /// Show or edit your nisit profile
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },

    /// Manage the stored session cookies
    Session {
        #[command(subcommand)]
        action: SessionCommand,
    },

    /// Generate a configuration file
    Config {
        /// Format of the configuration file to generate (toml or json). Defaults to toml.
        #[arg(
            long,
            short,
            help = "Format of the configuration file to generate (toml or json). Defaults to toml."
        )]
        format: Option<String>,
    },

    /// Generate shell completion scripts for the CLI
    Completion {
        /// The shell type for which to generate the completion script
        #[arg(
            long,
            short,
            help = "The shell type for which to generate the completion script (e.g., bash, zsh, fish, powershell)"
        )]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    // These two never talk to the API and must work without a valid config.
    match &cli.command {
        Commands::Completion { shell } => {
            commands::completion::generate_completion(*shell);
            return Ok(());
        }
        Commands::Config { format } => {
            let format = format.as_deref().unwrap_or("toml");
            return commands::config::generate_config(format);
        }
        _ => {}
    }

    let overrides = ConfigOverrides {
        api_base_url: cli.api_url,
        log_level: cli.log_level,
    };
    let config = ClientConfig::load_config(cli.config, overrides)
        .map_err(|err| anyhow!("failed to load configuration: {err}"))?;
    initialize_tracing(&config);

    match cli.command {
        Commands::Status(args) => commands::wizard::status(&config, args).await?,
        Commands::Create(args) => commands::wizard::create(&config, args).await?,
        Commands::ClubInfo(args) => commands::wizard::club_info(&config, args).await?,
        Commands::StoreDetails(args) => commands::wizard::store_details(&config, args).await?,
        Commands::Submit(args) => commands::wizard::submit(&config, args).await?,
        Commands::Leave => commands::wizard::leave(&config).await?,
        Commands::Validate => commands::validate::validate(&config).await?,
        Commands::Goods { action } => commands::goods::run(&config, action).await?,
        Commands::Questions { action } => commands::questions::run(&config, action).await?,
        Commands::Invitations => commands::invitations::list(&config).await?,
        Commands::Profile { action } => commands::profile::run(&config, action).await?,
        Commands::Session { action } => commands::session::run(&config, action)?,
        Commands::Config { .. } | Commands::Completion { .. } => {}
    }

    Ok(())
}

/// Installs the `tracing` subscriber. `RUST_LOG` wins over the configured level.
fn initialize_tracing(config: &ClientConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init();
}
