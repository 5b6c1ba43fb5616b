use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use lineups::api::GrenadeType;
use lineups::config::{CliOverrides, Settings};

mod cmd;

#[derive(Parser)]
#[command(name = "lineups")]
#[command(version, about = "Browse and submit grenade lineups")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip confirmation prompts
    #[arg(long, global = true)]
    pub yes: bool,

    /// API base URL (overrides LINEUPS_API_URL and the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Path to lineups.toml (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List maps, or show one map's callouts
    Maps {
        /// Map id
        id: Option<String>,
    },
    /// Search lineups by map, grenade, and callouts
    Search {
        /// Map id
        #[arg(short, long)]
        map: Option<String>,
        /// Grenade type: Smoke, Flash, Molotov, HE Grenade
        #[arg(short, long)]
        grenade: Option<GrenadeType>,
        /// Origin callout id (requires --map)
        #[arg(long)]
        origin: Option<String>,
        /// Destination callout id (requires --map)
        #[arg(long)]
        destination: Option<String>,
    },
    /// Show one lineup in detail
    Show { id: String },
    /// Submit a new lineup
    Create {
        #[arg(long)]
        title: Option<String>,
        /// Map id
        #[arg(long)]
        map: Option<String>,
        /// Grenade type: Smoke, Flash, Molotov, HE Grenade
        #[arg(long)]
        grenade: Option<GrenadeType>,
        /// Origin callout id
        #[arg(long)]
        origin: Option<String>,
        /// Destination callout id
        #[arg(long)]
        destination: Option<String>,
        /// YouTube video URL
        #[arg(long)]
        video_url: Option<String>,
        /// Screenshot image URL
        #[arg(long)]
        image_url: Option<String>,
    },
    /// View, validate, or initialize configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Write a default lineups.toml
    Init,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "lineups=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings::load(
        cli.config.clone(),
        CliOverrides {
            api_url: cli.api_url.clone(),
            timeout_secs: cli.timeout_secs,
        },
    )?;

    // `config validate` prints these itself.
    if !matches!(cli.command, Commands::Config { .. }) {
        for warning in settings.validate() {
            warn!("Config: {}", warning);
        }
    }

    match &cli.command {
        Commands::Maps { id } => cmd::cmd_maps(&settings, cli.format, id.as_deref()).await?,
        Commands::Search {
            map,
            grenade,
            origin,
            destination,
        } => {
            let filters = cmd::SearchFilters {
                map: map.clone(),
                grenade: *grenade,
                origin: origin.clone(),
                destination: destination.clone(),
            };
            cmd::cmd_search(&settings, cli.format, filters).await?;
        }
        Commands::Show { id } => cmd::cmd_show(&settings, cli.format, id).await?,
        Commands::Create {
            title,
            map,
            grenade,
            origin,
            destination,
            video_url,
            image_url,
        } => {
            let input = cmd::CreateInput {
                title: title.clone(),
                map: map.clone(),
                grenade: *grenade,
                origin: origin.clone(),
                destination: destination.clone(),
                video_url: video_url.clone(),
                image_url: image_url.clone(),
            };
            cmd::cmd_create(&settings, cli.format, cli.yes, input).await?;
        }
        Commands::Config { command } => cmd::cmd_config(&settings, command.clone())?,
    }

    Ok(())
}
