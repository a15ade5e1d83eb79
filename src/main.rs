use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use yatina::config::Settings;
use yatina::engine::RankAttribute;
use yatina::store::SqliteStore;

mod cli;

#[derive(Parser)]
#[command(name = "yatina")]
#[command(about = "Gamified Aymara language learning - lessons, lives and a frog to grow")]
#[command(version)]
struct Cli {
    /// Path to the progress database (defaults to ~/.yatina/yatina.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Path to the config file (defaults to ~/.yatina/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum RankBy {
    Origin,
    Residence,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed starter content and optionally create a profile
    Init {
        /// Also create a profile with this username
        #[arg(long)]
        username: Option<String>,
    },

    /// Show a learner's stats
    Profile {
        /// Profile id or username
        user: String,
    },

    /// List the lesson chain with unlock and completion state
    Lessons {
        user: String,
    },

    /// Resolve an attempt at a lesson
    Attempt {
        user: String,
        /// Lesson title, e.g. "Saludos Básicos"
        lesson: String,
    },

    /// Daily frog check-in
    Visit {
        user: String,
    },

    /// Community leaderboards
    Ranking {
        /// Group by origin or residence city
        #[arg(long, value_enum, default_value = "origin")]
        by: RankBy,

        /// Entries per city
        #[arg(long, default_value_t = 3)]
        top: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let store = match &cli.db {
        Some(path) => SqliteStore::open(path)?,
        None => SqliteStore::open_default()?,
    };
    let config_path = cli
        .config
        .unwrap_or_else(|| SqliteStore::data_dir().join("config.toml"));
    let settings = Settings::load(&config_path)?;

    match cli.command {
        Commands::Init { username } => {
            cli::init::init_command(&store, username).await?;
        }
        Commands::Profile { user } => {
            cli::profile::profile_command(&store, &user).await?;
        }
        Commands::Lessons { user } => {
            cli::lessons::lessons_command(&store, &user, settings.unlock_mode).await?;
        }
        Commands::Attempt { user, lesson } => {
            cli::attempt::attempt_command(&store, &settings, &user, &lesson).await?;
        }
        Commands::Visit { user } => {
            cli::visit::visit_command(&store, &settings, &user).await?;
        }
        Commands::Ranking { by, top } => {
            let attribute = match by {
                RankBy::Origin => RankAttribute::Origin,
                RankBy::Residence => RankAttribute::Residence,
            };
            cli::ranking::ranking_command(&store, attribute, top).await?;
        }
    }

    Ok(())
}
