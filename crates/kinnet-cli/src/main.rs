//! kinnet CLI - Explore kinship networks in a biographical database

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{code, explore, import};
use config::Config;
use kinnet_storage::SqliteStorage;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "kinnet")]
#[command(author, version, about = "Kinship network explorer for biographical databases")]
pub struct Cli {
    /// SQLite database with KIN_DATA, KINSHIP_CODES and BIOG_MAIN
    #[arg(long, env = "KINNET_DB", global = true)]
    pub db: Option<PathBuf>,

    /// Config file
    #[arg(long, env = "KINNET_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format: table, json
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(config::default_config_path)
    }

    /// `--db` wins over the config file
    pub fn database_path(&self, config: &Config) -> PathBuf {
        self.db.clone().unwrap_or_else(|| config.database_path())
    }

    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from(self.format.as_str())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Explore a person's kinship network
    Explore(explore::ExploreArgs),
    /// Decompose a kinship code or abbreviation into steps
    Code(code::CodeArgs),
    /// Load a JSON kinship dataset into the database
    Import(import::ImportArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
}

/// Application context with storage backend
pub struct AppContext {
    pub storage: Arc<SqliteStorage>,
    pub config: Config,
}

impl AppContext {
    pub fn new(cli: &Cli, config: Config) -> anyhow::Result<Self> {
        let db_path = cli.database_path(&config);
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        tracing::debug!("Using database at: {:?}", db_path);

        let storage = SqliteStorage::open(&db_path)?;

        Ok(Self {
            storage: Arc::new(storage),
            config,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting kinnet CLI");

    if let Commands::Config(args) = &cli.command {
        return commands::config::run(args, &cli);
    }

    let config = Config::load(&cli.config_path())?;

    match &cli.command {
        Commands::Explore(args) => {
            let ctx = AppContext::new(&cli, config)?;
            explore::run(args, &cli, &ctx).await?
        }
        Commands::Code(args) => code::run(args, &cli, config).await?,
        Commands::Import(args) => {
            let ctx = AppContext::new(&cli, config)?;
            import::run(args, &cli, &ctx).await?
        }
        Commands::Config(_) => {}
    }

    Ok(())
}
