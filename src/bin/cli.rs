//! EC2 Pricing CLI
//!
//! Downloads on-demand EC2 prices and builds a SQLite snapshot from them.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ec2pricing::{
    error::{AppError, Result},
    models::Config,
    pipeline,
    services::AwsPricingClient,
    storage::SqliteStore,
};

/// ec2pricing - EC2 price snapshot builder
#[derive(Parser, Debug)]
#[command(
    name = "ec2pricing",
    version,
    about = "Download EC2 prices and build a queryable SQLite snapshot"
)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "ec2pricing.toml", global = true)]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download EC2 prices to JSON file
    Download {
        /// Path to json file into which prices will be downloaded
        #[arg(short, long = "json")]
        json: Option<PathBuf>,
    },

    /// Build SQLite database with prices from given JSON
    Build {
        /// Path to json file from which prices will be read
        #[arg(short, long = "json")]
        json: Option<PathBuf>,

        /// Path to SQLite DB file in which table will be built
        #[arg(short, long = "db")]
        db: Option<PathBuf>,
    },

    /// List attribute names supported by the service
    Attributes,

    /// List every value of one attribute
    Values {
        /// Attribute name, e.g. instanceType
        attribute: String,
    },

    /// Validate configuration file
    Validate,

    /// Show current snapshot info
    Info {
        /// Path to SQLite DB file
        #[arg(short, long = "db")]
        db: Option<PathBuf>,
    },
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    log::debug!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Download { json } => {
            config.validate()?;
            let path = json.unwrap_or_else(|| PathBuf::from(&config.paths.dump_file));
            let client = AwsPricingClient::from_config(&config.catalog).await;
            pipeline::run_download(&config, &client, &path).await?;
        }

        Command::Build { json, db } => {
            let json = json.unwrap_or_else(|| PathBuf::from(&config.paths.dump_file));
            let db = db.unwrap_or_else(|| PathBuf::from(&config.paths.database_file));

            if !json.exists() {
                log::error!("Dump not found at {}. Run 'download' first.", json.display());
                return Err(AppError::config(format!("{} not found", json.display())));
            }

            let mut store = SqliteStore::open(&db)?;
            pipeline::run_build(&json, &mut store).await?;
            drop(store);
            log::info!("Snapshot built at {}", db.display());
        }

        Command::Attributes => {
            let client = AwsPricingClient::from_config(&config.catalog).await;
            for name in pipeline::run_attributes(&config, &client).await? {
                println!("{name}");
            }
        }

        Command::Values { attribute } => {
            let client = AwsPricingClient::from_config(&config.catalog).await;
            for value in pipeline::run_values(&config, &client, &attribute).await? {
                println!("{value}");
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            pipeline::run_validate(&config)?;
        }

        Command::Info { db } => {
            let db = db.unwrap_or_else(|| PathBuf::from(&config.paths.database_file));
            pipeline::run_info(&db)?;
        }
    }

    Ok(())
}
