//! smithbot CLI
//!
//! Local execution entry point. For AWS Lambda, use `smithbot-lambda`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use smithbot::{config, error::Result, models::UnitCatalog, pipeline::Bot};

/// smithbot - random Smithsonian open-access images on Mastodon
#[derive(Parser, Debug)]
#[command(
    name = "smithbot",
    version,
    about = "Posts a random open-access Smithsonian image to Mastodon"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Select, download and post one image
    Run {
        /// Log the caption and image instead of posting
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate configuration and the unit catalog
    Validate,
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

    log::info!("smithbot starting...");

    match cli.command {
        Command::Run { dry_run } => {
            let (config, catalog) = config::load_all(Some(&cli.config))?;
            let bot = Bot::from_config(config, catalog, dry_run)?;

            let outcome = bot.run().await;
            let response = outcome.into_response();
            println!("{}", serde_json::to_string_pretty(&response)?);

            if response.status_code >= 500 {
                std::process::exit(1);
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            let config = config::load_config(Some(&cli.config))?;
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");

            let catalog = UnitCatalog::load(&config.catalog_path)?;
            log::info!(
                "✓ Catalog OK: {} unit codes in {}",
                catalog.len(),
                config.catalog_path.display()
            );

            if config.mastodon.access_token.trim().is_empty() {
                log::warn!("No Mastodon access token set; only --dry-run will work.");
            }

            log::info!("All validations passed!");
        }
    }

    Ok(())
}
