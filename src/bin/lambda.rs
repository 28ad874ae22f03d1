//! AWS Lambda entry point for smithbot.
//!
//! Deploy with `cargo lambda build --release --features lambda`.
//!
//! Configuration and the unit catalog are loaded once per cold start; a
//! missing or malformed catalog aborts the process before any request.
//!
//! ## Environment Variables
//!
//! - `BOT_CONFIG_PATH`: optional TOML config (default: `data/config.toml`)
//! - `SMITHSONIAN_API_KEY`, `MASTODON_ACCESS_TOKEN`, `MASTODON_BASE_URL`
//! - `UNIT_CODES_PATH`, `IMAGE_PATH`, `HTTP_TIMEOUT_SECS`, `MAX_ATTEMPTS`
//! - `RUST_LOG`: Log level (e.g., `info`, `debug`)

use std::path::PathBuf;
use std::sync::Arc;

use lambda_runtime::{Error as LambdaError, LambdaEvent, service_fn};

use serde_json::Value;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use smithbot::config::load_all;
use smithbot::lambda;
use smithbot::pipeline::Bot;

/// Main entry point for the AWS Lambda function.
#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("smithbot Lambda starting...");

    let config_path = std::env::var("BOT_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data/config.toml"));
    let (config, catalog) = load_all(Some(&config_path))?;
    let bot = Arc::new(Bot::from_config(config, catalog, false)?);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        lambda::handler(event, Arc::clone(&bot))
    }))
    .await
}
