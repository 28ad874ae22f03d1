// src/config.rs

//! Configuration loading utilities.
//!
//! Settings come from an optional TOML file and are then overridden from
//! the environment, which is where credentials live on Lambda.
//!
//! ## Environment Variables
//!
//! - `SMITHSONIAN_API_KEY`: api.data.gov key for the search API
//! - `MASTODON_ACCESS_TOKEN`: posting service access token
//! - `MASTODON_BASE_URL`: posting service instance
//! - `UNIT_CODES_PATH`: unit catalog JSON file
//! - `IMAGE_PATH`: staging path for the downloaded image
//! - `HTTP_TIMEOUT_SECS`: outbound request timeout
//! - `MAX_ATTEMPTS`: unit codes tried before giving up

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{Config, UnitCatalog};

/// Load configuration from `path` (if present) and apply environment overrides.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(path) if path.exists() => Config::load(path)?,
        Some(path) => {
            log::warn!("Config file {:?} not found. Using defaults.", path);
            Config::default()
        }
        None => Config::default(),
    };

    apply_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Load and validate both the configuration and the unit catalog.
pub fn load_all(path: Option<&Path>) -> Result<(Config, UnitCatalog)> {
    let config = load_config(path)?;
    config.validate()?;

    let catalog = UnitCatalog::load(&config.catalog_path)?;
    log::info!(
        "Loaded {} unit codes from {}",
        catalog.len(),
        config.catalog_path.display()
    );

    Ok((config, catalog))
}

/// Apply overrides from a key lookup.
pub fn apply_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = lookup("SMITHSONIAN_API_KEY") {
        config.search.api_key = key;
    }
    if let Some(token) = lookup("MASTODON_ACCESS_TOKEN") {
        config.mastodon.access_token = token;
    }
    if let Some(url) = lookup("MASTODON_BASE_URL") {
        config.mastodon.base_url = url;
    }
    if let Some(path) = lookup("UNIT_CODES_PATH") {
        config.catalog_path = PathBuf::from(path);
    }
    if let Some(path) = lookup("IMAGE_PATH") {
        config.image.staging_path = PathBuf::from(path);
    }

    if let Some(timeout) = lookup("HTTP_TIMEOUT_SECS") {
        if let Ok(secs) = timeout.parse() {
            config.http.timeout_secs = secs;
        }
    }

    if let Some(attempts) = lookup("MAX_ATTEMPTS") {
        if let Ok(n) = attempts.parse() {
            config.search.max_attempts = n;
        }
    }
}
