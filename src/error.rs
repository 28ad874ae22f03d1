// src/error.rs

//! Unified error handling for the bot.

use std::fmt;

use thiserror::Error;

/// Result type alias for bot operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Image decoding or encoding failed
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unit catalog could not be loaded
    #[error("Unit catalog error: {0}")]
    Catalog(String),

    /// Remote server answered with a non-success HTTP status
    #[error("API request failed: {status}: {reason}")]
    Transport { status: u16, reason: String },

    /// Search API answered, but with a non-ok embedded status
    #[error("Got bad result from API request: {status}: {message}")]
    Api { status: i64, message: String },

    /// Every attempted unit code came back empty
    #[error("No eligible unit found after {attempts} attempts")]
    NoEligibleUnit { attempts: usize },

    /// Posting service rejected or failed a request
    #[error("Failed to post to Mastodon. {0}")]
    Posting(String),

    /// Blocking task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a catalog error.
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog(message.into())
    }

    /// Create a posting error.
    pub fn posting(message: impl fmt::Display) -> Self {
        Self::Posting(message.to_string())
    }

    /// Create a transport error from a response status.
    pub fn transport(status: reqwest::StatusCode) -> Self {
        Self::Transport {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }
}
