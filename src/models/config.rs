//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the unit code → museum name JSON file
    #[serde(default = "defaults::catalog_path")]
    pub catalog_path: PathBuf,

    /// Open Access search settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Image staging and conditioning limits
    #[serde(default)]
    pub image: ImageConfig,

    /// Caption composition limits
    #[serde(default)]
    pub caption: CaptionConfig,

    /// Posting service credentials
    #[serde(default)]
    pub mastodon: MastodonConfig,

    /// Shared HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.search.api_url.trim().is_empty() {
            return Err(AppError::config("search.api_url is empty"));
        }
        if self.search.api_key.trim().is_empty() {
            return Err(AppError::config("search.api_key is empty"));
        }
        if self.search.free_license.trim().is_empty() {
            return Err(AppError::config("search.free_license is empty"));
        }
        if self.search.max_attempts == 0 {
            return Err(AppError::config("search.max_attempts must be > 0"));
        }
        if self.image.max_bytes == 0 || self.image.max_pixels == 0 {
            return Err(AppError::config("image limits must be > 0"));
        }
        if self.image.resize_target == 0 {
            return Err(AppError::config("image.resize_target must be > 0"));
        }
        if u64::from(self.image.resize_target).pow(2) > self.image.max_pixels {
            return Err(AppError::config(
                "image.resize_target squared must not exceed image.max_pixels",
            ));
        }
        if self.caption.field_max_chars >= self.caption.max_chars {
            return Err(AppError::config(
                "caption.field_max_chars must be below caption.max_chars",
            ));
        }
        if self.caption.alt_max_chars == 0 {
            return Err(AppError::config("caption.alt_max_chars must be > 0"));
        }
        if self.mastodon.base_url.trim().is_empty() {
            return Err(AppError::config("mastodon.base_url is empty"));
        }
        if self.mastodon.media_poll_attempts == 0 {
            return Err(AppError::config("mastodon.media_poll_attempts must be > 0"));
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::config("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::config("http.timeout_secs must be > 0"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: defaults::catalog_path(),
            search: SearchConfig::default(),
            image: ImageConfig::default(),
            caption: CaptionConfig::default(),
            mastodon: MastodonConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

/// Open Access search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search endpoint
    #[serde(default = "defaults::api_url")]
    pub api_url: String,

    /// api.data.gov key
    #[serde(default)]
    pub api_key: String,

    /// Query clause restricting results to image records
    #[serde(default = "defaults::media_filter")]
    pub media_filter: String,

    /// Access value meaning the image may be reposted freely
    #[serde(default = "defaults::free_license")]
    pub free_license: String,

    /// Maximum number of unit codes tried before giving up
    #[serde(default = "defaults::max_attempts")]
    pub max_attempts: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_url: defaults::api_url(),
            api_key: String::new(),
            media_filter: defaults::media_filter(),
            free_license: defaults::free_license(),
            max_attempts: defaults::max_attempts(),
        }
    }
}

/// Image staging and conditioning limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Where the downloaded image is written, overwritten every run
    #[serde(default = "defaults::staging_path")]
    pub staging_path: PathBuf,

    /// Byte ceiling before a resize is forced
    #[serde(default = "defaults::max_bytes")]
    pub max_bytes: u64,

    /// Pixel-area ceiling before a resize is forced
    #[serde(default = "defaults::max_pixels")]
    pub max_pixels: u64,

    /// Longest edge after a resize
    #[serde(default = "defaults::resize_target")]
    pub resize_target: u32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            staging_path: defaults::staging_path(),
            max_bytes: defaults::max_bytes(),
            max_pixels: defaults::max_pixels(),
            resize_target: defaults::resize_target(),
        }
    }
}

/// Caption composition limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionConfig {
    /// Platform status length limit
    #[serde(default = "defaults::max_chars")]
    pub max_chars: usize,

    /// Limit for a single rendered free-text category
    #[serde(default = "defaults::field_max_chars")]
    pub field_max_chars: usize,

    /// Alt text limit
    #[serde(default = "defaults::alt_max_chars")]
    pub alt_max_chars: usize,

    /// Language tag attached to the post
    #[serde(default = "defaults::language")]
    pub language: String,

    /// Post visibility
    #[serde(default = "defaults::visibility")]
    pub visibility: String,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            max_chars: defaults::max_chars(),
            field_max_chars: defaults::field_max_chars(),
            alt_max_chars: defaults::alt_max_chars(),
            language: defaults::language(),
            visibility: defaults::visibility(),
        }
    }
}

/// Posting service credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MastodonConfig {
    /// Instance base URL
    #[serde(default = "defaults::mastodon_base_url")]
    pub base_url: String,

    /// Application access token
    #[serde(default)]
    pub access_token: String,

    /// Status checks while an upload is still processing
    #[serde(default = "defaults::media_poll_attempts")]
    pub media_poll_attempts: u32,

    /// Delay between processing checks in milliseconds
    #[serde(default = "defaults::media_poll_interval_ms")]
    pub media_poll_interval_ms: u64,
}

impl Default for MastodonConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::mastodon_base_url(),
            access_token: String::new(),
            media_poll_attempts: defaults::media_poll_attempts(),
            media_poll_interval_ms: defaults::media_poll_interval_ms(),
        }
    }
}

/// Shared HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    pub fn catalog_path() -> PathBuf {
        PathBuf::from("data/unit_codes.json")
    }

    // Search defaults
    pub fn api_url() -> String {
        "https://api.si.edu/openaccess/api/v1.0/category/science_technology/search".into()
    }
    pub fn media_filter() -> String {
        "online_media_type:Images".into()
    }
    pub fn free_license() -> String {
        "CC0".into()
    }
    pub fn max_attempts() -> usize {
        25
    }

    // Image defaults
    pub fn staging_path() -> PathBuf {
        PathBuf::from("/tmp/smith_image.jpg")
    }
    pub fn max_bytes() -> u64 {
        1_048_576 * 10
    }
    pub fn max_pixels() -> u64 {
        1_638_400
    }
    pub fn resize_target() -> u32 {
        1280
    }

    // Caption defaults
    pub fn max_chars() -> usize {
        500
    }
    pub fn field_max_chars() -> usize {
        200
    }
    pub fn alt_max_chars() -> usize {
        1500
    }
    pub fn language() -> String {
        "en".into()
    }
    pub fn visibility() -> String {
        "public".into()
    }

    pub fn mastodon_base_url() -> String {
        "https://botsin.space".into()
    }
    pub fn media_poll_attempts() -> u32 {
        10
    }
    pub fn media_poll_interval_ms() -> u64 {
        1000
    }

    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; smithbot/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
}
