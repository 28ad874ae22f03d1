// src/models/mod.rs

//! Domain models for the bot.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod catalog;
mod config;
mod outcome;
mod record;
mod staged;

// Re-export all public types
pub use catalog::UnitCatalog;
pub use config::{CaptionConfig, Config, HttpConfig, ImageConfig, MastodonConfig, SearchConfig};
pub use outcome::{BotResponse, PostedStatus, RunOutcome};
pub use record::{
    Content, Descriptive, Freetext, FreetextEntry, MediaCandidate, MetadataUsage, OnlineMedia,
    Record, ResponseBody, STATUS_OK, SearchResult,
};
pub use staged::StagedImage;
