//! Pipeline stages for one bot invocation.
//!
//! - `select`: pick a unit code with images
//! - `resolve`: find the first usable image in the result set
//! - `stage`: write and condition the downloaded image
//! - `caption`: compose status and alt text
//! - `publish`: upload and post
//! - `run`: wire the stages together

pub mod caption;
pub mod publish;
pub mod resolve;
pub mod run;
pub mod select;
pub mod stage;

#[cfg(test)]
pub(crate) mod testing;

pub use caption::{Caption, compose_caption};
pub use publish::{PublishOutcome, Publisher};
pub use resolve::{Resolution, resolve_image};
pub use run::Bot;
pub use select::{Selection, select_candidates};
pub use stage::stage_image;
