// src/pipeline/select.rs

//! Candidate selection.
//!
//! Picks a random unit code and asks for a random-sorted page of its
//! images, trying fresh codes while the result set comes back empty.

use rand::Rng;

use crate::error::{AppError, Result};
use crate::models::{SearchConfig, SearchResult, UnitCatalog};
use crate::services::SearchApi;

/// A non-empty result set and the unit code that produced it.
#[derive(Debug, Clone)]
pub struct Selection {
    pub unit_code: String,
    pub result: SearchResult,

    /// Number of queries issued, including this one
    pub attempts: usize,
}

/// Query random unit codes until one returns rows.
///
/// Transport and API errors abort at once. Empty result sets are retried
/// with a new code, up to `config.max_attempts` queries in total.
pub async fn select_candidates<R: Rng + ?Sized>(
    search: &dyn SearchApi,
    catalog: &UnitCatalog,
    config: &SearchConfig,
    rng: &mut R,
) -> Result<Selection> {
    for attempt in 1..=config.max_attempts {
        let unit_code = catalog.random_code(rng).to_string();
        log::debug!("Attempt {}: searching unit code {}", attempt, unit_code);

        let result = search.search(&unit_code).await?;

        if !result.is_ok() {
            return Err(AppError::Api {
                status: result.status.unwrap_or_default(),
                message: result.message().to_string(),
            });
        }

        if result.row_count() == 0 {
            log::info!(
                "Found no images for random unit code {}; trying again",
                unit_code
            );
            continue;
        }

        log::info!(
            "Successfully got {} random images from API for random unit code {} (attempt {}/{})",
            result.rows().len(),
            unit_code,
            attempt,
            config.max_attempts
        );
        return Ok(Selection {
            unit_code,
            result,
            attempts: attempt,
        });
    }

    Err(AppError::NoEligibleUnit {
        attempts: config.max_attempts,
    })
}
