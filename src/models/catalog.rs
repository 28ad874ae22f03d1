//! Unit code catalog.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use rand::Rng;
use rand::seq::IteratorRandom;

use crate::error::{AppError, Result};

/// Mapping from Smithsonian unit code to museum display name.
///
/// Built once at startup and shared read-only for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitCatalog {
    units: BTreeMap<String, String>,
}

impl UnitCatalog {
    /// Build a catalog from an existing map.
    pub fn new(units: BTreeMap<String, String>) -> Result<Self> {
        if units.is_empty() {
            return Err(AppError::catalog("catalog contains no unit codes"));
        }
        Ok(Self { units })
    }

    /// Load a catalog from a JSON object of `code: name` pairs.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::catalog(format!("cannot read {}: {e}", path.display())))?;
        let units: BTreeMap<String, String> = serde_json::from_str(&content)
            .map_err(|e| AppError::catalog(format!("malformed {}: {e}", path.display())))?;
        Self::new(units)
    }

    /// Museum name for a unit code, or the code itself when unmapped.
    pub fn display_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.units.get(code).map(String::as_str).unwrap_or(code)
    }

    /// Pick one unit code uniformly at random.
    pub fn random_code<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        self.units
            .keys()
            .choose(rng)
            .map(String::as_str)
            // The constructor rejects empty catalogs.
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
