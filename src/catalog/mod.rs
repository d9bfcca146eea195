//! Product catalog input
//!
//! The catalog is supplied by a collaborator as an ordered sequence of
//! product records. Order matters: it is the final tie-break when ranking.

pub mod hints;
pub mod models;

pub use hints::RequirementHints;
pub use models::{
    CpuTier, GpuKind, GpuSpec, GpuTier, HardwareProfile, ProductSpec, ScreenSpec, StorageKind,
    StorageSpec,
};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Versioned, ordered collection of product records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Opaque version label, used to key cached rankings
    #[serde(default)]
    pub version: String,
    pub products: Vec<ProductSpec>,
}

impl Catalog {
    pub fn new(version: impl Into<String>, products: Vec<ProductSpec>) -> Self {
        Self {
            version: version.into(),
            products,
        }
    }

    /// Parse a catalog from JSON.
    ///
    /// Accepts either `{"version": .., "products": [..]}` or a bare array of
    /// products (version left empty).
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let catalog = if value.is_array() {
            Catalog {
                version: String::new(),
                products: serde_json::from_value(value)?,
            }
        } else {
            serde_json::from_value(value)?
        };

        let inconsistent = catalog.products.iter().filter(|p| !p.is_consistent()).count();
        if inconsistent > 0 {
            warn!(
                "Catalog {} has {} product(s) with inconsistent prices",
                catalog.version, inconsistent
            );
        }
        debug!(
            "Loaded catalog {} with {} products",
            catalog.version,
            catalog.products.len()
        );

        Ok(catalog)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Identity used to key cached rankings.
    ///
    /// The version label when one is set, otherwise a SHA-256 hex digest of
    /// the product records.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        if !self.version.is_empty() {
            return Ok(format!("version:{}", self.version));
        }
        let digest = Sha256::digest(serde_json::to_vec(&self.products)?);
        Ok(format!("sha256:{}", hex::encode(digest)))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
