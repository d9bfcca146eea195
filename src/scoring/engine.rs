//! Compatibility scoring engine
//!
//! `score(intent, product)` is a pure function: no I/O, no shared mutable
//! state, identical inputs give identical output. Price never enters the
//! computation; budget fit is a ranking-stage filter.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use super::explain::explain;
use super::models::{CompatibilityGrade, ScoredProduct, UsageCompatibility};
use super::normalize::{normalize, NormalizedProfile};
use super::weights::{WeightError, WeightTable, WeightVector, DEFAULT_WEIGHTS};
use crate::catalog::{ProductSpec, RequirementHints};
use crate::intent::{Intent, UsageTag};

/// Scoring thresholds and weight overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Low attributes become weaknesses when a selected usage scores below this
    #[serde(default = "default_weakness_below")]
    pub weakness_below: u8,

    /// Low attributes become warnings when a selected usage scores below this
    #[serde(default = "default_warning_below")]
    pub warning_below: u8,

    /// Per-usage replacement weight vectors
    #[serde(default)]
    pub weights: BTreeMap<UsageTag, WeightVector>,
}

fn default_weakness_below() -> u8 {
    70
}

fn default_warning_below() -> u8 {
    50
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weakness_below: default_weakness_below(),
            warning_below: default_warning_below(),
            weights: BTreeMap::new(),
        }
    }
}

impl ScoringConfig {
    /// Build the effective weight table: built-in vectors plus overrides
    pub fn weight_table(&self) -> Result<WeightTable, WeightError> {
        WeightTable::builtin().with_overrides(&self.weights)
    }
}

/// Scores products against an intent
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    weights: Arc<WeightTable>,
    weakness_below: u8,
    warning_below: u8,
}

impl ScoringEngine {
    /// Create an engine with an explicit weight table
    pub fn new(weights: WeightTable, config: &ScoringConfig) -> Result<Self, WeightError> {
        weights.validate()?;
        Ok(Self {
            weights: Arc::new(weights),
            weakness_below: config.weakness_below,
            warning_below: config.warning_below,
        })
    }

    /// Create an engine from configuration
    pub fn from_config(config: &ScoringConfig) -> Result<Self, WeightError> {
        if config.weights.is_empty() {
            return Ok(Self {
                weights: Arc::clone(&DEFAULT_WEIGHTS),
                weakness_below: config.weakness_below,
                warning_below: config.warning_below,
            });
        }
        Self::new(config.weight_table()?, config)
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    /// SHA-256 hex over the weight table and thresholds
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        let mut hasher = Sha256::new();
        hasher.update(serde_json::to_vec(self.weights.as_ref())?);
        hasher.update([self.weakness_below, self.warning_below]);
        Ok(hex::encode(hasher.finalize()))
    }

    /// Score one product; free-text hints are read from the intent
    pub fn score(&self, intent: &Intent, product: &ProductSpec) -> ScoredProduct {
        let hints = RequirementHints::parse(intent.free_text_specs());
        self.score_at(intent, product, 0, &hints)
    }

    /// Score one product at a catalog position with pre-parsed hints
    pub fn score_at(
        &self,
        intent: &Intent,
        product: &ProductSpec,
        catalog_position: usize,
        hints: &RequirementHints,
    ) -> ScoredProduct {
        let profile = normalize(product);
        let compatibility = self.usage_scores(&profile);
        let aggregate_score = compatibility.aggregate(intent.usages().as_set());

        let explanation = explain(
            &profile,
            &compatibility,
            intent.usages(),
            &self.weights,
            self.weakness_below,
            self.warning_below,
        );

        debug!(
            "Scored {} at position {}: aggregate={}",
            product.id, catalog_position, aggregate_score
        );

        ScoredProduct {
            product: product.clone(),
            catalog_position,
            aggregate_score,
            grade: CompatibilityGrade::from_score(aggregate_score),
            compatibility,
            strengths: explanation.strengths,
            weaknesses: explanation.weaknesses,
            warnings: explanation.warnings,
            unmet_requirements: hints.unmet(&product.attributes),
        }
    }

    /// Sub-score for every usage tag
    pub fn usage_scores(&self, profile: &NormalizedProfile) -> UsageCompatibility {
        let scores = UsageTag::ALL
            .iter()
            .map(|usage| (*usage, self.usage_score(*usage, profile)))
            .collect();
        UsageCompatibility::from_scores(scores, 0)
    }

    /// Weighted mean of applicable signals, scaled to `0..=100`.
    ///
    /// Dimensions that do not apply to the product drop out of both
    /// numerator and denominator.
    fn usage_score(&self, usage: UsageTag, profile: &NormalizedProfile) -> u8 {
        let Some(vector) = self.weights.vector(usage) else {
            return 0;
        };

        let mut weighted = 0.0;
        let mut total_weight = 0.0;
        for (dimension, weight) in vector {
            if let Some(signal) = profile.signal(*dimension) {
                weighted += weight * signal.value();
                total_weight += weight;
            }
        }

        if total_weight <= 0.0 {
            return 0;
        }
        (weighted / total_weight * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        let config = ScoringConfig::default();
        Self {
            weights: Arc::clone(&DEFAULT_WEIGHTS),
            weakness_below: config.weakness_below,
            warning_below: config.warning_below,
        }
    }
}

/// Score with the built-in weights and thresholds
pub fn score(intent: &Intent, product: &ProductSpec) -> ScoredProduct {
    ScoringEngine::default().score(intent, product)
}
