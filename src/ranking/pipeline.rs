//! Ranking and filtering pipeline
//!
//! Filter by budget band (and category), score every survivor, then sort
//! with a fixed tie-break chain:
//! 1. the chosen sort key
//! 2. higher aggregate score
//! 3. lower price
//! 4. earlier catalog position
//!
//! The sort is stable and always runs sequentially so equal products keep
//! their catalog order across runs.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::cmp::Ordering;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::models::{RankedResults, SortKey};
use crate::catalog::{ProductSpec, RequirementHints};
use crate::intent::{Intent, UsageSet};
use crate::metrics::METRICS;
use crate::scoring::{ScoredProduct, ScoringEngine};

/// Ranking configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Page size used when the caller does not ask for one
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// Upper bound on requested page sizes
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,

    #[serde(default)]
    pub default_sort: SortKey,

    /// Drop products whose category differs from the intent's
    #[serde(default = "default_filter_by_category")]
    pub filter_by_category: bool,
}

fn default_page_size() -> usize {
    10
}

fn default_max_page_size() -> usize {
    50
}

fn default_filter_by_category() -> bool {
    true
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            default_sort: SortKey::default(),
            filter_by_category: default_filter_by_category(),
        }
    }
}

impl RankingConfig {
    /// Resolve a requested page size against the configured bounds
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size.max(1))
    }
}

/// Filters, scores and sorts a catalog for an intent
#[derive(Debug, Clone, Default)]
pub struct RankingPipeline {
    engine: ScoringEngine,
    config: RankingConfig,
}

impl RankingPipeline {
    pub fn new(engine: ScoringEngine, config: RankingConfig) -> Self {
        Self { engine, config }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// SHA-256 hex over everything that shapes a ranking besides its inputs
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        let mut hasher = Sha256::new();
        hasher.update(self.engine.fingerprint()?.as_bytes());
        hasher.update(b"|");
        hasher.update(serde_json::to_vec(&self.config)?);
        Ok(hex::encode(hasher.finalize()))
    }

    /// Rank `catalog` for `intent`.
    ///
    /// Products outside the budget band are excluded entirely. Malformed
    /// attributes never fail the request.
    pub fn rank(&self, intent: &Intent, catalog: &[ProductSpec], sort_key: SortKey) -> RankedResults {
        let start = Instant::now();
        let band = intent.budget_range();
        let hints = RequirementHints::parse(intent.free_text_specs());

        let mut excluded_by_budget = 0;
        let mut excluded_by_category = 0;
        let mut items = Vec::with_capacity(catalog.len());

        for (position, product) in catalog.iter().enumerate() {
            if !product.has_valid_price() {
                warn!("Skipping product {} with invalid price {}", product.id, product.price);
                excluded_by_budget += 1;
                continue;
            }
            if !band.contains(product.price) {
                excluded_by_budget += 1;
                continue;
            }
            if self.config.filter_by_category
                && product.category.map_or(false, |c| c != intent.category())
            {
                excluded_by_category += 1;
                continue;
            }

            items.push(self.engine.score_at(intent, product, position, &hints));
        }

        sort_scored(&mut items, sort_key, intent.usages());

        let elapsed = start.elapsed();
        METRICS.rankings_total.with_label_values(&[sort_key.as_str()]).inc();
        METRICS.products_scored.inc_by(items.len() as f64);
        METRICS.products_excluded_budget.inc_by(excluded_by_budget as f64);
        METRICS.products_excluded_category.inc_by(excluded_by_category as f64);
        METRICS.ranking_duration.observe(elapsed.as_secs_f64());

        debug!(
            "Filtered catalog: {} kept, {} outside budget {}, {} other category",
            items.len(),
            excluded_by_budget,
            band,
            excluded_by_category
        );
        info!(
            "Ranked {} of {} products by {} in {:?}",
            items.len(),
            catalog.len(),
            sort_key,
            elapsed
        );

        RankedResults {
            sort_key,
            usages: intent.usages().clone(),
            items,
            excluded_by_budget,
            excluded_by_category,
        }
    }

    /// Rank using the configured default sort key
    pub fn rank_default(&self, intent: &Intent, catalog: &[ProductSpec]) -> RankedResults {
        self.rank(intent, catalog, self.config.default_sort)
    }
}

/// Sort in place by `sort_key` with the deterministic tie-break chain
pub fn sort_scored(items: &mut [ScoredProduct], sort_key: SortKey, usages: &UsageSet) {
    items.sort_by(|a, b| compare(a, b, sort_key, usages));
}

fn compare(a: &ScoredProduct, b: &ScoredProduct, sort_key: SortKey, usages: &UsageSet) -> Ordering {
    let primary = match sort_key {
        SortKey::Aggregate => b.aggregate_score.cmp(&a.aggregate_score),
        SortKey::Price => a.price().total_cmp(&b.price()),
        SortKey::BestUsageMatch => b.best_usage_score(usages).cmp(&a.best_usage_score(usages)),
    };

    primary
        .then_with(|| b.aggregate_score.cmp(&a.aggregate_score))
        .then_with(|| a.price().total_cmp(&b.price()))
        .then_with(|| a.catalog_position.cmp(&b.catalog_position))
}

/// Rank with the built-in engine and configuration
pub fn rank(intent: &Intent, catalog: &[ProductSpec], sort_key: SortKey) -> RankedResults {
    RankingPipeline::default().rank(intent, catalog, sort_key)
}
