//! Result cache for complete rankings
//!
//! Keyed by (intent fingerprint, catalog fingerprint, pipeline fingerprint,
//! sort key). A cached entry is the full sorted result, so later pages of the
//! same request are windows over it and never trigger a re-sort.

use moka::sync::Cache;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::models::{RankedResults, SortKey};
use super::pipeline::RankingPipeline;
use crate::catalog::Catalog;
use crate::intent::Intent;
use crate::metrics::METRICS;

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Entry lifetime in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_ttl_secs() -> u64 {
    600
}

fn default_max_entries() -> u64 {
    1000
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            ttl_secs: default_ttl_secs(),
            max_entries: default_max_entries(),
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Memoizes ranked results per request key
pub struct RecommendationCache {
    entries: Cache<String, Arc<RankedResults>>,
    enabled: bool,
}

impl RecommendationCache {
    pub fn new(config: &CacheConfig) -> Self {
        let entries = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl())
            .build();
        Self {
            entries,
            enabled: config.enabled,
        }
    }

    /// Canonical cache key for a ranking request
    pub fn key(intent: &Intent, catalog: &str, pipeline: &str, sort_key: SortKey) -> String {
        let intent_fingerprint = intent.fingerprint();
        let mut hasher = Sha256::new();
        for part in [intent_fingerprint.as_str(), catalog, pipeline, sort_key.as_str()] {
            hasher.update(part.as_bytes());
            hasher.update(b"|");
        }
        hex::encode(hasher.finalize())
    }

    fn request_key(
        pipeline: &RankingPipeline,
        intent: &Intent,
        catalog: &Catalog,
        sort_key: SortKey,
    ) -> Result<String, serde_json::Error> {
        Ok(Self::key(
            intent,
            &catalog.fingerprint()?,
            &pipeline.fingerprint()?,
            sort_key,
        ))
    }

    /// Return the cached ranking or compute and store it.
    ///
    /// A disabled cache always computes.
    pub fn get_or_rank(
        &self,
        pipeline: &RankingPipeline,
        intent: &Intent,
        catalog: &Catalog,
        sort_key: SortKey,
    ) -> Arc<RankedResults> {
        if !self.enabled {
            return Arc::new(pipeline.rank(intent, &catalog.products, sort_key));
        }

        let key = match Self::request_key(pipeline, intent, catalog, sort_key) {
            Ok(key) => key,
            Err(e) => {
                warn!("Cannot key ranking request, bypassing cache: {}", e);
                return Arc::new(pipeline.rank(intent, &catalog.products, sort_key));
            }
        };

        if let Some(hit) = self.entries.get(&key) {
            METRICS.cache_requests.with_label_values(&["hit"]).inc();
            debug!("Ranking cache hit for {}", key);
            return hit;
        }

        METRICS.cache_requests.with_label_values(&["miss"]).inc();
        let results = Arc::new(pipeline.rank(intent, &catalog.products, sort_key));
        self.entries.insert(key, Arc::clone(&results));
        results
    }

    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }

    /// Approximate number of live entries
    pub fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }
}
