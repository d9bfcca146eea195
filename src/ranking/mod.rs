//! Ranking and filtering of scored products
//!
//! Budget-aware filtering, deterministic sorting, pagination and an optional
//! result cache.

pub mod cache;
pub mod models;
pub mod pagination;
pub mod pipeline;

pub use cache::{CacheConfig, RecommendationCache};
pub use models::{RankedResults, SortKey};
pub use pagination::Page;
pub use pipeline::{rank, sort_scored, RankingConfig, RankingPipeline};
