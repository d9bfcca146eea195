//! Purchase intent engine
//!
//! Captures a buyer's intent through a four-step wizard (category, budget,
//! usages, free-text specs), scores catalog products against it and ranks
//! them within the chosen budget band.
//!
//! ```no_run
//! use purchase_intent_engine::prelude::*;
//!
//! # fn main() -> purchase_intent_engine::Result<()> {
//! let capture = IntentCapture::new()
//!     .select_category("notebook")?
//!     .select_budget("3000-5000")?
//!     .toggle_usage("programming")?
//!     .confirm_usages()?
//!     .complete()?;
//!
//! let catalog = Catalog::from_json_file("catalog.json")?;
//! if let Some(intent) = capture.intent() {
//!     let results = rank(intent, &catalog.products, SortKey::Aggregate);
//!     for item in results.page(0, None, &RankingConfig::default()).items {
//!         println!("{} {}", item.product.name, item.aggregate_score);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod intent;
pub mod logging;
pub mod metrics;
pub mod ranking;
pub mod scoring;

pub use error::{EngineError, Result};

/// Commonly used types
pub mod prelude {
    pub use crate::catalog::{
        Catalog, CatalogError, CpuTier, GpuKind, GpuSpec, GpuTier, HardwareProfile, ProductSpec,
        RequirementHints, ScreenSpec, StorageKind, StorageSpec,
    };
    pub use crate::config::Config;
    pub use crate::error::{EngineError, Result};
    pub use crate::intent::{
        BudgetBand, Category, Intent, IntentCapture, IntentError, PartialIntent, StepValue,
        UsageSet, UsageTag, WizardState, WizardStep,
    };
    pub use crate::logging::{init_tracing, LoggingConfig};
    pub use crate::ranking::{
        rank, CacheConfig, Page, RankedResults, RankingConfig, RankingPipeline,
        RecommendationCache, SortKey,
    };
    pub use crate::scoring::{
        score, CompatibilityGrade, Dimension, ScoredProduct, ScoringConfig, ScoringEngine,
        UsageCompatibility, WeightTable,
    };
}
