//! Compatibility scoring
//!
//! Turns a product's hardware attributes into per-usage scores:
//! - Normalize each attribute against a fixed reference scale
//! - Combine signals with a per-usage weight vector
//! - Average the selected usages into an aggregate score
//! - Explain the result with strengths, weaknesses and warnings

pub mod engine;
pub mod explain;
pub mod models;
pub mod normalize;
pub mod weights;

pub use engine::{score, ScoringConfig, ScoringEngine};
pub use explain::{explain, Explanation};
pub use models::{
    CompatibilityGrade, Dimension, ScoredProduct, Signal, SignalLevel, UsageCompatibility,
};
pub use normalize::{normalize, NormalizedProfile};
pub use weights::{WeightError, WeightTable, WeightVector, DEFAULT_WEIGHTS};
