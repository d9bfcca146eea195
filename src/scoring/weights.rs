//! Per-usage attribute weight vectors
//!
//! Weights are static configuration: a built-in table that can be replaced
//! per usage tag from the `[scoring.weights.<usage>]` config section without
//! touching scoring logic. A vector need not sum to 1; sub-scores divide by
//! the total weight of the dimensions that apply to a product.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

use super::models::Dimension;
use crate::intent::UsageTag;

/// Weight per attribute dimension for one usage
pub type WeightVector = BTreeMap<Dimension, f64>;

/// Built-in weight table, shared by default-constructed engines
pub static DEFAULT_WEIGHTS: Lazy<Arc<WeightTable>> = Lazy::new(|| Arc::new(WeightTable::builtin()));

/// Weight table errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightError {
    #[error("No weight vector configured for usage {0}")]
    MissingUsage(UsageTag),

    #[error("Invalid weight {value} for {usage}/{dimension}: weights must be finite and non-negative")]
    InvalidWeight {
        usage: UsageTag,
        dimension: Dimension,
        value: f64,
    },

    #[error("Weight vector for {0} has zero total weight")]
    ZeroTotal(UsageTag),
}

/// Mapping from usage tag to its weight vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightTable {
    usages: BTreeMap<UsageTag, WeightVector>,
}

impl WeightTable {
    /// The shipped weighting.
    ///
    /// GPU carries no weight for office and programming; gaming_light
    /// mirrors gaming_heavy with a lighter GPU share.
    pub fn builtin() -> Self {
        use Dimension::*;

        let mut usages = BTreeMap::new();
        usages.insert(
            UsageTag::Office,
            Self::build_vector(&[
                (Cpu, 0.30),
                (Ram, 0.20),
                (StorageSpeed, 0.15),
                (StorageCapacity, 0.05),
                (Display, 0.05),
                (Battery, 0.25),
            ]),
        );
        usages.insert(
            UsageTag::GamingLight,
            Self::build_vector(&[
                (Cpu, 0.25),
                (Gpu, 0.25),
                (Vram, 0.05),
                (Ram, 0.20),
                (StorageSpeed, 0.10),
                (Display, 0.05),
                (Battery, 0.10),
            ]),
        );
        usages.insert(
            UsageTag::GamingHeavy,
            Self::build_vector(&[
                (Cpu, 0.15),
                (Gpu, 0.40),
                (Vram, 0.20),
                (Ram, 0.15),
                (StorageSpeed, 0.05),
                (Display, 0.05),
            ]),
        );
        usages.insert(
            UsageTag::VideoEditing,
            Self::build_vector(&[
                (Cpu, 0.15),
                (Gpu, 0.25),
                (Vram, 0.05),
                (Ram, 0.25),
                (StorageSpeed, 0.25),
                (StorageCapacity, 0.05),
            ]),
        );
        usages.insert(
            UsageTag::Programming,
            Self::build_vector(&[
                (Cpu, 0.35),
                (Ram, 0.35),
                (StorageSpeed, 0.20),
                (StorageCapacity, 0.05),
                (Battery, 0.05),
            ]),
        );

        Self { usages }
    }

    fn build_vector(pairs: &[(Dimension, f64)]) -> WeightVector {
        pairs.iter().copied().collect()
    }

    /// Weight of `dimension` for `usage`; unlisted dimensions weigh zero
    pub fn weight(&self, usage: UsageTag, dimension: Dimension) -> f64 {
        self.usages
            .get(&usage)
            .and_then(|vector| vector.get(&dimension))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn vector(&self, usage: UsageTag) -> Option<&WeightVector> {
        self.usages.get(&usage)
    }

    /// Whether `dimension` contributes to `usage` at all
    pub fn is_relevant(&self, usage: UsageTag, dimension: Dimension) -> bool {
        self.weight(usage, dimension) > 0.0
    }

    /// Replace whole vectors for the usages present in `overrides`
    pub fn with_overrides(
        mut self,
        overrides: &BTreeMap<UsageTag, WeightVector>,
    ) -> Result<Self, WeightError> {
        for (usage, vector) in overrides {
            self.usages.insert(*usage, vector.clone());
        }
        self.validate()?;
        Ok(self)
    }

    /// Check every usage has a usable vector
    pub fn validate(&self) -> Result<(), WeightError> {
        for usage in UsageTag::ALL {
            let vector = self.usages.get(&usage).ok_or(WeightError::MissingUsage(usage))?;

            for (dimension, value) in vector {
                if !value.is_finite() || *value < 0.0 {
                    return Err(WeightError::InvalidWeight {
                        usage,
                        dimension: *dimension,
                        value: *value,
                    });
                }
            }

            if vector.values().sum::<f64>() <= 0.0 {
                return Err(WeightError::ZeroTotal(usage));
            }
        }
        Ok(())
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_is_valid() {
        assert!(WeightTable::builtin().validate().is_ok());
    }

    #[test]
    fn test_builtin_vectors_sum_to_one() {
        let table = WeightTable::builtin();
        for usage in UsageTag::ALL {
            let total: f64 = table.vector(usage).unwrap().values().sum();
            assert!((total - 1.0).abs() < 1e-9, "{} sums to {}", usage, total);
        }
    }

    #[test]
    fn test_gpu_negligible_for_office_and_programming() {
        let table = WeightTable::builtin();
        assert!(!table.is_relevant(UsageTag::Office, Dimension::Gpu));
        assert!(!table.is_relevant(UsageTag::Programming, Dimension::Gpu));
        assert!(
            table.weight(UsageTag::GamingHeavy, Dimension::Gpu)
                > table.weight(UsageTag::GamingLight, Dimension::Gpu)
        );
    }

    #[test]
    fn test_override_replaces_vector() {
        let overrides = BTreeMap::from([(
            UsageTag::Office,
            BTreeMap::from([(Dimension::Battery, 1.0)]),
        )]);
        let table = WeightTable::builtin().with_overrides(&overrides).unwrap();
        assert_eq!(table.weight(UsageTag::Office, Dimension::Battery), 1.0);
        assert_eq!(table.weight(UsageTag::Office, Dimension::Cpu), 0.0);
    }

    #[test]
    fn test_override_rejects_negative_weight() {
        let overrides = BTreeMap::from([(
            UsageTag::Programming,
            BTreeMap::from([(Dimension::Ram, -0.5)]),
        )]);
        let err = WeightTable::builtin().with_overrides(&overrides).unwrap_err();
        assert!(matches!(err, WeightError::InvalidWeight { .. }));
    }

    #[test]
    fn test_override_rejects_zero_total() {
        let overrides = BTreeMap::from([(UsageTag::GamingLight, WeightVector::new())]);
        let err = WeightTable::builtin().with_overrides(&overrides).unwrap_err();
        assert_eq!(err, WeightError::ZeroTotal(UsageTag::GamingLight));
    }
}
