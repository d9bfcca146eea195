//! Data models for compatibility scoring

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::catalog::ProductSpec;
use crate::intent::{UsageSet, UsageTag};

/// Attribute dimensions the weight vectors range over
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Cpu,
    Gpu,
    Vram,
    Ram,
    StorageSpeed,
    StorageCapacity,
    Display,
    Battery,
}

impl Dimension {
    pub const ALL: [Dimension; 8] = [
        Dimension::Cpu,
        Dimension::Gpu,
        Dimension::Vram,
        Dimension::Ram,
        Dimension::StorageSpeed,
        Dimension::StorageCapacity,
        Dimension::Display,
        Dimension::Battery,
    ];

    /// Dimensions that only exist on battery-powered products with a screen
    pub fn is_portable_only(&self) -> bool {
        matches!(self, Dimension::Display | Dimension::Battery)
    }

    /// Label used when the attribute stands out positively
    pub fn strength_label(&self) -> &'static str {
        match self {
            Dimension::Cpu => "fast processor",
            Dimension::Gpu => "dedicated GPU",
            Dimension::Vram => "ample GPU memory",
            Dimension::Ram => "plenty of RAM",
            Dimension::StorageSpeed => "fast storage",
            Dimension::StorageCapacity => "large storage",
            Dimension::Display => "high refresh display",
            Dimension::Battery => "long battery life",
        }
    }

    /// Label used when the attribute holds a usage back
    pub fn weakness_label(&self) -> &'static str {
        match self {
            Dimension::Cpu => "entry-level processor",
            Dimension::Gpu => "integrated or weak GPU",
            Dimension::Vram => "limited GPU memory",
            Dimension::Ram => "limited RAM",
            Dimension::StorageSpeed => "slow storage",
            Dimension::StorageCapacity => "small storage",
            Dimension::Display => "basic display",
            Dimension::Battery => "short battery life",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Cpu => "cpu",
            Dimension::Gpu => "gpu",
            Dimension::Vram => "vram",
            Dimension::Ram => "ram",
            Dimension::StorageSpeed => "storage_speed",
            Dimension::StorageCapacity => "storage_capacity",
            Dimension::Display => "display",
            Dimension::Battery => "battery",
        };
        f.write_str(name)
    }
}

/// Qualitative band of a normalized signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalLevel {
    Low,
    Mid,
    High,
}

/// Normalized attribute value in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Signal(f64);

impl Signal {
    /// Signals below this are "low"
    pub const LOW_BELOW: f64 = 0.4;
    /// Signals at or above this are "high"
    pub const HIGH_FROM: f64 = 0.75;

    pub const FLOOR: Signal = Signal(0.0);

    pub fn new(value: f64) -> Self {
        if !value.is_finite() {
            return Self::FLOOR;
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn level(&self) -> SignalLevel {
        if self.0 < Self::LOW_BELOW {
            SignalLevel::Low
        } else if self.0 >= Self::HIGH_FROM {
            SignalLevel::High
        } else {
            SignalLevel::Mid
        }
    }
}

/// Presentation badge for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompatibilityGrade {
    Poor,
    Fair,
    Excellent,
}

impl CompatibilityGrade {
    pub fn from_score(score: u8) -> Self {
        if score >= 85 {
            CompatibilityGrade::Excellent
        } else if score >= 70 {
            CompatibilityGrade::Fair
        } else {
            CompatibilityGrade::Poor
        }
    }
}

/// Score in `0..=100` for every usage tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UsageCompatibility(BTreeMap<UsageTag, u8>);

impl UsageCompatibility {
    /// Build from per-usage scores; tags missing from `scores` get `neutral`
    pub fn from_scores(scores: BTreeMap<UsageTag, u8>, neutral: u8) -> Self {
        let mut complete = BTreeMap::new();
        for tag in UsageTag::ALL {
            let score = scores.get(&tag).copied().unwrap_or(neutral).min(100);
            complete.insert(tag, score);
        }
        Self(complete)
    }

    pub fn get(&self, tag: UsageTag) -> u8 {
        self.0.get(&tag).copied().unwrap_or(0)
    }

    pub fn grade(&self, tag: UsageTag) -> CompatibilityGrade {
        CompatibilityGrade::from_score(self.get(tag))
    }

    /// Scores in vocabulary order
    pub fn iter(&self) -> impl Iterator<Item = (UsageTag, u8)> + '_ {
        self.0.iter().map(|(tag, score)| (*tag, *score))
    }

    /// Rounded mean over `usages`; falls back to all five tags when empty
    pub fn aggregate<'a>(&self, usages: impl IntoIterator<Item = &'a UsageTag>) -> u8 {
        let selected: Vec<u8> = usages.into_iter().map(|tag| self.get(*tag)).collect();
        let scores = if selected.is_empty() {
            self.0.values().copied().collect()
        } else {
            selected
        };
        if scores.is_empty() {
            return 0;
        }

        let total: u32 = scores.iter().map(|s| u32::from(*s)).sum();
        let mean = f64::from(total) / scores.len() as f64;
        mean.round().clamp(0.0, 100.0) as u8
    }

    /// Highest score among the selected usages
    pub fn best_among(&self, usages: &UsageSet) -> u8 {
        usages.iter().map(|tag| self.get(tag)).max().unwrap_or(0)
    }
}

/// Scoring result for one (intent, product) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredProduct {
    pub product: ProductSpec,
    /// Index of the product in the input catalog
    pub catalog_position: usize,
    pub aggregate_score: u8,
    pub grade: CompatibilityGrade,
    pub compatibility: UsageCompatibility,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    /// Stricter subset of `weaknesses` signalling likely unsuitability
    pub warnings: Vec<String>,
    /// Free-text requirements this product does not meet
    #[serde(default)]
    pub unmet_requirements: Vec<String>,
}

impl ScoredProduct {
    pub fn price(&self) -> f64 {
        self.product.price
    }

    pub fn best_usage_score(&self, usages: &UsageSet) -> u8 {
        self.compatibility.best_among(usages)
    }
}
