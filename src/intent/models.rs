//! Data models for purchase intent capture

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::IntentError;

/// Product category chosen at step 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Notebook,
    Desktop,
    Components,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Notebook, Category::Desktop, Category::Components];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Notebook => "notebook",
            Category::Desktop => "desktop",
            Category::Components => "components",
        }
    }

    /// Whether products of this category are battery powered with a built-in display
    pub fn is_portable(&self) -> bool {
        matches!(self, Category::Notebook)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = IntentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "notebook" => Ok(Category::Notebook),
            "desktop" => Ok(Category::Desktop),
            "components" => Ok(Category::Components),
            _ => Err(IntentError::UnknownCategory(s.to_string())),
        }
    }
}

/// Fixed, ordered price bands used to filter the catalog.
///
/// Every band is half-open `[lower, upper)`; the top band has no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BudgetBand {
    #[serde(rename = "0-1500")]
    UpTo1500,
    #[serde(rename = "1500-3000")]
    From1500To3000,
    #[serde(rename = "3000-5000")]
    From3000To5000,
    #[serde(rename = "5000-8000")]
    From5000To8000,
    #[serde(rename = "8000+")]
    Above8000,
}

impl BudgetBand {
    pub const ALL: [BudgetBand; 5] = [
        BudgetBand::UpTo1500,
        BudgetBand::From1500To3000,
        BudgetBand::From3000To5000,
        BudgetBand::From5000To8000,
        BudgetBand::Above8000,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            BudgetBand::UpTo1500 => "0-1500",
            BudgetBand::From1500To3000 => "1500-3000",
            BudgetBand::From3000To5000 => "3000-5000",
            BudgetBand::From5000To8000 => "5000-8000",
            BudgetBand::Above8000 => "8000+",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BudgetBand::UpTo1500 => "Up to 1,500",
            BudgetBand::From1500To3000 => "1,500 - 3,000",
            BudgetBand::From3000To5000 => "3,000 - 5,000",
            BudgetBand::From5000To8000 => "5,000 - 8,000",
            BudgetBand::Above8000 => "Above 8,000",
        }
    }

    /// Bands most buyers pick, highlighted by the presentation layer
    pub fn is_popular(&self) -> bool {
        matches!(self, BudgetBand::From1500To3000 | BudgetBand::From3000To5000)
    }

    /// Inclusive lower bound
    pub fn lower(&self) -> f64 {
        match self {
            BudgetBand::UpTo1500 => 0.0,
            BudgetBand::From1500To3000 => 1500.0,
            BudgetBand::From3000To5000 => 3000.0,
            BudgetBand::From5000To8000 => 5000.0,
            BudgetBand::Above8000 => 8000.0,
        }
    }

    /// Exclusive upper bound, `None` for the open-ended top band
    pub fn upper(&self) -> Option<f64> {
        match self {
            BudgetBand::UpTo1500 => Some(1500.0),
            BudgetBand::From1500To3000 => Some(3000.0),
            BudgetBand::From3000To5000 => Some(5000.0),
            BudgetBand::From5000To8000 => Some(8000.0),
            BudgetBand::Above8000 => None,
        }
    }

    /// Check whether a listed price falls inside this band.
    ///
    /// Non-finite and negative prices are never contained.
    pub fn contains(&self, price: f64) -> bool {
        if !price.is_finite() || price < self.lower() {
            return false;
        }
        match self.upper() {
            Some(upper) => price < upper,
            None => true,
        }
    }
}

impl fmt::Display for BudgetBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for BudgetBand {
    type Err = IntentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        BudgetBand::ALL
            .iter()
            .copied()
            .find(|band| band.id() == id)
            .ok_or_else(|| IntentError::UnknownBudgetBand(s.to_string()))
    }
}

/// Intended-use vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageTag {
    Office,
    #[serde(alias = "gaming-light")]
    GamingLight,
    #[serde(alias = "gaming-heavy")]
    GamingHeavy,
    #[serde(alias = "video-editing")]
    VideoEditing,
    Programming,
}

impl UsageTag {
    pub const ALL: [UsageTag; 5] = [
        UsageTag::Office,
        UsageTag::GamingLight,
        UsageTag::GamingHeavy,
        UsageTag::VideoEditing,
        UsageTag::Programming,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UsageTag::Office => "office",
            UsageTag::GamingLight => "gaming_light",
            UsageTag::GamingHeavy => "gaming_heavy",
            UsageTag::VideoEditing => "video_editing",
            UsageTag::Programming => "programming",
        }
    }
}

impl fmt::Display for UsageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UsageTag {
    type Err = IntentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        UsageTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str() == normalized)
            .ok_or_else(|| IntentError::UnknownUsageTag(s.to_string()))
    }
}

/// Non-empty set of usage tags
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<UsageTag>", into = "Vec<UsageTag>")]
pub struct UsageSet(BTreeSet<UsageTag>);

impl UsageSet {
    /// Build a usage set, returning `None` when `tags` is empty
    pub fn new(tags: BTreeSet<UsageTag>) -> Option<Self> {
        if tags.is_empty() {
            None
        } else {
            Some(Self(tags))
        }
    }

    pub fn single(tag: UsageTag) -> Self {
        Self(BTreeSet::from([tag]))
    }

    pub fn contains(&self, tag: UsageTag) -> bool {
        self.0.contains(&tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with collections
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Tags in vocabulary order
    pub fn iter(&self) -> impl Iterator<Item = UsageTag> + '_ {
        self.0.iter().copied()
    }

    pub fn as_set(&self) -> &BTreeSet<UsageTag> {
        &self.0
    }
}

impl TryFrom<Vec<UsageTag>> for UsageSet {
    type Error = IntentError;

    fn try_from(tags: Vec<UsageTag>) -> Result<Self, Self::Error> {
        UsageSet::new(tags.into_iter().collect()).ok_or(IntentError::Incomplete {
            missing: vec!["usages"],
        })
    }
}

impl From<UsageSet> for Vec<UsageTag> {
    fn from(set: UsageSet) -> Self {
        set.0.into_iter().collect()
    }
}

/// Finalized, validated buyer intent.
///
/// Fields are private so an `Intent` can only come out of
/// [`finalize`](super::validator::finalize) or deserialization, both of which
/// enforce a category, a budget band and at least one usage tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    category: Category,
    budget_range: BudgetBand,
    usages: UsageSet,
    #[serde(default)]
    free_text_specs: String,
}

impl Intent {
    pub(crate) fn from_parts(
        category: Category,
        budget_range: BudgetBand,
        usages: UsageSet,
        free_text_specs: String,
    ) -> Self {
        Self {
            category,
            budget_range,
            usages,
            free_text_specs,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn budget_range(&self) -> BudgetBand {
        self.budget_range
    }

    pub fn usages(&self) -> &UsageSet {
        &self.usages
    }

    pub fn free_text_specs(&self) -> &str {
        &self.free_text_specs
    }

    /// Canonical SHA-256 fingerprint, stable across runs and processes
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.category.as_str().as_bytes());
        hasher.update(b"|");
        hasher.update(self.budget_range.id().as_bytes());
        hasher.update(b"|");
        for tag in self.usages.iter() {
            hasher.update(tag.as_str().as_bytes());
            hasher.update(b",");
        }
        hasher.update(b"|");
        hasher.update(self.free_text_specs.trim().as_bytes());

        hex::encode(hasher.finalize())
    }
}

/// Answers accumulated so far; any field may still be missing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialIntent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<BudgetBand>,
    #[serde(default)]
    pub usages: BTreeSet<UsageTag>,
    #[serde(default)]
    pub free_text_specs: String,
}

impl PartialIntent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `tag`, returning whether it is now selected
    pub fn toggle_usage(&mut self, tag: UsageTag) -> bool {
        if self.usages.remove(&tag) {
            false
        } else {
            self.usages.insert(tag);
            true
        }
    }

    /// Names of required fields still missing
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.category.is_none() {
            missing.push("category");
        }
        if self.budget_range.is_none() {
            missing.push("budgetRange");
        }
        if self.usages.is_empty() {
            missing.push("usages");
        }
        missing
    }
}
