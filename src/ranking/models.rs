//! Data models for ranked results

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::intent::UsageSet;
use crate::scoring::ScoredProduct;

use super::pagination::Page;
use super::pipeline::RankingConfig;

/// Primary ordering criterion chosen by the buyer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Aggregate score, best first
    #[default]
    Aggregate,
    /// Listed price, cheapest first
    Price,
    /// Best sub-score among the selected usages, best first
    BestUsageMatch,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Aggregate => "aggregate",
            SortKey::Price => "price",
            SortKey::BestUsageMatch => "best_usage_match",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "aggregate" | "score" => Ok(SortKey::Aggregate),
            "price" => Ok(SortKey::Price),
            "best_usage_match" | "match" => Ok(SortKey::BestUsageMatch),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

/// Complete, sorted output of one ranking request.
///
/// Sorting happens once; pages are windows over `items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResults {
    pub sort_key: SortKey,
    pub usages: UsageSet,
    pub items: Vec<ScoredProduct>,
    /// Products dropped because their price is outside the budget band
    pub excluded_by_budget: usize,
    /// Products dropped because they belong to another category
    pub excluded_by_category: usize,
}

impl RankedResults {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn top(&self) -> Option<&ScoredProduct> {
        self.items.first()
    }

    /// Product ids in ranked order
    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.product.id.as_str()).collect()
    }

    /// Zero-based page `index`.
    ///
    /// The requested size falls back to the configured default and is
    /// clamped to `max_page_size`.
    pub fn page(&self, index: usize, requested: Option<usize>, config: &RankingConfig) -> Page<'_> {
        Page::window(&self.items, index, config.page_size(requested))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductSpec;
    use crate::intent::{Intent, IntentCapture};
    use crate::ranking::rank;

    fn office_intent() -> Intent {
        IntentCapture::new()
            .select_category("desktop")
            .unwrap()
            .select_budget("0-1500")
            .unwrap()
            .toggle_usage("office")
            .unwrap()
            .confirm_usages()
            .unwrap()
            .complete()
            .unwrap()
            .intent()
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_page_size_is_clamped_to_config() {
        let catalog: Vec<ProductSpec> = (0..30)
            .map(|i| ProductSpec::new(format!("p{}", i), "Tower", 500.0 + f64::from(i)))
            .collect();
        let results = rank(&office_intent(), &catalog, SortKey::Price);
        let config = RankingConfig {
            default_page_size: 5,
            max_page_size: 12,
            ..RankingConfig::default()
        };

        let default_page = results.page(0, None, &config);
        assert_eq!(default_page.size, 5);
        assert_eq!(default_page.items.len(), 5);

        let oversized = results.page(0, Some(1000), &config);
        assert_eq!(oversized.size, 12);
        assert_eq!(oversized.items.len(), 12);
        assert_eq!(oversized.total_pages, 3);

        assert_eq!(results.page(0, Some(0), &config).size, 1);
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("score".parse::<SortKey>().unwrap(), SortKey::Aggregate);
        assert_eq!("price".parse::<SortKey>().unwrap(), SortKey::Price);
        assert_eq!("best-usage-match".parse::<SortKey>().unwrap(), SortKey::BestUsageMatch);
        assert!("rating".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_sort_key_default() {
        assert_eq!(SortKey::default(), SortKey::Aggregate);
        assert_eq!(
            serde_json::to_string(&SortKey::BestUsageMatch).unwrap(),
            "\"best_usage_match\""
        );
    }
}
