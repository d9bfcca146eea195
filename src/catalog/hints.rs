//! Requirement hints extracted from free-text specifications
//!
//! Buyers type things like "16GB RAM, RTX 4060" or "SSD de 500GB". The hints
//! never influence scores; they only annotate products that fall short.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::models::{HardwareProfile, StorageKind};

static RAM_AMOUNT_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,3})\s*gb\s*(?:de\s+)?(?:ddr\d\s*)?ram\b").expect("valid RAM pattern")
});

static RAM_KEYWORD_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bram\s*(?:de\s+)?(\d{1,3})\s*gb\b").expect("valid RAM pattern")
});

static STORAGE_AMOUNT_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,4})\s*(gb|tb)\s*(?:de\s+)?(?:ssd|nvme|hdd|storage)\b")
        .expect("valid storage pattern")
});

static STORAGE_KEYWORD_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:ssd|nvme|hdd|storage)\s*(?:de\s+)?(\d{1,4})\s*(gb|tb)\b")
        .expect("valid storage pattern")
});

static DEDICATED_GPU: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:rtx|gtx|radeon\s+rx|rx\s*\d{3,4}|arc\s+a\d{3}|dedicated\s+gpu|gpu\s+dedicada)\b")
        .expect("valid GPU pattern")
});

static SOLID_STATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:ssd|nvme)\b").expect("valid SSD pattern"));

/// Minimum requirements stated in free text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementHints {
    pub min_ram_gb: Option<u32>,
    pub min_storage_gb: Option<u32>,
    pub dedicated_gpu: bool,
    pub solid_state: bool,
}

impl RequirementHints {
    /// Extract hints from free text; unrecognized text yields no hints.
    ///
    /// An amount sitting between two keywords ("RAM 16GB SSD 512GB") belongs
    /// to the keyword it follows.
    pub fn parse(text: &str) -> Self {
        let ram_keyword_first = amounts(&RAM_KEYWORD_FIRST, text);
        let storage_keyword_first = amounts(&STORAGE_KEYWORD_FIRST, text);

        let min_ram_gb = amounts(&RAM_AMOUNT_FIRST, text)
            .into_iter()
            .find(|m| !m.overlaps(&storage_keyword_first))
            .or_else(|| ram_keyword_first.first().cloned())
            .map(|m| m.gb);

        let min_storage_gb = amounts(&STORAGE_AMOUNT_FIRST, text)
            .into_iter()
            .find(|m| !m.overlaps(&ram_keyword_first))
            .or_else(|| storage_keyword_first.first().cloned())
            .map(|m| m.gb);

        Self {
            min_ram_gb,
            min_storage_gb,
            dedicated_gpu: DEDICATED_GPU.is_match(text),
            solid_state: SOLID_STATE.is_match(text),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Labels for every hint the hardware does not satisfy
    pub fn unmet(&self, hardware: &HardwareProfile) -> Vec<String> {
        let mut unmet = Vec::new();

        if let Some(min_ram) = self.min_ram_gb {
            if hardware.ram_gb.map_or(true, |ram| ram < min_ram) {
                unmet.push(format!("less than the requested {}GB RAM", min_ram));
            }
        }

        if let Some(min_storage) = self.min_storage_gb {
            let capacity = hardware.storage.as_ref().map(|s| s.capacity_gb);
            if capacity.map_or(true, |gb| gb < min_storage) {
                unmet.push(format!("less than the requested {}GB storage", min_storage));
            }
        }

        if self.dedicated_gpu && !hardware.gpu.as_ref().map_or(false, |g| g.is_dedicated()) {
            unmet.push("no dedicated GPU as requested".to_string());
        }

        if self.solid_state {
            let kind = hardware.storage.as_ref().map(|s| s.kind);
            if matches!(kind, None | Some(StorageKind::Hdd)) {
                unmet.push("no SSD as requested".to_string());
            }
        }

        unmet
    }
}

/// A stated amount and where it sits in the text
#[derive(Debug, Clone)]
struct AmountMatch {
    span: Range<usize>,
    gb: u32,
}

impl AmountMatch {
    fn overlaps(&self, others: &[AmountMatch]) -> bool {
        others
            .iter()
            .any(|other| self.span.start < other.span.end && other.span.start < self.span.end)
    }
}

/// Every amount `pattern` finds, in text order, converted to GB
fn amounts(pattern: &Regex, text: &str) -> Vec<AmountMatch> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| amount_in(&caps))
        .collect()
}

fn amount_in(caps: &Captures<'_>) -> Option<AmountMatch> {
    let digits = caps.get(1)?;
    let amount: u32 = digits.as_str().parse().ok()?;
    let gb = match caps.get(2) {
        Some(unit) if unit.as_str().eq_ignore_ascii_case("tb") => amount.checked_mul(1024)?,
        _ => amount,
    };
    Some(AmountMatch {
        span: digits.range(),
        gb,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::{GpuSpec, StorageSpec};

    #[test]
    fn test_parse_ram_and_gpu() {
        let hints = RequirementHints::parse("16GB RAM, RTX 4060");
        assert_eq!(hints.min_ram_gb, Some(16));
        assert!(hints.dedicated_gpu);
        assert!(!hints.solid_state);
    }

    #[test]
    fn test_parse_phrase_with_connectors() {
        let hints = RequirementHints::parse("Preciso de pelo menos 16GB de RAM e SSD de 500GB");
        assert_eq!(hints.min_ram_gb, Some(16));
        assert_eq!(hints.min_storage_gb, Some(500));
        assert!(hints.solid_state);
    }

    #[test]
    fn test_parse_amount_between_keywords() {
        let hints = RequirementHints::parse("RAM 16GB SSD 512GB");
        assert_eq!(hints.min_ram_gb, Some(16));
        assert_eq!(hints.min_storage_gb, Some(512));

        let hints = RequirementHints::parse("SSD 512GB RAM 16GB");
        assert_eq!(hints.min_ram_gb, Some(16));
        assert_eq!(hints.min_storage_gb, Some(512));

        let hints = RequirementHints::parse("16GB RAM, 1TB SSD");
        assert_eq!(hints.min_ram_gb, Some(16));
        assert_eq!(hints.min_storage_gb, Some(1024));
    }

    #[test]
    fn test_storage_amount_between_keywords_is_labelled() {
        let hints = RequirementHints::parse("RAM 16GB SSD 512GB");
        let hardware = HardwareProfile {
            ram_gb: Some(16),
            storage: Some(StorageSpec {
                kind: StorageKind::Ssd,
                capacity_gb: 256,
            }),
            ..HardwareProfile::default()
        };
        assert_eq!(
            hints.unmet(&hardware),
            vec!["less than the requested 512GB storage".to_string()]
        );
    }

    #[test]
    fn test_parse_terabytes() {
        let hints = RequirementHints::parse("1TB NVMe please");
        assert_eq!(hints.min_storage_gb, Some(1024));
        assert!(hints.solid_state);
    }

    #[test]
    fn test_empty_text_has_no_hints() {
        assert!(RequirementHints::parse("").is_empty());
        assert!(RequirementHints::parse("something nice and quiet").is_empty());
    }

    #[test]
    fn test_unmet_requirements() {
        let hints = RequirementHints::parse("32GB RAM, RTX, SSD 1TB");
        let hardware = HardwareProfile {
            ram_gb: Some(16),
            gpu: Some(GpuSpec::integrated()),
            storage: Some(StorageSpec {
                kind: StorageKind::Ssd,
                capacity_gb: 512,
            }),
            ..HardwareProfile::default()
        };

        let unmet = hints.unmet(&hardware);
        assert_eq!(unmet.len(), 3);
        assert!(unmet[0].contains("32GB RAM"));
        assert!(unmet[2].contains("GPU"));
    }

    #[test]
    fn test_missing_attributes_count_as_unmet() {
        let hints = RequirementHints::parse("8GB RAM SSD");
        let unmet = hints.unmet(&HardwareProfile::default());
        assert_eq!(unmet.len(), 2);
    }
}
