//! Product specification records supplied by the catalog collaborator

use serde::{Deserialize, Serialize};

use crate::intent::Category;

/// Relative CPU class, independent of vendor
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CpuTier {
    Entry,
    Mainstream,
    Performance,
    Enthusiast,
}

/// Relative GPU class
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GpuTier {
    Entry,
    Mainstream,
    Performance,
    Enthusiast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GpuKind {
    Integrated,
    Dedicated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuSpec {
    pub kind: GpuKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<GpuTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vram_gb: Option<u32>,
}

impl GpuSpec {
    pub fn integrated() -> Self {
        Self {
            kind: GpuKind::Integrated,
            tier: None,
            vram_gb: None,
        }
    }

    pub fn dedicated(tier: GpuTier, vram_gb: u32) -> Self {
        Self {
            kind: GpuKind::Dedicated,
            tier: Some(tier),
            vram_gb: Some(vram_gb),
        }
    }

    pub fn is_dedicated(&self) -> bool {
        self.kind == GpuKind::Dedicated
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    Hdd,
    /// SSD boot drive paired with an HDD
    Hybrid,
    Ssd,
    Nvme,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSpec {
    pub kind: StorageKind,
    pub capacity_gb: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenSpec {
    pub size_inches: f32,
    pub refresh_hz: u32,
}

/// Structured hardware attributes; any of them may be absent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HardwareProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_tier: Option<CpuTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu: Option<GpuSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram_gb: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen: Option<ScreenSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_hours: Option<f32>,
}

/// Catalog entry. Read-only input to the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSpec {
    pub id: String,
    pub name: String,
    /// Listed price in currency units
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub store: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default)]
    pub attributes: HardwareProfile,
}

impl ProductSpec {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            original_price: None,
            store: String::new(),
            category: None,
            attributes: HardwareProfile::default(),
        }
    }

    pub fn with_original_price(mut self, original_price: f64) -> Self {
        self.original_price = Some(original_price);
        self
    }

    pub fn with_store(mut self, store: impl Into<String>) -> Self {
        self.store = store.into();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_attributes(mut self, attributes: HardwareProfile) -> Self {
        self.attributes = attributes;
        self
    }

    /// Listed price is a finite, non-negative number
    pub fn has_valid_price(&self) -> bool {
        self.price.is_finite() && self.price >= 0.0
    }

    /// Whether the record satisfies the price invariants
    /// (price ≥ 0, original ≥ price when a discount is present)
    pub fn is_consistent(&self) -> bool {
        if !self.has_valid_price() {
            return false;
        }
        match self.original_price {
            Some(original) => original.is_finite() && original >= self.price,
            None => true,
        }
    }

    /// Whole-percent discount from the original price, if any
    pub fn discount_percent(&self) -> Option<u8> {
        let original = self.original_price?;
        if !self.has_valid_price() || !original.is_finite() || original <= self.price {
            return None;
        }
        let percent = ((original - self.price) / original * 100.0).round();
        Some(percent.clamp(0.0, 100.0) as u8)
    }

    /// Battery and display only apply to portable products; unknown
    /// categories are treated as portable
    pub fn is_portable(&self) -> bool {
        self.category.map_or(true, |c| c.is_portable())
    }
}
