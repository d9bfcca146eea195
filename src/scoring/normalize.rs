//! Attribute normalization against fixed reference scales
//!
//! Scales are absolute, not relative to the catalog, so a product scores the
//! same no matter what else is listed next to it. A missing attribute maps to
//! the lowest tier of its scale.

use std::collections::BTreeMap;

use super::models::{Dimension, Signal};
use crate::catalog::{CpuTier, GpuKind, GpuTier, HardwareProfile, ProductSpec, StorageKind};

/// Normalized signals for the dimensions that apply to a product
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedProfile {
    signals: BTreeMap<Dimension, Signal>,
}

impl NormalizedProfile {
    /// Signal for `dimension`, `None` when it does not apply to the product
    pub fn signal(&self, dimension: Dimension) -> Option<Signal> {
        self.signals.get(&dimension).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, Signal)> + '_ {
        self.signals.iter().map(|(d, s)| (*d, *s))
    }
}

/// Normalize every applicable dimension of a product
pub fn normalize(product: &ProductSpec) -> NormalizedProfile {
    let portable = product.is_portable();
    let signals = Dimension::ALL
        .iter()
        .filter(|dimension| portable || !dimension.is_portable_only())
        .map(|dimension| (*dimension, signal_for(*dimension, &product.attributes)))
        .collect();

    NormalizedProfile { signals }
}

/// Normalize a single dimension of a hardware profile
pub fn signal_for(dimension: Dimension, hardware: &HardwareProfile) -> Signal {
    let value = match dimension {
        Dimension::Cpu => hardware.cpu_tier.map(cpu_scale),
        Dimension::Gpu => hardware.gpu.as_ref().map(|gpu| gpu_scale(gpu.kind, gpu.tier)),
        Dimension::Vram => hardware.gpu.as_ref().and_then(|gpu| gpu.vram_gb).map(vram_scale),
        Dimension::Ram => hardware.ram_gb.map(ram_scale),
        Dimension::StorageSpeed => hardware
            .storage
            .as_ref()
            .map(|storage| storage_speed_scale(storage.kind)),
        Dimension::StorageCapacity => hardware
            .storage
            .as_ref()
            .map(|storage| storage_capacity_scale(storage.capacity_gb)),
        Dimension::Display => hardware.screen.as_ref().map(|screen| refresh_scale(screen.refresh_hz)),
        Dimension::Battery => hardware.battery_hours.map(battery_scale),
    };
    Signal::new(value.unwrap_or_else(|| lowest_tier(dimension)))
}

/// Bottom of the reference scale for `dimension`
pub fn lowest_tier(dimension: Dimension) -> f64 {
    match dimension {
        Dimension::Cpu => cpu_scale(CpuTier::Entry),
        Dimension::Gpu => gpu_scale(GpuKind::Integrated, None),
        Dimension::Vram => vram_scale(0),
        Dimension::Ram => ram_scale(0),
        Dimension::StorageSpeed => storage_speed_scale(StorageKind::Hdd),
        Dimension::StorageCapacity => storage_capacity_scale(0),
        Dimension::Display => refresh_scale(0),
        Dimension::Battery => battery_scale(0.0),
    }
}

fn cpu_scale(tier: CpuTier) -> f64 {
    match tier {
        CpuTier::Entry => 0.30,
        CpuTier::Mainstream => 0.55,
        CpuTier::Performance => 0.80,
        CpuTier::Enthusiast => 1.00,
    }
}

/// Integrated graphics sit at the bottom regardless of any tier claim
fn gpu_scale(kind: GpuKind, tier: Option<GpuTier>) -> f64 {
    match (kind, tier) {
        (GpuKind::Integrated, _) => 0.15,
        (GpuKind::Dedicated, None) | (GpuKind::Dedicated, Some(GpuTier::Entry)) => 0.50,
        (GpuKind::Dedicated, Some(GpuTier::Mainstream)) => 0.75,
        (GpuKind::Dedicated, Some(GpuTier::Performance)) => 0.90,
        (GpuKind::Dedicated, Some(GpuTier::Enthusiast)) => 1.00,
    }
}

fn vram_scale(gb: u32) -> f64 {
    match gb {
        0 => 0.0,
        1..=3 => 0.30,
        4..=7 => 0.55,
        8..=11 => 0.80,
        _ => 1.00,
    }
}

/// Under 8GB is low, 8-16GB mid, above 16GB high
fn ram_scale(gb: u32) -> f64 {
    match gb {
        0..=7 => 0.20,
        8..=11 => 0.50,
        12..=16 => 0.70,
        17..=32 => 0.85,
        _ => 1.00,
    }
}

fn storage_speed_scale(kind: StorageKind) -> f64 {
    match kind {
        StorageKind::Hdd => 0.20,
        StorageKind::Hybrid => 0.50,
        StorageKind::Ssd => 0.75,
        StorageKind::Nvme => 1.00,
    }
}

fn storage_capacity_scale(gb: u32) -> f64 {
    match gb {
        0..=255 => 0.20,
        256..=511 => 0.45,
        512..=1023 => 0.65,
        1024..=2047 => 0.85,
        _ => 1.00,
    }
}

fn refresh_scale(hz: u32) -> f64 {
    match hz {
        0..=59 => 0.20,
        60..=89 => 0.45,
        90..=119 => 0.60,
        120..=143 => 0.80,
        144..=239 => 0.90,
        _ => 1.00,
    }
}

fn battery_scale(hours: f32) -> f64 {
    let hours = f64::from(hours);
    if !hours.is_finite() || hours < 4.0 {
        0.20
    } else if hours < 6.0 {
        0.45
    } else if hours < 8.0 {
        0.60
    } else if hours < 10.0 {
        0.80
    } else {
        1.00
    }
}
