//! Collection urgency ranking.
//!
//! Trucks have limited daily capacity, so only active bins past the
//! midpoint are scheduled, fullest first. Critical bins (>= 90%) are
//! reported separately for alert banners, whatever their status.

use serde::{Deserialize, Serialize};

use crate::bins::SmartBin;

/// Bins must be strictly above this fill level to be scheduled.
pub const PICKUP_THRESHOLD: u8 = 50;

/// Bins at or above this fill level raise a critical alert.
pub const CRITICAL_THRESHOLD: u8 = 90;

/// A scheduled bin with its 0-based position in the pickup order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrioritizedBin {
    pub rank: usize,
    pub bin: SmartBin,
}

/// Pickup order and alert subset computed from one fleet snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionPlan {
    pub stops: Vec<PrioritizedBin>,
    pub critical: Vec<SmartBin>,
}

/// Stateless ranking of bins by collection urgency.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinPrioritizer;

impl BinPrioritizer {
    pub fn new() -> Self {
        Self
    }

    /// Active bins above [`PICKUP_THRESHOLD`], sorted by fill level descending.
    ///
    /// The sort is stable: bins with equal fill levels keep their input order.
    pub fn prioritize(&self, bins: &[SmartBin]) -> Vec<SmartBin> {
        let mut selected: Vec<SmartBin> = bins
            .iter()
            .filter(|b| b.is_active() && b.fill_level > PICKUP_THRESHOLD)
            .cloned()
            .collect();
        selected.sort_by(|a, b| b.fill_level.cmp(&a.fill_level));
        selected
    }

    /// [`prioritize`](Self::prioritize) with each bin's rank attached.
    pub fn rank(&self, bins: &[SmartBin]) -> Vec<PrioritizedBin> {
        self.prioritize(bins)
            .into_iter()
            .enumerate()
            .map(|(rank, bin)| PrioritizedBin { rank, bin })
            .collect()
    }

    /// Bins at or above [`CRITICAL_THRESHOLD`], in input order.
    pub fn find_critical(&self, bins: &[SmartBin]) -> Vec<SmartBin> {
        bins.iter()
            .filter(|b| b.fill_level >= CRITICAL_THRESHOLD)
            .cloned()
            .collect()
    }

    pub fn plan(&self, bins: &[SmartBin]) -> CollectionPlan {
        let plan = CollectionPlan {
            stops: self.rank(bins),
            critical: self.find_critical(bins),
        };
        tracing::debug!(
            fleet = bins.len(),
            stops = plan.stops.len(),
            critical = plan.critical.len(),
            "computed collection plan"
        );
        plan
    }
}

/// Shorthand for [`BinPrioritizer::prioritize`].
pub fn prioritize(bins: &[SmartBin]) -> Vec<SmartBin> {
    BinPrioritizer.prioritize(bins)
}

/// Shorthand for [`BinPrioritizer::find_critical`].
pub fn find_critical(bins: &[SmartBin]) -> Vec<SmartBin> {
    BinPrioritizer.find_critical(bins)
}
