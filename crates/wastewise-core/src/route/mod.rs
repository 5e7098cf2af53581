//! Collection route support.
//!
//! No path finding happens here: routes are ordered purely by bin urgency,
//! and savings are estimated from route lengths computed elsewhere.

mod fuel;
mod prioritizer;

pub use fuel::{
    estimate_savings, FuelModel, FuelSavings, RouteLengths, DEFAULT_FUEL_PRICE_PER_LITER,
    DEFAULT_MILEAGE_KM_PER_LITER,
};
pub use prioritizer::{
    find_critical, prioritize, BinPrioritizer, CollectionPlan, PrioritizedBin,
    CRITICAL_THRESHOLD, PICKUP_THRESHOLD,
};
