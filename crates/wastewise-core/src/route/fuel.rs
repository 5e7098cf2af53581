//! Fuel savings estimation for optimized collection routes.
//!
//! Savings are linear in the distance saved under a fixed consumption
//! model. A route that got longer saves nothing; results never go negative.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Default diesel price per liter (local currency).
pub const DEFAULT_FUEL_PRICE_PER_LITER: f64 = 102.0;

/// Default truck mileage in km per liter.
pub const DEFAULT_MILEAGE_KM_PER_LITER: f64 = 15.0;

/// Baseline and optimized lengths of the same route, in km.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteLengths {
    pub original_km: f64,
    pub optimized_km: f64,
}

impl RouteLengths {
    pub fn new(original_km: f64, optimized_km: f64) -> Self {
        Self {
            original_km,
            optimized_km,
        }
    }

    /// Distance saved; negative when the optimized route is longer.
    pub fn savings_km(&self) -> f64 {
        self.original_km - self.optimized_km
    }
}

/// Fuel and money saved by driving the optimized route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelSavings {
    pub liters: f64,
    pub cost: f64,
}

impl fmt::Display for FuelSavings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} L ({:.2} saved)", self.liters, self.cost)
    }
}

/// Consumption model used to convert distance into fuel and cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelModel {
    pub price_per_liter: f64,
    pub mileage_km_per_liter: f64,
}

impl Default for FuelModel {
    fn default() -> Self {
        Self {
            price_per_liter: DEFAULT_FUEL_PRICE_PER_LITER,
            mileage_km_per_liter: DEFAULT_MILEAGE_KM_PER_LITER,
        }
    }
}

impl FuelModel {
    /// Build a model from externally supplied constants.
    ///
    /// # Errors
    ///
    /// Mileage must be finite and positive; price must be finite and not
    /// negative.
    pub fn new(price_per_liter: f64, mileage_km_per_liter: f64) -> Result<Self, ValidationError> {
        if !mileage_km_per_liter.is_finite() || mileage_km_per_liter <= 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "mileage_km_per_liter".into(),
                message: format!("must be greater than zero, got {mileage_km_per_liter}"),
            });
        }
        if !price_per_liter.is_finite() || price_per_liter < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "price_per_liter".into(),
                message: format!("must not be negative, got {price_per_liter}"),
            });
        }
        Ok(Self {
            price_per_liter,
            mileage_km_per_liter,
        })
    }

    pub fn estimate(&self, lengths: RouteLengths) -> FuelSavings {
        let liters = (lengths.savings_km() / self.mileage_km_per_liter).max(0.0);
        FuelSavings {
            liters,
            cost: (liters * self.price_per_liter).max(0.0),
        }
    }
}

/// Savings under the default model.
pub fn estimate_savings(original_km: f64, optimized_km: f64) -> FuelSavings {
    FuelModel::default().estimate(RouteLengths::new(original_km, optimized_km))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn twenty_km_saved() {
        let savings = estimate_savings(100.0, 80.0);
        assert!((savings.liters - 20.0 / 15.0).abs() < EPS);
        assert!((savings.cost - 136.0).abs() < EPS);
        assert_eq!(format!("{:.2}", savings.liters), "1.33");
        assert_eq!(format!("{:.2}", savings.cost), "136.00");
    }

    #[test]
    fn longer_route_saves_nothing() {
        let savings = estimate_savings(80.0, 100.0);
        assert_eq!(savings, FuelSavings::default());
        assert_eq!(savings.to_string(), "0.00 L (0.00 saved)");
    }

    #[test]
    fn negative_lengths_do_not_panic() {
        let savings = estimate_savings(-10.0, -40.0);
        assert!((savings.liters - 2.0).abs() < EPS);
        let savings = estimate_savings(-40.0, -10.0);
        assert_eq!(savings.liters, 0.0);
    }

    #[test]
    fn custom_model_uses_its_constants() {
        let model = FuelModel::new(100.0, 10.0).unwrap();
        let savings = model.estimate(RouteLengths::new(50.0, 30.0));
        assert!((savings.liters - 2.0).abs() < EPS);
        assert!((savings.cost - 200.0).abs() < EPS);
    }

    #[test]
    fn model_rejects_non_positive_mileage() {
        assert!(FuelModel::new(102.0, 0.0).is_err());
        assert!(FuelModel::new(102.0, -5.0).is_err());
        assert!(FuelModel::new(102.0, f64::NAN).is_err());
        assert!(FuelModel::new(-1.0, 15.0).is_err());
        assert!(FuelModel::new(0.0, 15.0).is_ok());
    }
}
