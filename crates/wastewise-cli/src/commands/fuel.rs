use clap::Subcommand;
use serde::Serialize;
use wastewise_core::{Config, RouteLengths};

#[derive(Subcommand)]
pub enum FuelAction {
    /// Fuel and cost saved by an optimized route
    Savings {
        /// Baseline route length in km
        #[arg(allow_negative_numbers = true)]
        original_km: f64,
        /// Optimized route length in km
        #[arg(allow_negative_numbers = true)]
        optimized_km: f64,
    },
}

/// Display-ready savings, rounded to two decimals.
#[derive(Serialize)]
struct SavingsReport {
    original_km: f64,
    optimized_km: f64,
    liters: String,
    cost: String,
}

pub fn run(action: FuelAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        FuelAction::Savings {
            original_km,
            optimized_km,
        } => {
            let model = Config::load_or_default().fuel_model()?;
            let savings = model.estimate(RouteLengths::new(original_km, optimized_km));
            let report = SavingsReport {
                original_km,
                optimized_km,
                liters: format!("{:.2}", savings.liters),
                cost: format!("{:.2}", savings.cost),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
