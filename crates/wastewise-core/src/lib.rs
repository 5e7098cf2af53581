//! # WasteWise Core Library
//!
//! Decision-support logic behind the WasteWise municipal waste dashboard.
//! Every operation is a pure function over immutable inputs; the CLI binary
//! and any dashboard front end are thin layers over this crate.
//!
//! ## Architecture
//!
//! - **Bins**: the smart bin data model and the realtime snapshot ingestion
//!   boundary that rejects malformed records
//! - **Route**: collection urgency ranking, critical alerts and fuel savings
//! - **Surge**: festival calendar, surge prediction and calendar alerts
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`BinPrioritizer`]: pickup order and critical subset for a fleet
//! - [`FuelModel`]: fuel and cost savings for an optimized route
//! - [`SurgePredictor`]: nearest festival and surge level for a date
//! - [`Config`]: Application configuration management

pub mod bins;
pub mod error;
pub mod route;
pub mod storage;
pub mod surge;

pub use bins::{
    ingest_snapshot, BinLocation, BinSnapshot, BinWasteType, FillBand, OperationalStatus,
    SmartBin,
};
pub use error::{ConfigError, CoreError, IngestError, ValidationError};
pub use route::{
    estimate_savings, find_critical, prioritize, BinPrioritizer, CollectionPlan, FuelModel,
    FuelSavings, PrioritizedBin, RouteLengths,
};
pub use storage::Config;
pub use surge::{
    assess_surge, calendar_alert_url, nearest_upcoming, Festival, FestivalCalendar,
    FestivalWasteType, SurgeAssessment, SurgeLevel, SurgePredictor,
};
