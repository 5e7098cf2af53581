//! Smart bin data model.
//!
//! A [`SmartBin`] is a read-only view of one sensor-equipped container as
//! last reported by the telemetry pipeline. The engine never mutates bins;
//! raw database records are converted at the [`ingest`] boundary.

pub mod ingest;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use ingest::{ingest_snapshot, BinSnapshot, RejectedRecord};

/// Operational status of a bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationalStatus {
    Active,
    Inactive,
    Maintenance,
}

/// Waste stream a bin is dedicated to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinWasteType {
    Organic,
    Recyclable,
    Hazardous,
    Mixed,
}

/// Display band for a fill level, as shown on bin status badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FillBand {
    /// Below 40%
    Low,
    /// 40% to 69%
    Partial,
    /// 70% to 89%
    AlmostFull,
    /// 90% and above
    Overflow,
}

impl FillBand {
    pub fn from_fill_level(fill_level: u8) -> Self {
        match fill_level {
            90.. => FillBand::Overflow,
            70..=89 => FillBand::AlmostFull,
            40..=69 => FillBand::Partial,
            _ => FillBand::Low,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FillBand::Low => "Low",
            FillBand::Partial => "Partial",
            FillBand::AlmostFull => "Almost Full",
            FillBand::Overflow => "Overflow",
        }
    }
}

/// Geographic position of a bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinLocation {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub address: String,
}

/// A sensor-equipped waste container.
///
/// Serialized with the realtime database's camelCase field names, so
/// emitted bins can be ingested again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartBin {
    /// Unique identifier (database key)
    pub id: String,
    /// Human-facing label, e.g. `BIN001`
    pub bin_id: String,
    /// Fill percentage reported by the sensor (0-100)
    pub fill_level: u8,
    pub status: OperationalStatus,
    pub waste_type: BinWasteType,
    #[serde(default)]
    pub ward_number: Option<String>,
    #[serde(default)]
    pub location: Option<BinLocation>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl SmartBin {
    /// Create a bin with the fields the engine reads; metadata left empty.
    pub fn new(id: impl Into<String>, fill_level: u8, status: OperationalStatus) -> Self {
        let id = id.into();
        Self {
            bin_id: id.clone(),
            id,
            fill_level,
            status,
            waste_type: BinWasteType::Mixed,
            ward_number: None,
            location: None,
            last_updated: None,
        }
    }

    pub fn with_waste_type(mut self, waste_type: BinWasteType) -> Self {
        self.waste_type = waste_type;
        self
    }

    pub fn with_ward(mut self, ward_number: impl Into<String>) -> Self {
        self.ward_number = Some(ward_number.into());
        self
    }

    pub fn with_location(mut self, location: BinLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_last_updated(mut self, at: DateTime<Utc>) -> Self {
        self.last_updated = Some(at);
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == OperationalStatus::Active
    }

    pub fn fill_band(&self) -> FillBand {
        FillBand::from_fill_level(self.fill_level)
    }
}
