//! Festival calendar reference data.
//!
//! A [`FestivalCalendar`] is loaded once (built in, or from a TOML file) and
//! then shared read-only. Unknown waste types or surge levels in a calendar
//! file are rejected when the file is parsed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::ConfigError;

/// Dominant waste stream a festival produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FestivalWasteType {
    Organic,
    Plastic,
    Hazardous,
    Mixed,
}

/// Predicted severity of a waste-volume surge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurgeLevel {
    High,
    Medium,
    Low,
}

impl fmt::Display for SurgeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SurgeLevel::High => "High",
            SurgeLevel::Medium => "Medium",
            SurgeLevel::Low => "Low",
        };
        f.write_str(s)
    }
}

/// A dated cultural or religious event with a known waste impact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Festival {
    pub name: String,
    pub date: NaiveDate,
    pub waste_type: FestivalWasteType,
    pub surge_level: SurgeLevel,
    #[serde(default)]
    pub description: String,
}

impl Festival {
    pub fn new(
        name: impl Into<String>,
        date: NaiveDate,
        waste_type: FestivalWasteType,
        surge_level: SurgeLevel,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            date,
            waste_type,
            surge_level,
            description: description.into(),
        }
    }
}

type CalendarRow = (&'static str, (i32, u32, u32), FestivalWasteType, SurgeLevel, &'static str);

const TAMIL_NADU_2026: &[CalendarRow] = {
    use FestivalWasteType::*;
    use SurgeLevel::*;
    &[
        ("Pongal", (2026, 1, 14), Organic, High, "Harvest festival. Expect high organic waste (sugarcane, banana leaves)."),
        ("Mattu Pongal", (2026, 1, 15), Organic, Medium, "Cattle worship. Organic waste surge."),
        ("Kaanum Pongal", (2026, 1, 16), Plastic, High, "Outings and gatherings. Expect high plastic/litter."),
        ("Thaipusam", (2026, 2, 2), Mixed, High, "Temple festivals. Plastic and organic waste surge."),
        ("Tamil New Year", (2026, 4, 14), Organic, Medium, "Feasts and decorations."),
        ("Vinayagar Chaturthi", (2026, 9, 14), Hazardous, High, "Idol immersion. Potential water pollution and POP waste."),
        ("Diwali", (2026, 11, 8), Hazardous, High, "Firecracker waste (hazardous) and packaging (plastic)."),
        ("Karthigai Deepam", (2026, 11, 23), Organic, Medium, "Lamps and oil waste."),
        ("Christmas", (2026, 12, 25), Plastic, Medium, "Decorations and packaging."),
    ]
};

/// Ordered festival table. Table order is significant: it breaks ties
/// between festivals on the same date and decides which of several nearby
/// festivals triggers a surge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FestivalCalendar {
    #[serde(default)]
    festivals: Vec<Festival>,
}

impl FestivalCalendar {
    pub fn new(festivals: Vec<Festival>) -> Self {
        Self { festivals }
    }

    /// Built-in 2026 Tamil Nadu calendar.
    pub fn tamil_nadu() -> Self {
        let festivals = TAMIL_NADU_2026
            .iter()
            .filter_map(|&(name, (y, m, d), waste_type, surge_level, description)| {
                NaiveDate::from_ymd_opt(y, m, d)
                    .map(|date| Festival::new(name, date, waste_type, surge_level, description))
            })
            .collect();
        Self { festivals }
    }

    /// Parse a calendar of `[[festivals]]` tables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseFailed`] for malformed TOML, bad dates or
    /// unknown enum values.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Load a calendar file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LoadFailed`] if the file cannot be read, or a
    /// parse error as in [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let calendar = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), festivals = calendar.len(), "loaded festival calendar");
        Ok(calendar)
    }

    pub fn festivals(&self) -> &[Festival] {
        &self.festivals
    }

    /// Case-insensitive lookup by name; first match in table order.
    pub fn find(&self, name: &str) -> Option<&Festival> {
        self.festivals
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.festivals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.festivals.is_empty()
    }
}
