//! TOML-based application configuration.
//!
//! Stores engine settings including:
//! - Fuel model (price per liter, truck mileage)
//! - Surge window and an optional festival calendar file
//!
//! Configuration is stored at `~/.config/wastewise/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::route::{FuelModel, DEFAULT_FUEL_PRICE_PER_LITER, DEFAULT_MILEAGE_KM_PER_LITER};
use crate::surge::{FestivalCalendar, SurgePredictor, DEFAULT_SURGE_WINDOW_DAYS};

/// Fuel model configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelConfig {
    #[serde(default = "default_price_per_liter")]
    pub price_per_liter: f64,
    #[serde(default = "default_mileage")]
    pub mileage_km_per_liter: f64,
}

/// Surge prediction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurgeConfig {
    #[serde(default = "default_window_days")]
    pub window_days: i64,
    /// Festival calendar file. The built-in Tamil Nadu calendar is used
    /// when unset.
    #[serde(default)]
    pub calendar_path: Option<PathBuf>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/wastewise/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fuel: FuelConfig,
    #[serde(default)]
    pub surge: SurgeConfig,
}

fn default_price_per_liter() -> f64 {
    DEFAULT_FUEL_PRICE_PER_LITER
}
fn default_mileage() -> f64 {
    DEFAULT_MILEAGE_KM_PER_LITER
}
fn default_window_days() -> i64 {
    DEFAULT_SURGE_WINDOW_DAYS
}

impl Default for FuelConfig {
    fn default() -> Self {
        Self {
            price_per_liter: default_price_per_liter(),
            mileage_km_per_liter: default_mileage(),
        }
    }
}

impl Default for SurgeConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            calendar_path: None,
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::InvalidValue {
            key: key.to_string(),
            message: "unknown config key".into(),
        };
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Number(n) if n.is_i64() || n.is_u64() => value
                        .parse::<i64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?,
                    serde_json::Value::Number(_) => value
                        .parse::<f64>()
                        .ok()
                        .and_then(serde_json::Number::from_f64)
                        .map(serde_json::Value::Number)
                        .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Bool(_) => value
                        .parse::<bool>()
                        .map(serde_json::Value::Bool)
                        .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("cannot set a whole section".into()));
                    }
                    _ if value.is_empty() => serde_json::Value::Null,
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/wastewise"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from the default location, writing defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// fails validation, or if the default config cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load and validate a config file at an explicit path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LoadFailed`] if the file cannot be read,
    /// [`ConfigError::ParseFailed`] if it is not valid TOML, and
    /// [`ConfigError::InvalidValue`] if a value is out of range.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg: Config =
            toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        cfg.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SaveFailed`] on serialization or write failure.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, in memory.
    ///
    /// An empty value clears an optional path. The caller persists with
    /// [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the resulting config fails validation.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fuel_model()?;
        if self.surge.window_days < 0 {
            return Err(ConfigError::InvalidValue {
                key: "surge.window_days".into(),
                message: format!("must not be negative, got {}", self.surge.window_days),
            });
        }
        Ok(())
    }

    /// Fuel model described by the `[fuel]` section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a non-positive mileage or a
    /// negative price.
    pub fn fuel_model(&self) -> Result<FuelModel, ConfigError> {
        FuelModel::new(self.fuel.price_per_liter, self.fuel.mileage_km_per_liter).map_err(
            |e| match ConfigError::from(e) {
                ConfigError::InvalidValue { key, message } => ConfigError::InvalidValue {
                    key: format!("fuel.{key}"),
                    message,
                },
                other => other,
            },
        )
    }

    /// Festival calendar: the configured file, or the built-in calendar.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured calendar file cannot be loaded.
    pub fn festival_calendar(&self) -> Result<FestivalCalendar, ConfigError> {
        match &self.surge.calendar_path {
            Some(path) => FestivalCalendar::load(path),
            None => Ok(FestivalCalendar::tamil_nadu()),
        }
    }

    /// Surge predictor wired with the configured calendar and window.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured calendar file cannot be loaded.
    pub fn surge_predictor(&self) -> Result<SurgePredictor, ConfigError> {
        Ok(SurgePredictor::with_window(
            self.festival_calendar()?,
            self.surge.window_days,
        ))
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default config");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.fuel.price_per_liter, 102.0);
        assert_eq!(parsed.surge.window_days, 3);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: Config = toml::from_str(indoc! {r#"
            [fuel]
            mileage_km_per_liter = 12.5
        "#})
        .unwrap();
        assert_eq!(cfg.fuel.mileage_km_per_liter, 12.5);
        assert_eq!(cfg.fuel.price_per_liter, 102.0);
        assert_eq!(cfg.surge, SurgeConfig::default());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("surge.window_days").as_deref(), Some("3"));
        assert_eq!(cfg.get("fuel.price_per_liter").as_deref(), Some("102.0"));
        assert_eq!(cfg.get("surge.calendar_path").as_deref(), Some("null"));
        assert!(cfg.get("fuel.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_numbers_and_paths() {
        let mut cfg = Config::default();
        cfg.set("fuel.price_per_liter", "95.5").unwrap();
        cfg.set("surge.window_days", "5").unwrap();
        cfg.set("surge.calendar_path", "/etc/wastewise/festivals.toml").unwrap();
        assert_eq!(cfg.fuel.price_per_liter, 95.5);
        assert_eq!(cfg.surge.window_days, 5);
        assert_eq!(
            cfg.surge.calendar_path.as_deref(),
            Some(Path::new("/etc/wastewise/festivals.toml"))
        );

        cfg.set("surge.calendar_path", "").unwrap();
        assert!(cfg.surge.calendar_path.is_none());
    }

    #[test]
    fn set_rejects_unknown_key_and_bad_values() {
        let mut cfg = Config::default();
        assert!(cfg.set("fuel.nonexistent", "1").is_err());
        assert!(cfg.set("fuel", "1").is_err());
        assert!(cfg.set("surge.window_days", "three").is_err());
        assert!(cfg.set("surge.window_days", "-1").is_err());
        assert!(cfg.set("fuel.mileage_km_per_liter", "0").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_from_rejects_zero_mileage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[fuel]\nmileage_km_per_liter = 0.0\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        match err {
            ConfigError::InvalidValue { key, .. } => assert_eq!(key, "fuel.mileage_km_per_liter"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn save_to_then_load_from() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set("fuel.price_per_liter", "110").unwrap();
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn surge_predictor_uses_configured_calendar() {
        let dir = tempfile::tempdir().unwrap();
        let calendar_path = dir.path().join("festivals.toml");
        std::fs::write(
            &calendar_path,
            indoc! {r#"
                [[festivals]]
                name = "Onam"
                date = "2026-08-26"
                waste_type = "Organic"
                surge_level = "High"
            "#},
        )
        .unwrap();

        let mut cfg = Config::default();
        cfg.surge.calendar_path = Some(calendar_path);
        cfg.surge.window_days = 1;
        let predictor = cfg.surge_predictor().unwrap();
        assert_eq!(predictor.festivals().len(), 1);
        assert_eq!(predictor.window_days(), 1);
    }

    #[test]
    fn default_predictor_uses_builtin_calendar() {
        let predictor = Config::default().surge_predictor().unwrap();
        assert_eq!(predictor.festivals().len(), 9);
    }
}
