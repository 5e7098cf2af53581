mod config;

pub use config::{Config, FuelConfig, SurgeConfig};

use std::path::PathBuf;

/// Returns `~/.config/wastewise[-dev]/` based on WASTEWISE_ENV.
///
/// Set WASTEWISE_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("WASTEWISE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("wastewise-dev")
    } else {
        base_dir.join("wastewise")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
