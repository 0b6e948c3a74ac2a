//! # Verifier Configuration
//!
//! Configuration management for the receipt verifier.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CASA_RETENTION_DAYS=365                                            │
//! │     CASA_UTC_OFFSET_MINUTES=-360                                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/casa-club/verifier.toml (Linux)                          │
//! │     ~/Library/Application Support/com.casaclub.casa-club/... (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     365-day retention, 10 recent entries, UTC, MXN                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # verifier.toml
//! [validation]
//! retention_days = 365
//! recent_limit = 10
//! cleanup_max_age_days = 1
//!
//! [display]
//! utc_offset_minutes = -360
//! currency = "MXN"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use casa_core::{DisplayOptions, DEFAULT_CURRENCY, DEFAULT_RETENTION_DAYS};

use crate::error::{VerifierError, VerifierResult};

/// Largest offset (in minutes) a fixed UTC offset can express.
const MAX_OFFSET_MINUTES: u32 = 24 * 60 - 1;

// =============================================================================
// Validation Settings
// =============================================================================

/// How receipts are validated and how the record store is maintained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSettings {
    /// Receipts generated longer ago than this many days are expired.
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,

    /// How many records `stats()` lists as recent.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// Age used by `cleanup_stale()`.
    #[serde(default = "default_cleanup_max_age_days")]
    pub cleanup_max_age_days: u32,

    /// Recorded on every validation as `validatedBy`.
    #[serde(default = "default_scanner_name")]
    pub scanner_name: String,
}

fn default_retention_days() -> u32 {
    DEFAULT_RETENTION_DAYS
}

fn default_recent_limit() -> usize {
    10
}

fn default_cleanup_max_age_days() -> u32 {
    1
}

fn default_scanner_name() -> String {
    "QR Scanner".to_string()
}

impl Default for ValidationSettings {
    fn default() -> Self {
        ValidationSettings {
            retention_days: default_retention_days(),
            recent_limit: default_recent_limit(),
            cleanup_max_age_days: default_cleanup_max_age_days(),
            scanner_name: default_scanner_name(),
        }
    }
}

// =============================================================================
// Display Settings
// =============================================================================

/// How verified receipts are presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Minutes east of UTC used for receipt dates and per-day stats.
    /// Mexico City is -360.
    #[serde(default)]
    pub utc_offset_minutes: i32,

    /// ISO 4217 code printed next to totals.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            utc_offset_minutes: 0,
            currency: default_currency(),
        }
    }
}

// =============================================================================
// Verifier Configuration
// =============================================================================

/// Complete verifier configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierConfig {
    #[serde(default)]
    pub validation: ValidationSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl VerifierConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (verifier.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> VerifierResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading verifier config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load verifier config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> VerifierResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| VerifierError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Verifier config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> VerifierResult<()> {
        if self.validation.retention_days == 0 {
            return Err(VerifierError::InvalidConfig(
                "retention_days must be greater than 0".into(),
            ));
        }

        if self.validation.recent_limit == 0 {
            return Err(VerifierError::InvalidConfig(
                "recent_limit must be greater than 0".into(),
            ));
        }

        if self.display.utc_offset_minutes.unsigned_abs() > MAX_OFFSET_MINUTES {
            return Err(VerifierError::InvalidConfig(format!(
                "utc_offset_minutes must be within ±{}, got {}",
                MAX_OFFSET_MINUTES, self.display.utc_offset_minutes
            )));
        }

        if self.display.currency.trim().is_empty() {
            return Err(VerifierError::InvalidConfig(
                "currency must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Display options derived from the `[display]` section.
    pub fn display_options(&self) -> VerifierResult<DisplayOptions> {
        DisplayOptions::from_offset_minutes(
            self.display.utc_offset_minutes,
            self.display.currency.clone(),
        )
        .ok_or_else(|| {
            VerifierError::InvalidConfig(format!(
                "utc_offset_minutes out of range: {}",
                self.display.utc_offset_minutes
            ))
        })
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var("CASA_RETENTION_DAYS") {
            match value.parse::<u32>() {
                Ok(days) => {
                    debug!(days, "Overriding retention days from environment");
                    self.validation.retention_days = days;
                }
                Err(_) => warn!(value = %value, "Ignoring invalid CASA_RETENTION_DAYS"),
            }
        }

        if let Ok(value) = std::env::var("CASA_RECENT_LIMIT") {
            match value.parse::<usize>() {
                Ok(limit) => self.validation.recent_limit = limit,
                Err(_) => warn!(value = %value, "Ignoring invalid CASA_RECENT_LIMIT"),
            }
        }

        if let Ok(value) = std::env::var("CASA_CLEANUP_MAX_AGE_DAYS") {
            match value.parse::<u32>() {
                Ok(days) => self.validation.cleanup_max_age_days = days,
                Err(_) => warn!(value = %value, "Ignoring invalid CASA_CLEANUP_MAX_AGE_DAYS"),
            }
        }

        if let Ok(value) = std::env::var("CASA_UTC_OFFSET_MINUTES") {
            match value.parse::<i32>() {
                Ok(minutes) => {
                    debug!(minutes, "Overriding display offset from environment");
                    self.display.utc_offset_minutes = minutes;
                }
                Err(_) => warn!(value = %value, "Ignoring invalid CASA_UTC_OFFSET_MINUTES"),
            }
        }

        if let Ok(currency) = std::env::var("CASA_CURRENCY") {
            self.display.currency = currency;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "casaclub", "casa-club")
            .map(|dirs| dirs.config_dir().join("verifier.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VerifierConfig::default();
        assert_eq!(config.validation.retention_days, 365);
        assert_eq!(config.validation.recent_limit, 10);
        assert_eq!(config.validation.cleanup_max_age_days, 1);
        assert_eq!(config.validation.scanner_name, "QR Scanner");
        assert_eq!(config.display.currency, "MXN");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = VerifierConfig::default();

        config.validation.retention_days = 0;
        assert!(config.validate().is_err());
        config.validation.retention_days = 30;

        config.validation.recent_limit = 0;
        assert!(config.validate().is_err());
        config.validation.recent_limit = 5;

        config.display.utc_offset_minutes = 24 * 60;
        assert!(config.validate().is_err());
        config.display.utc_offset_minutes = -360;

        config.display.currency = "  ".to_string();
        assert!(config.validate().is_err());
        config.display.currency = "USD".to_string();

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: VerifierConfig = toml::from_str(
            r#"
            [display]
            utc_offset_minutes = -360
            "#,
        )
        .unwrap();

        assert_eq!(config.display.utc_offset_minutes, -360);
        assert_eq!(config.display.currency, "MXN");
        assert_eq!(config.validation, ValidationSettings::default());
    }

    #[test]
    fn test_toml_serialization() {
        let config = VerifierConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[validation]"));
        assert!(toml_str.contains("[display]"));

        let back: VerifierConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_display_options() {
        let mut config = VerifierConfig::default();
        config.display.utc_offset_minutes = -360;
        let options = config.display_options().unwrap();
        assert_eq!(options.offset.local_minus_utc(), -360 * 60);
        assert_eq!(options.currency, "MXN");
    }
}
