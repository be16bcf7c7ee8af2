//! # Library Configuration
//!
//! Tunable fee rates and lending behavior.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     LIBRARY_DAILY_RATE_CENTS=50                                        │
//! │     LIBRARY_RESTOCK_ON_RETURN=true                                     │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/library-lending/library.toml (Linux)                     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     50¢/day, bestseller ×1.50, premium ×0.80, no restock               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # library.toml
//! [fees]
//! daily_rate_cents = 50
//! bestseller_multiplier_bps = 15000
//! premium_multiplier_bps = 8000
//!
//! [lending]
//! restock_on_return = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::fees::{
    DEFAULT_BESTSELLER_MULTIPLIER_BPS, DEFAULT_DAILY_RATE_CENTS, DEFAULT_PREMIUM_MULTIPLIER_BPS,
};

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "library.toml";

// =============================================================================
// Fee Settings
// =============================================================================

/// Late-fee rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSettings {
    /// Charge per overdue day in cents.
    #[serde(default = "default_daily_rate")]
    pub daily_rate_cents: u32,

    /// Multiplier for bestsellers in basis points (15000 = ×1.50).
    #[serde(default = "default_bestseller_multiplier")]
    pub bestseller_multiplier_bps: u32,

    /// Multiplier for premium members in basis points (8000 = ×0.80).
    #[serde(default = "default_premium_multiplier")]
    pub premium_multiplier_bps: u32,
}

fn default_daily_rate() -> u32 {
    DEFAULT_DAILY_RATE_CENTS
}

fn default_bestseller_multiplier() -> u32 {
    DEFAULT_BESTSELLER_MULTIPLIER_BPS
}

fn default_premium_multiplier() -> u32 {
    DEFAULT_PREMIUM_MULTIPLIER_BPS
}

impl Default for FeeSettings {
    fn default() -> Self {
        FeeSettings {
            daily_rate_cents: default_daily_rate(),
            bestseller_multiplier_bps: default_bestseller_multiplier(),
            premium_multiplier_bps: default_premium_multiplier(),
        }
    }
}

// =============================================================================
// Lending Settings
// =============================================================================

/// Borrow/return behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LendingSettings {
    /// Put a returned copy back into the available count.
    ///
    /// Off by default: a return acknowledges the loan but the copy is not
    /// re-offered until `add_book` supplies one.
    #[serde(default)]
    pub restock_on_return: bool,
}

// =============================================================================
// Library Config
// =============================================================================

/// Complete configuration for a [`LibraryManager`](crate::LibraryManager).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryConfig {
    #[serde(default)]
    pub fees: FeeSettings,

    #[serde(default)]
    pub lending: LendingSettings,
}

impl LibraryConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (library.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading library config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml_str(&contents)?;
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
            warn!("Failed to load library config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.fees.bestseller_multiplier_bps == 0 {
            return Err(ConfigError::Invalid(
                "bestseller_multiplier_bps must be greater than 0".into(),
            ));
        }

        if self.fees.premium_multiplier_bps == 0 {
            return Err(ConfigError::Invalid(
                "premium_multiplier_bps must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Some(cents) = env_parse::<u32>("LIBRARY_DAILY_RATE_CENTS") {
            debug!(cents, "Overriding daily late fee from environment");
            self.fees.daily_rate_cents = cents;
        }

        if let Some(bps) = env_parse::<u32>("LIBRARY_BESTSELLER_MULTIPLIER_BPS") {
            debug!(bps, "Overriding bestseller multiplier from environment");
            self.fees.bestseller_multiplier_bps = bps;
        }

        if let Some(bps) = env_parse::<u32>("LIBRARY_PREMIUM_MULTIPLIER_BPS") {
            debug!(bps, "Overriding premium multiplier from environment");
            self.fees.premium_multiplier_bps = bps;
        }

        if let Some(restock) = env_parse::<bool>("LIBRARY_RESTOCK_ON_RETURN") {
            debug!(restock, "Overriding restock_on_return from environment");
            self.lending.restock_on_return = restock;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "library", "lending")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

/// Reads and parses an environment variable, ignoring unparsable values.
fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparsable environment override");
            None
        }
    }
}
