//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `LEDGER_DATA_DIR` - Directory holding the JSON data files (default: ./ledger-data)
//! - `LEDGER_GAS_RATE_PER_MINUTE` - Gas cost per burner minute (default: 1.50)
//! - `LEDGER_YIELD_RATIO` - Finished kg per kg of flour, must be > 0 (default: 1.4)
//! - `RUST_LOG` - Log filter (default: info)
//! - `LEDGER_LOG_JSON` - Emit logs as JSON lines when set

use std::path::PathBuf;

use rust_decimal::Decimal;
use snack_ledger_core::ProductionProfile;
use thiserror::Error;

const DEFAULT_DATA_DIR: &str = "./ledger-data";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Directory holding the JSON data files
    pub data_dir: PathBuf,
    /// Production constants used for batch and margin estimates
    pub profile: ProductionProfile,
}

impl LedgerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("LEDGER_DATA_DIR", DEFAULT_DATA_DIR));

        let mut profile = ProductionProfile::default();
        if let Some(rate) = get_optional_decimal("LEDGER_GAS_RATE_PER_MINUTE")? {
            if rate < Decimal::ZERO {
                return Err(ConfigError::InvalidEnvVar(
                    "LEDGER_GAS_RATE_PER_MINUTE".to_string(),
                    "must not be negative".to_string(),
                ));
            }
            profile.gas_rate_per_minute = rate;
        }
        if let Some(ratio) = get_optional_decimal("LEDGER_YIELD_RATIO")? {
            validate_yield_ratio(ratio)?;
            profile.yield_ratio = ratio;
        }

        Ok(Self { data_dir, profile })
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an optional decimal environment variable.
fn get_optional_decimal(key: &str) -> Result<Option<Decimal>, ConfigError> {
    get_optional_env(key)
        .map(|raw| parse_decimal(key, &raw))
        .transpose()
}

fn parse_decimal(key: &str, raw: &str) -> Result<Decimal, ConfigError> {
    raw.trim()
        .parse::<Decimal>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

fn validate_yield_ratio(ratio: Decimal) -> Result<(), ConfigError> {
    if ratio <= Decimal::ZERO {
        return Err(ConfigError::InvalidEnvVar(
            "LEDGER_YIELD_RATIO".to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
