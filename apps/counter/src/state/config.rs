//! # Configuration State
//!
//! Stores counter configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`OFFICINE_*`)
//! 2. Config file (TOML, path in `OFFICINE_CONFIG`)
//! 3. Defaults (this file)
//!
//! ## Example `officine.toml`
//! ```toml
//! storeName = "Pharmacie du Plateau"
//! cashierId = "caisse-2"
//! stockPolicy = "warn"
//! exportDir = "/var/lib/officine/exports"
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use officine_core::{Money, StockPolicy, POPULAR_LIMIT};

pub const ENV_CONFIG_PATH: &str = "OFFICINE_CONFIG";
pub const ENV_STORE_NAME: &str = "OFFICINE_STORE_NAME";
pub const ENV_CASHIER_ID: &str = "OFFICINE_CASHIER_ID";
pub const ENV_STOCK_POLICY: &str = "OFFICINE_STOCK_POLICY";
pub const ENV_POPULAR_LIMIT: &str = "OFFICINE_POPULAR_LIMIT";
pub const ENV_EXPORT_DIR: &str = "OFFICINE_EXPORT_DIR";

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Counter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigState {
    /// Store name (displayed on receipts)
    pub store_name: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency. FCFA has none.
    pub currency_decimals: u8,

    /// Recorded on every finalized sale
    pub cashier_id: String,

    /// What the cart does when a quantity exceeds shelf stock
    pub stock_policy: StockPolicy,

    /// Products shown in the popular view
    pub popular_limit: usize,

    /// Where inventory exports are written
    pub export_dir: PathBuf,
}

impl Default for ConfigState {
    /// Returns default configuration suitable for the demo counter.
    ///
    /// ## Default Values
    /// - Store: "Pharmacie Officine"
    /// - Currency: XOF (FCFA), no decimals
    /// - Stock policy: allow
    /// - Popular view: 8 products
    /// - Export directory: current directory
    fn default() -> Self {
        ConfigState {
            store_name: "Pharmacie Officine".to_string(),
            currency_code: "XOF".to_string(),
            currency_symbol: "FCFA".to_string(),
            currency_decimals: 0,
            cashier_id: "cashier1".to_string(),
            stock_policy: StockPolicy::Allow,
            popular_limit: POPULAR_LIMIT,
            export_dir: PathBuf::from("."),
        }
    }
}

impl ConfigState {
    /// Loads configuration from the optional TOML file and the environment.
    ///
    /// ## Environment Variables
    /// - `OFFICINE_CONFIG`: Path of a TOML config file
    /// - `OFFICINE_STORE_NAME`: Override store name
    /// - `OFFICINE_CASHIER_ID`: Override cashier id
    /// - `OFFICINE_STOCK_POLICY`: `allow`, `warn` or `reject`
    /// - `OFFICINE_POPULAR_LIMIT`: Size of the popular view
    /// - `OFFICINE_EXPORT_DIR`: Directory for inventory exports
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = match std::env::var(ENV_CONFIG_PATH) {
            Ok(path) => ConfigState::from_toml_file(path)?,
            Err(_) => ConfigState::default(),
        };

        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ConfigState = toml::from_str(content)?;
        if config.currency_divisor().is_none() {
            return Err(ConfigError::InvalidValue {
                key: "currencyDecimals".to_string(),
                value: config.currency_decimals.to_string(),
            });
        }
        Ok(config)
    }

    /// Reads and parses a TOML config file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ConfigState::from_toml_str(&content)
    }

    /// Applies `OFFICINE_*` overrides looked up through `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(store_name) = lookup(ENV_STORE_NAME) {
            self.store_name = store_name;
        }

        if let Some(cashier_id) = lookup(ENV_CASHIER_ID) {
            self.cashier_id = cashier_id;
        }

        if let Some(policy) = lookup(ENV_STOCK_POLICY) {
            self.stock_policy = policy.parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_STOCK_POLICY.to_string(),
                value: policy.clone(),
            })?;
        }

        if let Some(limit) = lookup(ENV_POPULAR_LIMIT) {
            self.popular_limit = limit.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_POPULAR_LIMIT.to_string(),
                value: limit.clone(),
            })?;
        }

        if let Some(dir) = lookup(ENV_EXPORT_DIR) {
            self.export_dir = PathBuf::from(dir);
        }

        Ok(self)
    }

    /// Formats an amount in the smallest currency unit.
    ///
    /// ## Example
    /// ```rust
    /// use officine_counter::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(7950), "7 950 FCFA");
    /// ```
    ///
    /// Decimals too large for an `i64` divisor are rendered as whole units.
    pub fn format_currency(&self, amount: i64) -> String {
        let (divisor, decimals) = match self.currency_divisor() {
            Some(divisor) => (divisor, usize::from(self.currency_decimals)),
            None => (1, 0),
        };
        let whole = Money::from_amount((amount / divisor).saturating_abs());
        let frac = (amount % divisor).abs();

        format!(
            "{}{}{} {}",
            if amount < 0 { "-" } else { "" },
            whole.grouped_digits(),
            if decimals > 0 {
                format!(",{:0width$}", frac, width = decimals)
            } else {
                String::new()
            },
            self.currency_symbol
        )
    }

    /// `10^currency_decimals`, `None` when it does not fit in an `i64`.
    fn currency_divisor(&self) -> Option<i64> {
        10_i64.checked_pow(u32::from(self.currency_decimals))
    }

    /// Formats a [`Money`] value.
    pub fn format_money(&self, money: Money) -> String {
        self.format_currency(money.amount())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(7950), "7 950 FCFA");
        assert_eq!(config.format_currency(850), "850 FCFA");
        assert_eq!(config.format_currency(0), "0 FCFA");
        assert_eq!(config.format_currency(1_234_567), "1 234 567 FCFA");
        assert_eq!(config.format_currency(-4450), "-4 450 FCFA");
    }

    #[test]
    fn test_format_currency_with_decimals() {
        let config = ConfigState {
            currency_code: "EUR".to_string(),
            currency_symbol: "€".to_string(),
            currency_decimals: 2,
            ..ConfigState::default()
        };
        assert_eq!(config.format_currency(123_456), "1 234,56 €");
        assert_eq!(config.format_currency(5), "0,05 €");
    }

    #[test]
    fn test_oversized_currency_decimals() {
        let err = ConfigState::from_toml_str("currencyDecimals = 19").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, ref value } if key == "currencyDecimals" && value == "19"
        ));
        assert!(ConfigState::from_toml_str("currencyDecimals = 18").is_ok());

        let config = ConfigState {
            currency_decimals: 40,
            ..ConfigState::default()
        };
        assert_eq!(config.format_currency(7950), "7 950 FCFA");
    }

    #[test]
    fn test_env_overrides() {
        let config = ConfigState::default()
            .with_overrides(env(&[
                (ENV_STORE_NAME, "Pharmacie du Plateau"),
                (ENV_STOCK_POLICY, "reject"),
                (ENV_POPULAR_LIMIT, "4"),
            ]))
            .unwrap();

        assert_eq!(config.store_name, "Pharmacie du Plateau");
        assert_eq!(config.stock_policy, StockPolicy::Reject);
        assert_eq!(config.popular_limit, 4);
        assert_eq!(config.cashier_id, "cashier1");
    }

    #[test]
    fn test_invalid_env_value() {
        let err = ConfigState::default()
            .with_overrides(env(&[(ENV_POPULAR_LIMIT, "many")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        let err = ConfigState::default()
            .with_overrides(env(&[(ENV_STOCK_POLICY, "strict")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_STOCK_POLICY));
    }

    #[test]
    fn test_toml_file_keeps_defaults_for_missing_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "storeName = \"Pharmacie Kaloum\"").unwrap();
        writeln!(file, "stockPolicy = \"warn\"").unwrap();

        let config = ConfigState::from_toml_file(file.path()).unwrap();
        assert_eq!(config.store_name, "Pharmacie Kaloum");
        assert_eq!(config.stock_policy, StockPolicy::Warn);
        assert_eq!(config.currency_symbol, "FCFA");
        assert_eq!(config.popular_limit, 8);
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            ConfigState::from_toml_str("popularLimit = \"eight\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            ConfigState::from_toml_file("/nonexistent/officine.toml"),
            Err(ConfigError::Read { .. })
        ));
    }
}
