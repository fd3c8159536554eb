//! # Checkout Configuration
//!
//! Loaded once at startup from environment variables, with defaults for
//! everything.
//!
//! | Variable                 | Default                              |
//! |--------------------------|--------------------------------------|
//! | `GROCER_CATALOG`         | `<data dir>/grocer/catalog.db`       |
//! | `GROCER_STORE_NAME`      | `Grocer Dev Store`                   |
//! | `GROCER_CURRENCY_SYMBOL` | `€`                                  |
//! | `GROCER_RECEIPT_WIDTH`   | `42` (32..=80)                       |
//!
//! The currency symbol is display only; all prices are in one implicit unit.

use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;
use grocer_catalog::CatalogConfig;
use grocer_core::Money;

/// Receipt widths a printer can realistically handle.
pub const RECEIPT_WIDTH_RANGE: std::ops::RangeInclusive<usize> = 32..=80;

/// Checkout configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Catalog database file.
    pub catalog_path: PathBuf,

    /// Store name (receipt header).
    pub store_name: String,

    /// Currency symbol (for display).
    pub currency_symbol: String,

    /// Receipt width in characters.
    pub receipt_width: usize,
}

impl CheckoutConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Loads configuration from any key/value source.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let catalog_path = match var("GROCER_CATALOG") {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_catalog_path()?,
        };

        let receipt_width = match var("GROCER_RECEIPT_WIDTH") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|width| RECEIPT_WIDTH_RANGE.contains(width))
                .ok_or_else(|| ConfigError::InvalidValue("GROCER_RECEIPT_WIDTH".to_string()))?,
            None => 42,
        };

        Ok(CheckoutConfig {
            catalog_path,
            store_name: var("GROCER_STORE_NAME").unwrap_or_else(|| "Grocer Dev Store".to_string()),
            currency_symbol: var("GROCER_CURRENCY_SYMBOL").unwrap_or_else(|| "€".to_string()),
            receipt_width,
        })
    }

    /// Pool settings for the catalog database. A missing file is an error,
    /// not a fresh empty catalog.
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig::new(&self.catalog_path)
            .max_connections(2)
            .create_if_missing(false)
    }

    /// Formats an amount, rounded to cents, with the currency symbol.
    ///
    /// ## Example
    /// ```rust,ignore
    /// assert_eq!(config.format_money(Money::from_cents(1234)), "€12.34");
    /// assert_eq!(config.format_money(Money::from_cents(-50)), "-€0.50");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        let rounded = amount.round_to_cents();
        if rounded.is_negative() {
            format!("-{}{}", self.currency_symbol, Money::zero() - rounded)
        } else {
            format!("{}{}", self.currency_symbol, rounded)
        }
    }
}

/// Platform data directory location of the catalog.
///
/// - **Linux**: `~/.local/share/grocer/catalog.db`
/// - **macOS**: `~/Library/Application Support/com.grocer.grocer/catalog.db`
/// - **Windows**: `%APPDATA%\grocer\grocer\data\catalog.db`
fn default_catalog_path() -> Result<PathBuf, ConfigError> {
    let dirs = ProjectDirs::from("com", "grocer", "grocer")
        .ok_or_else(|| ConfigError::MissingRequired("GROCER_CATALOG".to_string()))?;
    Ok(dirs.data_dir().join("catalog.db"))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
