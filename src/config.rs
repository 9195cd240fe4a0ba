//! Storefront configuration

use std::{
    fs,
    path::{Path, PathBuf},
};

use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    catalog::resolver::PageRequest,
    pricing::{PriceError, currency_from_code},
};

/// Errors loading storefront configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse config: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unsupported currency
    #[error(transparent)]
    Currency(#[from] PriceError),

    /// Page size of zero
    #[error("page_size must be at least 1")]
    ZeroPageSize,
}

/// Storefront settings. Every field has a default, so an empty file is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// ISO currency code prices are quoted in
    pub currency: String,

    /// Products per section page
    pub page_size: usize,

    /// Directory the cart, catalog and order snapshots are written to
    pub storage_dir: PathBuf,

    /// Days between placing an order and its estimated delivery
    pub estimated_delivery_days: u32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            currency: "INR".to_string(),
            page_size: 12,
            storage_dir: PathBuf::from("./.atelier"),
            estimated_delivery_days: 5,
        }
    }
}

impl StorefrontConfig {
    /// Load and validate a YAML config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, names an unsupported
    /// currency, or sets a zero page size.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Parse and validate YAML config.
    ///
    /// # Errors
    ///
    /// See [`StorefrontConfig::from_path`].
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_norway::from_str(yaml)?;

        config.validate()?;

        Ok(config)
    }

    /// Check the settings are usable.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Currency`]: the currency is not supported.
    /// - [`ConfigError::ZeroPageSize`]: `page_size` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.currency()?;

        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }

        Ok(())
    }

    /// The configured currency.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::UnknownCurrency`] for unsupported codes.
    pub fn currency(&self) -> Result<&'static Currency, PriceError> {
        currency_from_code(&self.currency)
    }

    /// A request for `page` at the configured page size.
    pub fn page(&self, page: usize) -> PageRequest {
        PageRequest::new(page, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, INR};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn empty_config_uses_defaults() -> TestResult {
        let config = StorefrontConfig::from_yaml("{}")?;

        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.currency()?, INR);
        assert_eq!(config.page(1), PageRequest::new(1, 12));

        Ok(())
    }

    #[test]
    fn partial_config_overrides_only_what_it_sets() -> TestResult {
        let config = StorefrontConfig::from_yaml("currency: gbp\npage_size: 24\n")?;

        assert_eq!(config.currency()?, GBP);
        assert_eq!(config.page_size, 24);
        assert_eq!(config.estimated_delivery_days, 5);

        Ok(())
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let result = StorefrontConfig::from_yaml("page_size: 0");

        assert!(matches!(result, Err(ConfigError::ZeroPageSize)));
    }

    #[test]
    fn unknown_currency_is_rejected() {
        let result = StorefrontConfig::from_yaml("currency: XYZ");

        assert!(matches!(
            result,
            Err(ConfigError::Currency(PriceError::UnknownCurrency(_)))
        ));
    }

    #[test]
    fn config_loads_from_disk() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("atelier.yml");

        fs::write(&path, "storage_dir: /tmp/shop\nestimated_delivery_days: 7\n")?;

        let config = StorefrontConfig::from_path(&path)?;

        assert_eq!(config.storage_dir, PathBuf::from("/tmp/shop"));
        assert_eq!(config.estimated_delivery_days, 7);

        Ok(())
    }
}
