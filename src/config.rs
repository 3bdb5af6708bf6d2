//! Cart limits
//!
//! The ceilings every cart mutation is checked against. The defaults are the production
//! values; a YAML file can override any subset of them.

use std::{fs, path::Path};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors loading or validating cart limits.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the limits file
    #[error("Failed to read limits file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A limit was zero or negative.
    #[error("Limit `{0}` must be greater than zero")]
    InvalidLimit(&'static str),
}

/// Capacity and pricing ceilings for a single cart.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CartLimits {
    /// Maximum total cart price, before promotions.
    pub max_cart_price: Decimal,

    /// Maximum number of distinct line items (VAS items excluded).
    pub max_unique_items: usize,

    /// Maximum total quantity across the cart.
    pub max_total_quantity: u32,

    /// Maximum VAS quantity for one `vasItemId` on a line item.
    pub max_vas_per_item: u32,

    /// Maximum quantity of a single line item or VAS item.
    pub max_item_quantity: u32,

    /// Maximum total quantity of digital items.
    pub max_digital_quantity: u32,
}

impl Default for CartLimits {
    fn default() -> Self {
        Self {
            max_cart_price: Decimal::from(500_000),
            max_unique_items: 10,
            max_total_quantity: 30,
            max_vas_per_item: 3,
            max_item_quantity: 10,
            max_digital_quantity: 5,
        }
    }
}

impl CartLimits {
    /// Parse limits from a YAML document. Missing keys keep their default value.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the document cannot be parsed or a limit is not positive.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let limits: Self = serde_norway::from_str(contents)?;

        limits.validate()?;

        Ok(limits)
    }

    /// Load limits from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed, or a limit is not positive.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Check every limit is positive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLimit`] naming the first offending limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_cart_price <= Decimal::ZERO {
            return Err(ConfigError::InvalidLimit("max_cart_price"));
        }

        if self.max_unique_items == 0 {
            return Err(ConfigError::InvalidLimit("max_unique_items"));
        }

        let counts = [
            ("max_total_quantity", self.max_total_quantity),
            ("max_vas_per_item", self.max_vas_per_item),
            ("max_item_quantity", self.max_item_quantity),
            ("max_digital_quantity", self.max_digital_quantity),
        ];

        match counts.into_iter().find(|(_, value)| *value == 0) {
            Some((name, _)) => Err(ConfigError::InvalidLimit(name)),
            None => Ok(()),
        }
    }
}
