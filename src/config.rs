//! Ledger configuration.
//!
//! Everything that varies per deployment rather than per invoice: settlement
//! currency, reference exchange rate, the transaction class used to filter the
//! payment-type catalog, VAT policy, and the rate table used for
//! foreign-currency entry.
//!
//! # Example
//!
//! ```
//! use invoice_ledger::config::LedgerConfig;
//!
//! let config = LedgerConfig::from_json(r#"{
//!     "settlement_currency": "AED",
//!     "vat": { "percentage": "5" },
//!     "rates": { "AED": "1", "EUR": "4.0" }
//! }"#).unwrap();
//!
//! assert_eq!(config.transaction_code, "JO");
//! ```

use crate::catalog::{PaymentTypeCatalog, JOB_ORDER_TXN_CODE};
use crate::currency::{RateTable, LOCAL_CURRENCY};
use crate::error::{Error, Result};
use crate::ledger::VatPolicy;
use crate::money::Amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Deployment-level settings for ledgers and payment entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Currency totals are expressed in.
    pub settlement_currency: String,

    /// Reference exchange rate of the settlement currency.
    pub exchange_rate: Amount,

    /// Catalog entries with this `txnCode` are usable.
    pub transaction_code: String,

    pub vat: VatPolicy,

    /// Rates into the settlement currency for foreign-currency entry.
    pub rates: RateTable,

    /// External catalog file. `None` uses the catalog shipped with the crate.
    pub catalog_path: Option<PathBuf>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig {
            settlement_currency: LOCAL_CURRENCY.to_string(),
            exchange_rate: Decimal::ONE,
            transaction_code: JOB_ORDER_TXN_CODE.to_string(),
            vat: VatPolicy::default(),
            rates: RateTable::default(),
            catalog_path: None,
        }
    }
}

impl LedgerConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` on malformed JSON or failed validation.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LedgerConfig =
            serde_json::from_str(json).map_err(|e| Error::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read, `Error::ConfigError`
    /// otherwise.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        info!("Loaded ledger config from {}", path.display());
        Ok(config)
    }

    /// Check the settings are usable.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` when the settlement currency or transaction
    /// code is empty, or any rate or VAT value is negative.
    pub fn validate(&self) -> Result<()> {
        if self.settlement_currency.trim().is_empty() {
            return Err(Error::ConfigError(
                "settlement_currency must not be empty".to_string(),
            ));
        }

        if self.transaction_code.trim().is_empty() {
            return Err(Error::ConfigError(
                "transaction_code must not be empty".to_string(),
            ));
        }

        if self.exchange_rate.is_sign_negative() {
            return Err(Error::ConfigError(format!(
                "exchange_rate must not be negative, got {}",
                self.exchange_rate
            )));
        }

        let vat_value = match self.vat {
            VatPolicy::Percentage(v) | VatPolicy::Fixed(v) => v,
        };
        if vat_value.is_sign_negative() {
            return Err(Error::ConfigError(format!(
                "vat must not be negative, got {}",
                vat_value
            )));
        }

        if let Some((code, rate)) = self.rates.iter().find(|(_, rate)| rate.is_sign_negative()) {
            return Err(Error::ConfigError(format!(
                "rate for {} must not be negative, got {}",
                code, rate
            )));
        }

        Ok(())
    }

    /// Load the payment-type catalog this configuration points at.
    ///
    /// # Errors
    ///
    /// Returns the strict loader's error when `catalog_path` is set and the
    /// file is unreadable or malformed.
    pub fn load_catalog(&self) -> Result<PaymentTypeCatalog> {
        match &self.catalog_path {
            Some(path) => PaymentTypeCatalog::from_path(path, &self.transaction_code),
            None => Ok(PaymentTypeCatalog::embedded_for(&self.transaction_code)),
        }
    }
}
