//! Payment-type catalog: the static reference data that payments are booked against.
//!
//! The catalog is a JSON array of records shaped like:
//!
//! ```text
//! { "cd": "FCE", "name": "FC (Euro)", "locationCd": "149",
//!   "accountCode": "EU149", "glCode": "660", "txnCode": "JO" }
//! ```
//!
//! Every field is optional in the source data. Only records whose `txnCode`
//! matches the ledger's transaction class survive loading; the default class
//! is [`JOB_ORDER_TXN_CODE`].
//!
//! # Loading
//!
//! | Loader | On malformed data |
//! |--------|-------------------|
//! | [`PaymentTypeCatalog::from_json`] / [`from_reader`](PaymentTypeCatalog::from_reader) / [`from_path`](PaymentTypeCatalog::from_path) | `Err(Error::CatalogError)` |
//! | [`PaymentTypeCatalog::load`] | empty catalog, logged at `warn` |
//! | [`PaymentTypeCatalog::embedded`] | never fails in practice (data ships with the crate) |

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Transaction code of the job-order class.
pub const JOB_ORDER_TXN_CODE: &str = "JO";

/// Catalog shipped with the crate.
const EMBEDDED_CATALOG: &str = include_str!("../data/payment_types.json");

/// A payment type record from the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentType {
    pub cd: Option<String>,
    pub name: Option<String>,
    pub location_cd: Option<String>,
    pub account_code: Option<String>,
    pub gl_code: Option<String>,
    pub txn_code: Option<String>,

    /// Identity within the catalog: the code, or a generated id when the code is absent.
    /// Absent from catalog data; catalog loaders assign it.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    key: String,
}

impl PaymentType {
    /// Create a payment type with a code and display name.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        let code = code.into();
        PaymentType {
            key: code.clone(),
            cd: Some(code),
            name: Some(name.into()),
            location_cd: None,
            account_code: None,
            gl_code: None,
            txn_code: None,
        }
    }

    /// Unique identity of this entry.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Display name, empty when the record has none.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    fn assign_key(&mut self, position: usize) {
        self.key = match &self.cd {
            Some(cd) if !cd.is_empty() => cd.clone(),
            _ => format!("generated-{}", position),
        };
    }
}

/// Payment types usable for one transaction class, in catalog order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PaymentTypeCatalog {
    transaction_code: String,
    entries: Vec<PaymentType>,
}

impl PaymentTypeCatalog {
    /// Decode a JSON catalog and keep the entries tagged with `txn_code`.
    ///
    /// # Errors
    ///
    /// Returns `Error::CatalogError` if the document is not a JSON array of
    /// payment-type records.
    pub fn from_json(json: &str, txn_code: &str) -> Result<Self> {
        let records: Vec<PaymentType> = serde_json::from_str(json)?;
        Ok(Self::from_records(records, txn_code))
    }

    /// Decode a JSON catalog from any reader.
    ///
    /// # Errors
    ///
    /// Returns `Error::CatalogError` on malformed data and `Error::Io` if the
    /// reader fails.
    pub fn from_reader<R: Read>(reader: R, txn_code: &str) -> Result<Self> {
        let records: Vec<PaymentType> = serde_json::from_reader(reader)?;
        Ok(Self::from_records(records, txn_code))
    }

    /// Decode a JSON catalog file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be opened, `Error::CatalogError`
    /// on malformed data.
    pub fn from_path(path: impl AsRef<Path>, txn_code: &str) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let catalog = Self::from_reader(BufReader::new(file), txn_code)?;
        info!(
            "Loaded {} payment types for {} from {}",
            catalog.len(),
            txn_code,
            path.display()
        );
        Ok(catalog)
    }

    /// Lenient loader: malformed data yields an empty catalog.
    ///
    /// With an empty catalog no payment type can be selected, so every
    /// submission through [`crate::entry::PaymentEntry`] is rejected.
    pub fn load(json: &str, txn_code: &str) -> Self {
        match Self::from_json(json, txn_code) {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!("Payment type catalog unusable, continuing empty: {}", e);
                PaymentTypeCatalog {
                    transaction_code: txn_code.to_string(),
                    entries: Vec::new(),
                }
            }
        }
    }

    /// The catalog shipped with the crate, filtered to job orders.
    pub fn embedded() -> Self {
        Self::embedded_for(JOB_ORDER_TXN_CODE)
    }

    /// The catalog shipped with the crate, filtered to `txn_code`.
    pub fn embedded_for(txn_code: &str) -> Self {
        Self::load(EMBEDDED_CATALOG, txn_code)
    }

    fn from_records(records: Vec<PaymentType>, txn_code: &str) -> Self {
        let mut entries: Vec<PaymentType> = records
            .into_iter()
            .filter(|record| record.txn_code.as_deref() == Some(txn_code))
            .collect();

        for (position, entry) in entries.iter_mut().enumerate() {
            entry.assign_key(position);
        }

        debug!("Catalog filtered to {} entries for {}", entries.len(), txn_code);

        PaymentTypeCatalog {
            transaction_code: txn_code.to_string(),
            entries,
        }
    }

    /// Transaction class this catalog was filtered to.
    pub fn transaction_code(&self) -> &str {
        &self.transaction_code
    }

    /// Look up an entry by its key.
    pub fn get(&self, key: &str) -> Option<&PaymentType> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// Look up an entry by display name.
    pub fn find_by_name(&self, name: &str) -> Option<&PaymentType> {
        self.entries
            .iter()
            .find(|entry| entry.name.as_deref() == Some(name))
    }

    /// Whether `payment_type` is one of the loaded entries.
    pub fn contains(&self, payment_type: &PaymentType) -> bool {
        self.entries.iter().any(|entry| entry == payment_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PaymentType> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
