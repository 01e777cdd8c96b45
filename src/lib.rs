//! # invoice-ledger
//!
//! Settlement model for job-order invoices: a billed amount, its discounts
//! and VAT, and the payments recorded against it in one settlement currency,
//! possibly entered in a foreign one.
//!
//! ## Features
//!
//! - **Exact money:** All amounts are `rust_decimal::Decimal`
//! - **Explicit VAT policy:** Percentage of net, or a fixed supplied value
//! - **Multi-currency entry:** Foreign amounts converted at a known rate and kept for display
//! - **External catalog:** Payment types loaded from JSON and filtered by transaction class
//! - **Reportable rejections:** Invalid payments leave the ledger untouched and say why
//!
//! ## Quick Start
//!
//! ```
//! use invoice_ledger::{InvoiceLedger, LedgerConfig, PaymentEntry, SettlementStatus};
//! use rust_decimal::Decimal;
//!
//! # fn main() -> invoice_ledger::Result<()> {
//! // 1. Configuration and reference data
//! let config = LedgerConfig::default();
//! let catalog = config.load_catalog()?;
//!
//! // 2. The invoice
//! let mut ledger = InvoiceLedger::from_config(Decimal::from(1000), &config)
//!     .with_discount(Decimal::from(100));
//!
//! // 3. Payments, entered the way a form would collect them
//! let mut entry = PaymentEntry::new(&catalog, &config.rates);
//! entry.select_type("FCE")?;          // FC (Euro) -> EUR at 4.0
//! entry.set_amount_text("50");
//! let id = entry.submit(&mut ledger)?;
//!
//! assert_eq!(ledger.total_paid(), Decimal::from(200));
//! assert_eq!(ledger.remaining_amount(), Decimal::from(745));
//! assert_eq!(ledger.settlement_status(), SettlementStatus::Outstanding);
//!
//! // 4. Removal by identity
//! ledger.remove_payment(id);
//! assert!(ledger.is_empty());
//! # Ok(())
//! # }
//! ```

#[macro_use]
extern crate log;

pub mod catalog;
pub mod config;
pub mod currency;
pub mod entry;
pub mod error;
pub mod ledger;
pub mod money;
pub mod observability;
pub mod payment;

// Re-exports for convenience
pub use catalog::{PaymentType, PaymentTypeCatalog};
pub use config::LedgerConfig;
pub use currency::{currency_for_payment_type, RateTable};
pub use entry::PaymentEntry;
pub use error::{Error, Result};
pub use ledger::{InvoiceLedger, LedgerSummary, SettlementStatus, VatPolicy};
pub use money::Amount;
pub use payment::{Payment, PaymentId};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
