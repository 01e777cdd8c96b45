//! Payment entry - the input side of the ledger.
//!
//! A [`PaymentEntry`] holds what a user has typed or picked so far: the
//! payment type, the currency, and the raw amount text. It resolves the
//! currency and exchange rate for the chosen type, previews the settlement
//! equivalent, and validates everything before handing a payment to the
//! [`InvoiceLedger`].
//!
//! ```
//! use invoice_ledger::{InvoiceLedger, PaymentEntry, PaymentTypeCatalog, RateTable};
//! use rust_decimal::Decimal;
//!
//! let catalog = PaymentTypeCatalog::embedded();
//! let rates = RateTable::default();
//! let mut ledger = InvoiceLedger::new(Decimal::from(1000), "AED");
//!
//! let mut entry = PaymentEntry::new(&catalog, &rates);
//! entry.select_type("FCE").unwrap();
//! entry.set_amount_text("50");
//! assert_eq!(entry.currency(), "EUR");
//! assert_eq!(entry.equivalent_amount(), Decimal::from(200));
//!
//! entry.submit(&mut ledger).unwrap();
//! assert_eq!(ledger.total_paid(), Decimal::from(200));
//! ```

use crate::catalog::{PaymentType, PaymentTypeCatalog};
use crate::currency::{currency_for_payment_type, RateTable, LOCAL_CURRENCY};
use crate::error::{Error, Result};
use crate::ledger::InvoiceLedger;
use crate::money::{parse_amount, parse_amount_or_zero, Amount};
use crate::payment::PaymentId;
use rust_decimal::Decimal;

/// In-progress payment form bound to a catalog and a rate table.
#[derive(Clone, Debug)]
pub struct PaymentEntry<'a> {
    catalog: &'a PaymentTypeCatalog,
    rates: &'a RateTable,
    selected: Option<String>,
    currency: String,
    amount_text: String,
}

impl<'a> PaymentEntry<'a> {
    pub fn new(catalog: &'a PaymentTypeCatalog, rates: &'a RateTable) -> Self {
        PaymentEntry {
            catalog,
            rates,
            selected: None,
            currency: LOCAL_CURRENCY.to_string(),
            amount_text: String::new(),
        }
    }

    /// Select a payment type by catalog key and switch to its currency.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownPaymentType` if `key` is not in the catalog; the
    /// previous selection is kept.
    pub fn select_type(&mut self, key: &str) -> Result<&'a PaymentType> {
        let catalog: &'a PaymentTypeCatalog = self.catalog;
        let payment_type = catalog
            .get(key)
            .ok_or_else(|| Error::UnknownPaymentType(key.to_string()))?;

        self.selected = Some(key.to_string());
        self.currency = currency_for_payment_type(payment_type).to_string();
        debug!("Selected {} ({})", key, self.currency);
        Ok(payment_type)
    }

    /// Override the entry currency.
    pub fn select_currency(&mut self, currency: impl Into<String>) {
        self.currency = currency.into();
    }

    pub fn set_amount_text(&mut self, text: impl Into<String>) {
        self.amount_text = text.into();
    }

    pub fn selected_type(&self) -> Option<&'a PaymentType> {
        let catalog: &'a PaymentTypeCatalog = self.catalog;
        self.selected.as_deref().and_then(|key| catalog.get(key))
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn amount_text(&self) -> &str {
        &self.amount_text
    }

    /// Rate from the entry currency into the settlement currency.
    pub fn exchange_rate(&self) -> Amount {
        self.rates.rate(&self.currency)
    }

    /// Settlement-currency value of the typed amount; zero when the text is
    /// not a positive number.
    pub fn equivalent_amount(&self) -> Amount {
        let amount = parse_amount_or_zero(&self.amount_text);
        if amount <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        amount
            .checked_mul(self.exchange_rate())
            .unwrap_or(Decimal::ZERO)
    }

    /// Validate the entry and record it on `ledger`.
    ///
    /// The typed amount is stored as the foreign amount together with the
    /// rate used, even for the local currency. The amount text is cleared on
    /// success and left untouched on failure.
    ///
    /// # Errors
    ///
    /// - `Error::Rejected`: no type selected, or the amount is unparsable, not
    ///   positive, or too large to convert
    /// - `Error::UnknownPaymentType`: the selected type is no longer in the catalog
    pub fn submit(&mut self, ledger: &mut InvoiceLedger) -> Result<PaymentId> {
        let key = self
            .selected
            .as_deref()
            .ok_or_else(|| Error::Rejected("no payment type selected".to_string()))?;

        let payment_type = self
            .catalog
            .get(key)
            .ok_or_else(|| Error::UnknownPaymentType(key.to_string()))?;

        let foreign_amount = match parse_amount(&self.amount_text) {
            Some(amount) if amount > Decimal::ZERO => amount,
            Some(amount) => {
                return Err(Error::Rejected(format!("amount {} is not positive", amount)))
            }
            None => {
                warn!("Unparsable amount text {:?}", self.amount_text);
                return Err(Error::Rejected(format!(
                    "amount {:?} is not a number",
                    self.amount_text
                )));
            }
        };

        let rate = self.exchange_rate();
        let amount = foreign_amount.checked_mul(rate).ok_or_else(|| {
            Error::Rejected(format!("amount {} at rate {} overflows", foreign_amount, rate))
        })?;
        let id = ledger.add_payment(
            payment_type,
            amount,
            Some(foreign_amount),
            Some(rate),
        )?;

        self.amount_text.clear();
        Ok(id)
    }
}
