//! Invoice ledger - the billed amount, its adjustments and the payments recorded against it.
//!
//! # Formulas
//!
//! ```text
//! total_discount           = discount (0 if unset) + additional_discount
//! net_amount               = max(gross_amount - total_discount, 0)
//! vat_amount               = net_amount * pct / 100      (VatPolicy::Percentage)
//!                          = fixed value                  (VatPolicy::Fixed)
//! net_amount_including_vat = net_amount + vat_amount
//! total_paid               = sum of payment amounts
//! remaining_amount         = net_amount_including_vat - total_paid   (< 0 means overpaid)
//! ```
//!
//! Every derived value is recomputed on each call; nothing is cached.
//!
//! # Example
//!
//! ```
//! use invoice_ledger::{InvoiceLedger, PaymentTypeCatalog, VatPolicy};
//! use rust_decimal::Decimal;
//!
//! let catalog = PaymentTypeCatalog::embedded();
//! let mut ledger = InvoiceLedger::new(Decimal::from(1000), "AED")
//!     .with_vat(VatPolicy::Percentage(Decimal::from(5)));
//!
//! let cash = catalog.get("CASH").unwrap();
//! ledger.add_payment(cash, Decimal::from(100), None, None).unwrap();
//!
//! assert_eq!(ledger.net_amount_including_vat(), Decimal::from(1050));
//! assert_eq!(ledger.remaining_amount(), Decimal::from(950));
//! ```

use crate::catalog::PaymentType;
use crate::config::LedgerConfig;
use crate::error::{Error, Result};
use crate::money::Amount;
use crate::observability::{LedgerMetrics, NoOpMetrics};
use crate::payment::{Payment, PaymentId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// How VAT is derived for an invoice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VatPolicy {
    /// VAT is this percentage of the net amount.
    Percentage(Amount),

    /// VAT is a precomputed value supplied by the caller.
    Fixed(Amount),
}

impl VatPolicy {
    /// VAT owed on `net_amount` under this policy.
    pub fn vat_on(&self, net_amount: Amount) -> Amount {
        match self {
            VatPolicy::Percentage(pct) => net_amount.saturating_mul(*pct) / Decimal::ONE_HUNDRED,
            VatPolicy::Fixed(value) => *value,
        }
    }
}

impl Default for VatPolicy {
    /// 5 % of net.
    fn default() -> Self {
        VatPolicy::Percentage(Decimal::new(5, 0))
    }
}

impl fmt::Display for VatPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VatPolicy::Percentage(pct) => write!(f, "VAT ({}%)", pct),
            VatPolicy::Fixed(value) => write!(f, "VAT (fixed {})", value),
        }
    }
}

/// Where an invoice stands relative to what has been paid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    /// Something is still owed.
    Outstanding,
    /// Paid exactly.
    Settled,
    /// More was paid than owed.
    Overpaid,
}

/// Snapshot of a ledger's configuration and derived totals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub currency_code: String,
    pub exchange_rate: Amount,
    pub gross_amount: Amount,
    pub total_discount: Amount,
    pub net_amount: Amount,
    pub vat: VatPolicy,
    pub vat_amount: Amount,
    pub net_amount_including_vat: Amount,
    pub total_paid: Amount,
    pub remaining_amount: Amount,
    pub status: SettlementStatus,
    pub payment_count: usize,
}

/// Billed amount, discount terms, VAT and the ordered payments against one invoice.
///
/// Payments keep insertion order. The ledger exclusively owns them; they are
/// created only by [`add_payment`](Self::add_payment) and destroyed only by
/// [`remove_payment`](Self::remove_payment).
#[derive(Clone)]
pub struct InvoiceLedger {
    gross_amount: Amount,
    discount: Option<Amount>,
    additional_discount: Amount,
    vat: VatPolicy,
    currency_code: String,
    exchange_rate: Amount,
    payments: Vec<Payment>,
    metrics: Arc<dyn LedgerMetrics>,
}

impl InvoiceLedger {
    /// Create a ledger for `gross_amount` settled in `currency_code`.
    ///
    /// Starts with no discounts, the default VAT policy and a reference
    /// exchange rate of 1.
    pub fn new(gross_amount: Amount, currency_code: impl Into<String>) -> Self {
        InvoiceLedger {
            gross_amount,
            discount: None,
            additional_discount: Decimal::ZERO,
            vat: VatPolicy::default(),
            currency_code: currency_code.into(),
            exchange_rate: Decimal::ONE,
            payments: Vec::new(),
            metrics: Arc::new(NoOpMetrics),
        }
    }

    /// Create a ledger using the currency, rate and VAT policy of `config`.
    pub fn from_config(gross_amount: Amount, config: &LedgerConfig) -> Self {
        InvoiceLedger::new(gross_amount, config.settlement_currency.clone())
            .with_exchange_rate(config.exchange_rate)
            .with_vat(config.vat)
    }

    pub fn with_discount(mut self, discount: Amount) -> Self {
        self.discount = Some(discount);
        self
    }

    pub fn with_additional_discount(mut self, amount: Amount) -> Self {
        self.additional_discount = amount;
        self
    }

    pub fn with_vat(mut self, vat: VatPolicy) -> Self {
        self.vat = vat;
        self
    }

    pub fn with_exchange_rate(mut self, rate: Amount) -> Self {
        self.exchange_rate = rate;
        self
    }

    /// Set custom metrics handler.
    pub fn with_metrics(mut self, metrics: Arc<dyn LedgerMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn set_discount(&mut self, discount: Option<Amount>) {
        self.discount = discount;
    }

    pub fn set_additional_discount(&mut self, amount: Amount) {
        self.additional_discount = amount;
    }

    pub fn set_vat(&mut self, vat: VatPolicy) {
        self.vat = vat;
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    /// Record a payment.
    ///
    /// When both `foreign_amount` and `exchange_rate` are given, the settlement
    /// amount is `foreign_amount * exchange_rate` and `amount` is ignored.
    /// Overpayment is allowed; it shows up as a negative
    /// [`remaining_amount`](Self::remaining_amount).
    ///
    /// # Errors
    ///
    /// Returns `Error::Rejected` if the settlement amount is not strictly
    /// positive, if a foreign amount or rate is given and is not strictly
    /// positive, or if the amount would overflow the running total. The
    /// payment list is unchanged in that case, so callers that do not need
    /// feedback can ignore the result.
    pub fn add_payment(
        &mut self,
        payment_type: &PaymentType,
        amount: Amount,
        foreign_amount: Option<Amount>,
        exchange_rate: Option<Amount>,
    ) -> Result<PaymentId> {
        let payment = self.validate_payment(payment_type, amount, foreign_amount, exchange_rate)?;

        let id = payment.id;
        debug!(
            "Recording {} {} via {} (remaining before: {})",
            payment.amount,
            self.currency_code,
            payment_type.key(),
            self.remaining_amount()
        );
        self.metrics.record_added(&payment);
        self.payments.push(payment);
        Ok(id)
    }

    fn validate_payment(
        &self,
        payment_type: &PaymentType,
        amount: Amount,
        foreign_amount: Option<Amount>,
        exchange_rate: Option<Amount>,
    ) -> Result<Payment> {
        let checked = match (foreign_amount, exchange_rate) {
            (Some(foreign), Some(rate)) if foreign <= Decimal::ZERO || rate <= Decimal::ZERO => {
                Err(Error::Rejected(format!(
                    "foreign amount {} at rate {} for {} is not positive",
                    foreign,
                    rate,
                    payment_type.key()
                )))
            }
            _ => Payment::new(payment_type.clone(), amount, foreign_amount, exchange_rate),
        }
        .and_then(|payment| {
            if payment.amount <= Decimal::ZERO {
                Err(Error::Rejected(format!(
                    "settlement amount {} for {} is not positive",
                    payment.amount,
                    payment_type.key()
                )))
            } else if self.total_paid().checked_add(payment.amount).is_none() {
                Err(Error::Rejected(format!(
                    "settlement amount {} for {} overflows the total paid",
                    payment.amount,
                    payment_type.key()
                )))
            } else {
                Ok(payment)
            }
        });

        if let Err(Error::Rejected(reason)) = &checked {
            self.metrics.record_rejected(reason);
        }
        checked
    }

    /// Remove the payment with `id`.
    ///
    /// Returns the removed payment, or `None` (and changes nothing) if no
    /// payment has that id.
    pub fn remove_payment(&mut self, id: PaymentId) -> Option<Payment> {
        let index = self.payments.iter().position(|p| p.id == id)?;
        let payment = self.payments.remove(index);
        self.metrics.record_removed(&payment);
        Some(payment)
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn gross_amount(&self) -> Amount {
        self.gross_amount
    }

    pub fn discount(&self) -> Option<Amount> {
        self.discount
    }

    pub fn additional_discount(&self) -> Amount {
        self.additional_discount
    }

    pub fn vat(&self) -> VatPolicy {
        self.vat
    }

    pub fn currency_code(&self) -> &str {
        &self.currency_code
    }

    /// Reference exchange rate of the settlement currency.
    pub fn exchange_rate(&self) -> Amount {
        self.exchange_rate
    }

    /// Payments in insertion order.
    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn payment(&self, id: PaymentId) -> Option<&Payment> {
        self.payments.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.payments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }

    // ------------------------------------------------------------------------
    // Derived values
    // ------------------------------------------------------------------------

    pub fn total_discount(&self) -> Amount {
        self.discount
            .unwrap_or(Decimal::ZERO)
            .saturating_add(self.additional_discount)
    }

    /// Gross amount after discounts, never below zero.
    pub fn net_amount(&self) -> Amount {
        self.gross_amount
            .saturating_sub(self.total_discount())
            .max(Decimal::ZERO)
    }

    pub fn vat_amount(&self) -> Amount {
        self.vat.vat_on(self.net_amount())
    }

    pub fn net_amount_including_vat(&self) -> Amount {
        self.net_amount().saturating_add(self.vat_amount())
    }

    pub fn total_paid(&self) -> Amount {
        self.payments
            .iter()
            .fold(Decimal::ZERO, |total, p| total.saturating_add(p.amount))
    }

    /// Amount still owed. Negative when overpaid.
    pub fn remaining_amount(&self) -> Amount {
        self.net_amount_including_vat()
            .saturating_sub(self.total_paid())
    }

    pub fn settlement_status(&self) -> SettlementStatus {
        let remaining = self.remaining_amount();
        if remaining > Decimal::ZERO {
            SettlementStatus::Outstanding
        } else if remaining.is_zero() {
            SettlementStatus::Settled
        } else {
            SettlementStatus::Overpaid
        }
    }

    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary {
            currency_code: self.currency_code.clone(),
            exchange_rate: self.exchange_rate,
            gross_amount: self.gross_amount,
            total_discount: self.total_discount(),
            net_amount: self.net_amount(),
            vat: self.vat,
            vat_amount: self.vat_amount(),
            net_amount_including_vat: self.net_amount_including_vat(),
            total_paid: self.total_paid(),
            remaining_amount: self.remaining_amount(),
            status: self.settlement_status(),
            payment_count: self.payments.len(),
        }
    }
}

impl fmt::Debug for InvoiceLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvoiceLedger")
            .field("gross_amount", &self.gross_amount)
            .field("discount", &self.discount)
            .field("additional_discount", &self.additional_discount)
            .field("vat", &self.vat)
            .field("currency_code", &self.currency_code)
            .field("exchange_rate", &self.exchange_rate)
            .field("payments", &self.payments)
            .finish_non_exhaustive()
    }
}
