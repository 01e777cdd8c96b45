//! Currency resolution for payment types and reference exchange rates.

use crate::catalog::PaymentType;
use crate::money::Amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Local currency; every payment type without a foreign mapping settles in it.
pub const LOCAL_CURRENCY: &str = "AED";

/// Currency a payment of the given type is entered in.
///
/// Foreign-currency payment types are recognised by display name. Everything
/// else, including a type with no name, resolves to [`LOCAL_CURRENCY`].
///
/// ```
/// use invoice_ledger::catalog::PaymentType;
/// use invoice_ledger::currency::currency_for_payment_type;
///
/// assert_eq!(currency_for_payment_type(&PaymentType::new("FCE", "FC (Euro)")), "EUR");
/// assert_eq!(currency_for_payment_type(&PaymentType::new("CASH", "CASH")), "AED");
/// ```
pub fn currency_for_payment_type(payment_type: &PaymentType) -> &'static str {
    match payment_type.name.as_deref() {
        Some("FC (Euro)") => "EUR",
        Some("FC (GB Pound)") => "GBP",
        Some("FC (US$)") => "USD",
        _ => LOCAL_CURRENCY,
    }
}

/// Exchange rates from a currency into the settlement currency.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable {
    rates: BTreeMap<String, Amount>,
}

impl RateTable {
    /// Empty table; every lookup falls back to 1.
    pub fn new() -> Self {
        RateTable {
            rates: BTreeMap::new(),
        }
    }

    /// Set the rate for a currency.
    pub fn with_rate(mut self, currency: impl Into<String>, rate: Amount) -> Self {
        self.rates.insert(currency.into(), rate);
        self
    }

    /// Rate for `currency`, or 1 when the currency is unknown.
    pub fn rate(&self, currency: &str) -> Amount {
        self.rates.get(currency).copied().unwrap_or(Decimal::ONE)
    }

    pub fn contains(&self, currency: &str) -> bool {
        self.rates.contains_key(currency)
    }

    /// Known currency codes, sorted.
    pub fn currencies(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, Amount)> {
        self.rates.iter().map(|(code, rate)| (code.as_str(), *rate))
    }
}

impl Default for RateTable {
    /// Rates into AED.
    fn default() -> Self {
        RateTable::new()
            .with_rate("USD", Decimal::new(366, 2))
            .with_rate("EUR", Decimal::new(4, 0))
            .with_rate("GBP", Decimal::new(45, 1))
            .with_rate(LOCAL_CURRENCY, Decimal::ONE)
    }
}
