//! Recorded payments.

use crate::catalog::PaymentType;
use crate::error::{Error, Result};
use crate::money::Amount;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identity of a recorded payment.
///
/// Two payments with the same type and amount are still distinct entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(Uuid);

impl PaymentId {
    pub(crate) fn generate() -> Self {
        PaymentId(Uuid::now_v7())
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single settlement recorded against an invoice.
///
/// `amount` is always in the ledger's settlement currency. The foreign
/// fields are kept for display only once the payment exists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub payment_type: PaymentType,
    pub amount: Amount,
    pub foreign_amount: Option<Amount>,
    pub exchange_rate: Option<Amount>,
}

impl Payment {
    /// Build a payment. When both `foreign_amount` and `exchange_rate` are
    /// present, the settlement amount is their product and `amount` is ignored.
    ///
    /// Fails with `Error::Rejected` if the product does not fit in an `Amount`.
    pub(crate) fn new(
        payment_type: PaymentType,
        amount: Amount,
        foreign_amount: Option<Amount>,
        exchange_rate: Option<Amount>,
    ) -> Result<Self> {
        let amount = match (foreign_amount, exchange_rate) {
            (Some(foreign), Some(rate)) => foreign.checked_mul(rate).ok_or_else(|| {
                Error::Rejected(format!("{} at rate {} overflows", foreign, rate))
            })?,
            _ => amount,
        };

        Ok(Payment {
            id: PaymentId::generate(),
            payment_type,
            amount,
            foreign_amount,
            exchange_rate,
        })
    }

    /// Whether this payment was entered in a foreign currency.
    pub fn is_foreign(&self) -> bool {
        self.foreign_amount.is_some() && self.exchange_rate.is_some()
    }
}
