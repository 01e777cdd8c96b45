//! Hooks for observing ledger mutations.
//!
//! Implement [`LedgerMetrics`] to forward payment events to your monitoring
//! system:
//!
//! ```
//! use invoice_ledger::observability::LedgerMetrics;
//! use invoice_ledger::payment::Payment;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! #[derive(Default)]
//! struct CountingMetrics {
//!     added: AtomicUsize,
//! }
//!
//! impl LedgerMetrics for CountingMetrics {
//!     fn record_added(&self, _payment: &Payment) {
//!         self.added.fetch_add(1, Ordering::Relaxed);
//!     }
//! }
//! ```
//!
//! Methods left unimplemented fall back to logging through the `log` crate.
//! The ledger itself defaults to [`NoOpMetrics`].

use crate::payment::Payment;

/// Trait for ledger metrics collection.
pub trait LedgerMetrics: Send + Sync {
    /// A payment was appended.
    fn record_added(&self, payment: &Payment) {
        debug!(
            "Payment ADDED: {} {} ({})",
            payment.id,
            payment.amount,
            payment.payment_type.key()
        );
    }

    /// A payment was refused and the ledger left unchanged.
    fn record_rejected(&self, reason: &str) {
        warn!("Payment REJECTED: {}", reason);
    }

    /// A payment was removed.
    fn record_removed(&self, payment: &Payment) {
        debug!("Payment REMOVED: {} {}", payment.id, payment.amount);
    }
}

/// Default metrics implementation (no-op).
#[derive(Clone, Debug, Default)]
pub struct NoOpMetrics;

impl LedgerMetrics for NoOpMetrics {
    fn record_added(&self, _payment: &Payment) {}
    fn record_rejected(&self, _reason: &str) {}
    fn record_removed(&self, _payment: &Payment) {}
}

/// Metrics that only log, using the trait's default methods.
#[derive(Clone, Debug, Default)]
pub struct LogMetrics;

impl LedgerMetrics for LogMetrics {}
