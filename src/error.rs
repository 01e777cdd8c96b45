//! Error types for the invoice ledger.

use std::fmt;

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the invoice ledger.
///
/// None of these are fatal. A rejected payment leaves the ledger exactly as
/// it was, so callers that only want the "ignore invalid input" behaviour can
/// discard the error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input was refused before touching the payment list.
    ///
    /// Raised when:
    /// - The settlement amount (after any currency conversion) is not strictly positive
    /// - The amount text could not be parsed
    /// - No payment type was selected
    Rejected(String),

    /// The selected payment type code is not part of the loaded catalog.
    UnknownPaymentType(String),

    /// The payment-type catalog could not be decoded.
    ///
    /// Only returned by the strict loaders. `PaymentTypeCatalog::load` degrades
    /// to an empty catalog instead.
    CatalogError(String),

    /// Configuration is malformed or fails validation.
    ///
    /// Common causes:
    /// - Negative exchange rate or VAT percentage
    /// - Empty settlement currency
    /// - Unreadable configuration file
    ConfigError(String),

    /// Reading a configuration or catalog file failed.
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Rejected(msg) => write!(f, "Payment rejected: {}", msg),
            Error::UnknownPaymentType(code) => write!(f, "Unknown payment type: {}", code),
            Error::CatalogError(msg) => write!(f, "Catalog error: {}", msg),
            Error::ConfigError(msg) => write!(f, "Config error: {}", msg),
            Error::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ============================================================================
// Conversions from other error types
// ============================================================================

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            Error::Io(e.to_string())
        } else {
            Error::CatalogError(e.to_string())
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}
