//! Integration tests for invoice-ledger
//!
//! These tests drive the ledger the way a presentation layer would: load the
//! configuration and catalog, build an invoice, enter payments, read totals.

use invoice_ledger::{
    currency_for_payment_type, Error, InvoiceLedger, LedgerConfig, LedgerSummary, PaymentEntry,
    PaymentTypeCatalog, RateTable, SettlementStatus, VatPolicy,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::io::Write;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn invoice() -> InvoiceLedger {
    InvoiceLedger::new(dec!(1000), "AED").with_vat(VatPolicy::Percentage(dec!(5)))
}

/// Test 1: Totals of a fresh invoice
///
/// gross 1000, VAT 5 %, no discounts
#[test]
fn test_fresh_invoice_totals() {
    init_logging();
    let ledger = invoice();

    assert_eq!(ledger.net_amount(), dec!(1000));
    assert_eq!(ledger.vat_amount(), dec!(50));
    assert_eq!(ledger.net_amount_including_vat(), dec!(1050));
    assert_eq!(ledger.total_paid(), Decimal::ZERO);
    assert_eq!(ledger.remaining_amount(), dec!(1050));
}

/// Test 2: Local-currency cash payment
#[test]
fn test_cash_payment() {
    init_logging();
    let catalog = PaymentTypeCatalog::embedded();
    let mut ledger = invoice();

    let cash = catalog.get("CASH").expect("CASH is a job-order type");
    ledger
        .add_payment(cash, dec!(100), Some(dec!(100)), Some(dec!(1.0)))
        .expect("positive payment accepted");

    assert_eq!(ledger.total_paid(), dec!(100));
    assert_eq!(ledger.remaining_amount(), dec!(950));
}

/// Test 3: Euro payment is converted and resolves to EUR
#[test]
fn test_euro_payment() {
    init_logging();
    let catalog = PaymentTypeCatalog::embedded();
    let mut ledger = invoice();

    let euro = catalog.get("FCE").unwrap();
    assert_eq!(currency_for_payment_type(euro), "EUR");

    let id = ledger
        .add_payment(euro, Decimal::ZERO, Some(dec!(50)), Some(dec!(4.0)))
        .unwrap();

    let payment = ledger.payment(id).unwrap();
    assert_eq!(payment.amount, dec!(200));
    assert_eq!(payment.foreign_amount, Some(dec!(50)));
}

/// Test 4: Zero amount is rejected and nothing changes
#[test]
fn test_zero_amount_rejected() {
    init_logging();
    let catalog = PaymentTypeCatalog::embedded();
    let mut ledger = invoice();
    let cash = catalog.get("CASH").unwrap();
    ledger.add_payment(cash, dec!(10), None, None).unwrap();

    let before = ledger.summary();
    let result = ledger.add_payment(cash, Decimal::ZERO, None, None);

    assert!(matches!(result, Err(Error::Rejected(_))));
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.summary(), before);
}

/// Test 5: Discounts reduce the net amount
#[test]
fn test_discounts() {
    let ledger = invoice()
        .with_discount(dec!(100))
        .with_additional_discount(dec!(50));

    assert_eq!(ledger.net_amount(), dec!(850));
    assert_eq!(ledger.vat_amount(), dec!(42.5));
}

/// Test 6: Removing an unknown payment is a no-op
#[test]
fn test_remove_unknown_payment() {
    init_logging();
    let catalog = PaymentTypeCatalog::embedded();
    let mut ledger = invoice();
    let id = ledger
        .add_payment(catalog.get("CASH").unwrap(), dec!(10), None, None)
        .unwrap();

    let mut other = invoice();
    let foreign_id = other
        .add_payment(catalog.get("CASH").unwrap(), dec!(10), None, None)
        .unwrap();

    assert!(ledger.remove_payment(foreign_id).is_none());
    assert_eq!(ledger.len(), 1);
    assert!(ledger.payment(id).is_some());
}

/// Test 7: Duplicate payments are separate entries
#[test]
fn test_duplicate_payments_removed_individually() {
    let catalog = PaymentTypeCatalog::embedded();
    let card = catalog.get("CRE CARD").unwrap();
    let mut ledger = invoice();

    let first = ledger.add_payment(card, dec!(300), None, None).unwrap();
    let second = ledger.add_payment(card, dec!(300), None, None).unwrap();
    assert_ne!(first, second);

    ledger.remove_payment(first);
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.payments()[0].id, second);
    assert_eq!(ledger.total_paid(), dec!(300));
}

/// Test 8: Full form-driven settlement down to an overpayment
#[test]
fn test_form_driven_settlement() {
    init_logging();
    let config = LedgerConfig::default();
    let catalog = config.load_catalog().unwrap();
    let mut ledger = InvoiceLedger::from_config(dec!(1000), &config);
    let mut entry = PaymentEntry::new(&catalog, &config.rates);

    // 100 USD at 3.66
    entry.select_type("FCU").unwrap();
    entry.set_amount_text("100");
    assert_eq!(entry.equivalent_amount(), dec!(366));
    entry.submit(&mut ledger).unwrap();

    // 100 GBP at 4.5
    entry.select_type("FCP").unwrap();
    entry.set_amount_text("100");
    entry.submit(&mut ledger).unwrap();

    assert_eq!(ledger.total_paid(), dec!(816));
    assert_eq!(ledger.remaining_amount(), dec!(234));
    assert_eq!(ledger.settlement_status(), SettlementStatus::Outstanding);

    // The remainder in cash, plus a little extra
    entry.select_type("CASH").unwrap();
    entry.set_amount_text("234");
    entry.submit(&mut ledger).unwrap();
    assert_eq!(ledger.settlement_status(), SettlementStatus::Settled);

    entry.set_amount_text("1");
    entry.submit(&mut ledger).unwrap();
    assert_eq!(ledger.remaining_amount(), dec!(-1));
    assert_eq!(ledger.settlement_status(), SettlementStatus::Overpaid);
}

/// Test 9: Catalog and config from files
#[test]
fn test_external_catalog_and_config() {
    init_logging();
    let dir = std::env::temp_dir().join(format!("invoice-ledger-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let catalog_path = dir.join("types.json");
    let mut file = std::fs::File::create(&catalog_path).unwrap();
    write!(
        file,
        r#"[
            {{ "cd": "CASH", "name": "CASH", "txnCode": "SR" }},
            {{ "cd": "FCU", "name": "FC (US$)", "txnCode": "SR" }},
            {{ "cd": "RFD", "name": "REFUND", "txnCode": "JO" }}
        ]"#
    )
    .unwrap();

    let config_path = dir.join("ledger.json");
    let config_json = serde_json::json!({
        "settlement_currency": "AED",
        "transaction_code": "SR",
        "vat": { "fixed": "20" },
        "rates": { "AED": "1", "USD": "3.67" },
        "catalog_path": catalog_path,
    });
    std::fs::write(&config_path, config_json.to_string()).unwrap();

    let config = LedgerConfig::from_path(&config_path).unwrap();
    let catalog = config.load_catalog().unwrap();
    assert_eq!(catalog.len(), 2);
    assert!(catalog.get("RFD").is_none());

    let mut ledger = InvoiceLedger::from_config(dec!(100), &config);
    assert_eq!(ledger.net_amount_including_vat(), dec!(120));

    let mut entry = PaymentEntry::new(&catalog, &config.rates);
    entry.select_type("FCU").unwrap();
    entry.set_amount_text("10");
    entry.submit(&mut ledger).unwrap();
    assert_eq!(ledger.total_paid(), dec!(36.7));

    std::fs::remove_dir_all(&dir).ok();
}

/// Test 10: Summary serializes for the presentation layer
#[test]
fn test_summary_json() {
    let catalog = PaymentTypeCatalog::embedded();
    let mut ledger = invoice();
    ledger
        .add_payment(catalog.get("DPAY").unwrap(), dec!(1050), None, None)
        .unwrap();

    let json = serde_json::to_string(&ledger.summary()).unwrap();
    let back: LedgerSummary = serde_json::from_str(&json).unwrap();

    assert_eq!(back.status, SettlementStatus::Settled);
    assert_eq!(back.remaining_amount, Decimal::ZERO);
    assert!(json.contains("\"status\":\"settled\""));
}

/// Test 11: An unusable catalog leaves the ledger usable but unpayable through entry
#[test]
fn test_broken_catalog() {
    init_logging();
    let catalog = PaymentTypeCatalog::load("[{", "JO");
    let rates = RateTable::default();
    let mut ledger = invoice();
    let mut entry = PaymentEntry::new(&catalog, &rates);

    assert!(entry.select_type("CASH").is_err());
    entry.set_amount_text("100");
    assert!(entry.submit(&mut ledger).is_err());
    assert_eq!(ledger.remaining_amount(), dec!(1050));
}

/// Test 12: Amounts beyond the decimal range are rejected without panicking
#[test]
fn test_overflowing_payments_rejected() {
    init_logging();
    let catalog = PaymentTypeCatalog::embedded();
    let mut ledger = invoice();
    let cash = catalog.get("CASH").unwrap();

    ledger.add_payment(cash, Decimal::MAX, None, None).unwrap();
    let before = ledger.summary();

    assert!(matches!(
        ledger.add_payment(cash, Decimal::MAX, None, None),
        Err(Error::Rejected(_))
    ));
    assert_eq!(ledger.summary(), before);
    assert_eq!(ledger.settlement_status(), SettlementStatus::Overpaid);
}
