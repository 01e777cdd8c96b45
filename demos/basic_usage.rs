//! Basic usage example of the invoice ledger.

use invoice_ledger::{error::Result, InvoiceLedger, LedgerConfig, PaymentEntry};
use rust_decimal::Decimal;
use std::sync::Arc;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .try_init()
        .ok();

    println!("\n=== Invoice Ledger - Basic Example ===\n");

    // 1. Configuration and catalog
    println!("1. Loading configuration and payment types...");
    let config = LedgerConfig::default();
    let catalog = config.load_catalog()?;
    for payment_type in catalog.iter() {
        println!("   - {:<10} {}", payment_type.key(), payment_type.display_name());
    }
    println!();

    // 2. The invoice
    println!("2. Creating invoice for 1000.00 {}:", config.settlement_currency);
    let mut ledger = InvoiceLedger::from_config(Decimal::from(1000), &config)
        .with_discount(Decimal::from(100))
        .with_additional_discount(Decimal::from(50))
        .with_metrics(Arc::new(invoice_ledger::observability::LogMetrics));
    print_summary(&ledger);

    // 3. Foreign-currency payment
    println!("3. Paying 50 in euro:");
    let mut entry = PaymentEntry::new(&catalog, &config.rates);
    entry.select_type("FCE")?;
    entry.set_amount_text("50");
    println!(
        "   {} at {} = {:.2} {}",
        entry.currency(),
        entry.exchange_rate(),
        entry.equivalent_amount(),
        config.settlement_currency
    );
    let euro_payment = entry.submit(&mut ledger)?;
    print_summary(&ledger);

    // 4. Invalid input is reported, not recorded
    println!("4. Trying an invalid amount:");
    entry.select_type("CASH")?;
    entry.set_amount_text("twelve");
    if let Err(e) = entry.submit(&mut ledger) {
        println!("   ✓ {}\n", e);
    }

    // 5. Settle the rest in cash
    println!("5. Settling the remainder in cash:");
    entry.set_amount_text(ledger.remaining_amount().to_string());
    entry.submit(&mut ledger)?;
    print_summary(&ledger);

    // 6. Remove the euro payment again
    println!("6. Removing the euro payment:");
    if let Some(payment) = ledger.remove_payment(euro_payment) {
        println!("   ✓ Removed {} ({:.2})\n", payment.id, payment.amount);
    }
    print_summary(&ledger);

    println!("=== Example Complete ===\n");
    Ok(())
}

fn print_summary(ledger: &InvoiceLedger) {
    let summary = ledger.summary();
    println!("   Net amount:       {:.2}", summary.net_amount);
    println!("   {}:     {:.2}", summary.vat, summary.vat_amount);
    println!("   Including VAT:    {:.2}", summary.net_amount_including_vat);
    println!("   Total paid:       {:.2}", summary.total_paid);
    println!(
        "   Remaining:        {:.2} ({:?})\n",
        summary.remaining_amount, summary.status
    );
}
