//! Retainage calculation examples

use bigdecimal::BigDecimal;
use ledger_verifier::{
    invoice_postings, validate_invoice, ControlAccounts, Invoice, InvoiceStatus,
    RetainageCalculation, RetainageRate, RetainageTerms,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🏗️  Ledger Verifier - Retainage Examples\n");

    // 1. Standard retainage terms
    println!("📊 Retainage Terms:");
    let terms = [
        (RetainageTerms::None, "Opening balance and rent invoices"),
        (RetainageTerms::Standard, "Subcontractor payment applications"),
        (RetainageTerms::Elevated, "Owner progress billings"),
    ];
    for (term, description) in terms.iter() {
        println!("  {:?}: {}% - {}", term, term.rate().pct(), description);
    }
    println!();

    // 2. Progress billing with retainage
    println!("🧾 Progress Billing #24:");
    let amount = BigDecimal::from(16_500_000);
    let billing = RetainageCalculation::calculate(amount.clone(), RetainageTerms::Elevated.rate())?;
    println!("  Billed:          ${}", billing.amount);
    println!("  Retainage (10%): ${}", billing.retainage_held);
    println!("  Net to AR:       ${}", billing.net_amount);
    println!();

    let invoice = billing
        .apply_to(Invoice::receivable("INV-R024", amount, Some(4000), InvoiceStatus::Paid))
        .with_project("DFW Terminal 6");
    validate_invoice(&invoice, &BigDecimal::from(1))?;

    // 3. Ledger effects of the invoice
    println!("📒 Postings for {}:", invoice.invoice_number);
    for posting in invoice_postings(&invoice, &ControlAccounts::default()) {
        println!("  {:>6}  {:>16}  {}", posting.account_number, posting.amount, posting.memo);
    }
    println!();

    // 4. Custom rate, rounded to whole dollars
    println!("🔧 Custom 7.5% retainage, whole dollars:");
    let custom = RetainageCalculation::calculate_rounded(
        BigDecimal::from(1_234_567),
        RetainageRate::new("7.5".parse()?)?,
        0,
    )?;
    println!("  Held: ${}  Net: ${}", custom.retainage_held, custom.net_amount);

    println!("\n🎉 Example completed successfully!");
    Ok(())
}
