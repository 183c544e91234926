//! Dataset verification example

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use ledger_verifier::{
    patterns, utils::allocate_evenly, ChartOfAccounts, ControlAccounts, Invoice, InvoiceStatus,
    JournalEntryBuilder, JournalLine, RetainageCalculation, RetainageTerms, Verifier,
    VerifierConfig,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_target(false).init();

    println!("🏗️  Ledger Verifier - Quarterly Dataset Example\n");

    let controls = ControlAccounts::default();
    let mut lines: Vec<JournalLine> = Vec::new();
    let mut invoices: Vec<Invoice> = Vec::new();

    // 1. Opening balances (AR/AP are seeded by opening-balance invoices)
    println!("📊 Booking opening balances...");
    let opening = patterns::opening_balance(
        "JE-0001",
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        "Opening Balance 2025",
        &[
            (1000, BigDecimal::from(2_850_000)),
            (1100, BigDecimal::from(2_240_000)),
            (1110, BigDecimal::from(-480_000)),
            (2210, BigDecimal::from(-1_500_000)),
            (3000, BigDecimal::from(-2_000_000)),
        ],
        &controls,
    )?;
    println!("  ✓ {} lines, plug to retained earnings included", opening.lines.len());
    lines.extend(opening.into_lines());

    invoices.push(
        Invoice::receivable("INV-OB-R001", BigDecimal::from(750_000), Some(3010), InvoiceStatus::Paid)
            .with_date(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap())
            .with_description("Prior year Progress Billing #18"),
    );

    // 2. Monthly activity for one quarter
    println!("💰 Recording Q1 activity...");
    let month_ends = [
        NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
        NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
    ];
    let overhead = allocate_evenly(&BigDecimal::from(100_000), month_ends.len())?;
    let mut je_num = 2;

    for (i, date) in month_ends.iter().enumerate() {
        let entry = JournalEntryBuilder::new(format!("JE-{:04}", je_num), *date, "Payroll")
            .reference(format!("PR-2025-{:02}", i + 1))
            .debit(5200, BigDecimal::from(120_000), "Direct labor - field crews")
            .credit(1000, BigDecimal::from(120_000), "Cash disbursement - payroll")
            .build()?;
        lines.extend(entry.into_lines());
        je_num += 1;

        let entry = patterns::cash_disbursement(
            format!("JE-{:04}", je_num),
            *date,
            "G&A Overhead Expenses",
            controls.cash,
            &[(6020, overhead[i].clone(), "Office Rent & Utilities".to_string())],
        )?;
        lines.extend(entry.into_lines());
        je_num += 1;

        let billing = RetainageCalculation::calculate(
            BigDecimal::from(900_000),
            RetainageTerms::Elevated.rate(),
        )?;
        invoices.push(
            billing
                .apply_to(Invoice::receivable(
                    format!("INV-R{:03}", i + 1),
                    BigDecimal::from(900_000),
                    Some(4000),
                    if i < 2 { InvoiceStatus::Paid } else { InvoiceStatus::Approved },
                ))
                .with_date(*date)
                .with_client("DFW Airport Board"),
        );

        let application = RetainageCalculation::calculate(
            BigDecimal::from(520_000),
            RetainageTerms::Standard.rate(),
        )?;
        invoices.push(
            application
                .apply_to(Invoice::payable(
                    format!("INV-P{:03}", i + 1),
                    BigDecimal::from(520_000),
                    Some(5000),
                    InvoiceStatus::Paid,
                ))
                .with_date(*date)
                .with_vendor("Delgado Concrete Inc"),
        );
    }
    println!("  ✓ {} journal lines, {} invoices", lines.len(), invoices.len());

    // 3. Verify against the expected quarterly net income
    // 2.7M billed - 1.56M subcontract - 360K labor - 100K overhead
    let config = VerifierConfig::default().with_target_str("680000")?;
    let verifier = Verifier::new(config, ChartOfAccounts::standard());
    let report = verifier.verify(&lines, &invoices)?;

    println!("\n{}", report);

    if report.is_clean() {
        println!("✅ Dataset is ready for import");
    } else {
        println!("❌ Dataset has {} finding(s):", report.warnings.len());
        for warning in &report.warnings {
            println!("    - {}", warning);
        }
    }

    Ok(())
}
