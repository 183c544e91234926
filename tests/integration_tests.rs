//! Integration tests for ledger-verifier

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use ledger_verifier::{
    patterns,
    utils::{allocate, allocate_evenly, EnhancedLineValidator},
    validate_invoice, ChartOfAccounts, ControlAccounts, Invoice, InvoiceStatus, JournalEntry,
    JournalEntryBuilder, JournalLine, RetainageCalculation, RetainageTerms, VerificationMode,
    Verifier, VerifierConfig, VerifierError,
};

fn month_end(month: u32) -> NaiveDate {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(2026, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(2025, month + 1, 1)
    };
    next.unwrap().pred_opt().unwrap()
}

fn amounts(values: &[i64]) -> Vec<BigDecimal> {
    values.iter().map(|v| BigDecimal::from(*v)).collect()
}

struct Dataset {
    lines: Vec<JournalLine>,
    invoices: Vec<Invoice>,
    expected_net_income: BigDecimal,
}

/// A year of activity for a small builder: opening balances, payroll, overhead,
/// rent, depreciation, progress billings and subcontractor payment applications.
fn build_dataset() -> Dataset {
    let controls = ControlAccounts::default();
    let mut entries: Vec<JournalEntry> = Vec::new();
    let mut invoices = Vec::new();
    let mut next_id = 1;
    let mut je_id = || {
        let id = format!("JE-{:04}", next_id);
        next_id += 1;
        id
    };

    // Opening balances, AR/AP arrive through opening-balance invoices
    let opening = vec![
        (1000, BigDecimal::from(2_850_000)),
        (1010, BigDecimal::from(1_200_000)),
        (1100, BigDecimal::from(2_240_000)),
        (1110, BigDecimal::from(-480_000)),
        (2000, BigDecimal::from(-900_000)),
        (2210, BigDecimal::from(-1_500_000)),
        (3000, BigDecimal::from(-2_000_000)),
    ];
    entries.push(
        patterns::opening_balance(
            je_id(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            "Opening Balance 2025",
            &opening,
            &controls,
        )
        .unwrap(),
    );
    invoices.push(
        Invoice::receivable("INV-OB-R001", BigDecimal::from(1_200_000), Some(3010), InvoiceStatus::Paid)
            .with_date(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()),
    );
    invoices.push(
        Invoice::payable("INV-OB-P002", BigDecimal::from(900_000), Some(3010), InvoiceStatus::Paid)
            .with_date(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()),
    );

    let revenue_weights = amounts(&[
        1_650_000, 1_680_000, 1_720_000, 1_750_000, 1_680_000, 1_620_000, 1_580_000, 1_650_000,
        1_700_000, 1_620_000, 1_580_000, 1_570_000,
    ]);
    let billings = revenue_weights.clone();
    let labor = allocate(&BigDecimal::from(650_000), &revenue_weights).unwrap();
    let rent_expense = allocate_evenly(&BigDecimal::from(108_000), 12).unwrap();
    let interest = allocate_evenly(&BigDecimal::from(48_000), 12).unwrap();
    let subcontract = allocate(&BigDecimal::from(14_000_000), &revenue_weights).unwrap();

    let mut revenue = BigDecimal::from(0);
    let mut expenses = BigDecimal::from(0);

    for month in 1..=12u32 {
        let i = (month - 1) as usize;
        let date = month_end(month);

        // Payroll accrual then disbursement
        let payroll = &labor[i];
        entries.push(
            patterns::accrual(
                je_id(),
                date,
                format!("Payroll Accrual {:02}/2025", month),
                &[(5200, payroll.clone(), "Direct labor - field crews".to_string())],
                2020,
                "Accrued payroll",
            )
            .unwrap(),
        );
        entries.push(
            JournalEntryBuilder::new(je_id(), date, format!("Payroll Disbursement {:02}/2025", month))
                .reference(format!("PR-DISB-2025-{:02}", month))
                .debit(2020, payroll.clone(), "Clear accrued payroll")
                .credit(1000, payroll.clone(), "Cash disbursement - payroll")
                .build()
                .unwrap(),
        );
        expenses += payroll;

        entries.push(
            patterns::cash_disbursement(
                je_id(),
                date,
                "G&A Overhead Expenses",
                controls.cash,
                &[
                    (6020, rent_expense[i].clone(), "Office Rent & Utilities".to_string()),
                    (7000, interest[i].clone(), "Interest expense".to_string()),
                ],
            )
            .unwrap(),
        );
        expenses += &rent_expense[i];
        expenses += &interest[i];

        let rent = BigDecimal::from(65_000 + 3_000 * month as i64);
        entries.push(
            patterns::cash_receipt(je_id(), date, "Rental Income Collection", 1000, 4100, rent.clone())
                .unwrap(),
        );
        revenue += &rent;

        if month % 3 == 0 {
            let depreciation = BigDecimal::from(60_000);
            entries.push(
                patterns::split_entry(ledger_verifier::SplitEntryParams {
                    entry_id: je_id(),
                    date,
                    description: format!("Depreciation Q{} 2025", month / 3),
                    amount: depreciation.clone(),
                    ratio: "0.6".parse().unwrap(),
                    first: (6100, 1110),
                    second: (6110, 1130),
                })
                .unwrap(),
            );
            expenses += depreciation;
        }

        // Owner progress billing with 10% retainage held in whole dollars
        let billing = RetainageCalculation::calculate_rounded(
            billings[i].clone(),
            RetainageTerms::Elevated.rate(),
            0,
        )
        .unwrap();
        let status = if month <= 10 { InvoiceStatus::Paid } else { InvoiceStatus::Approved };
        invoices.push(
            billing
                .apply_to(Invoice::receivable(
                    format!("INV-R{:03}", month),
                    billings[i].clone(),
                    Some(4000),
                    status,
                ))
                .with_date(date)
                .with_client("DFW Airport Board")
                .with_project("DFW Terminal 6"),
        );
        revenue += &billings[i];

        // Subcontractor payment application with 5% retainage
        let application = RetainageCalculation::calculate_rounded(
            subcontract[i].clone(),
            RetainageTerms::Standard.rate(),
            0,
        )
        .unwrap();
        invoices.push(
            application
                .apply_to(Invoice::payable(
                    format!("INV-P{:03}", month),
                    subcontract[i].clone(),
                    Some(5000),
                    status,
                ))
                .with_date(date)
                .with_vendor("Delgado Concrete Inc"),
        );
        expenses += &subcontract[i];
    }

    // Change orders are draft invoices in the source system, recognized by entry
    entries.push(
        JournalEntryBuilder::new(je_id(), month_end(12), "Change Order Revenue Recognition FY2025")
            .reference("CO-REV-2025")
            .debit(1030, BigDecimal::from(850_000), "Costs in excess - approved change orders")
            .credit(4200, BigDecimal::from(850_000), "Change order revenue recognized")
            .build()
            .unwrap(),
    );
    revenue += BigDecimal::from(850_000);

    Dataset {
        lines: entries.into_iter().flat_map(JournalEntry::into_lines).collect(),
        invoices,
        expected_net_income: revenue - expenses,
    }
}

#[test]
fn test_complete_dataset_verification() {
    let dataset = build_dataset();
    let config = VerifierConfig::default()
        .with_mode(VerificationMode::Import)
        .with_target_net_income(dataset.expected_net_income.clone());
    let verifier = Verifier::new(config, ChartOfAccounts::standard());

    let report = verifier.verify(&dataset.lines, &dataset.invoices).unwrap();

    assert!(report.entry_balances.is_balanced());
    assert!(report.balanced());
    assert!(report.accumulator.total().abs() < BigDecimal::from(1));
    assert_eq!(report.net_income_within_target(), Some(true));
    assert_eq!(report.income_statement.net_income, dataset.expected_net_income);
    assert!(report.is_clean());
    assert_eq!(report.trial_balance.as_of_date, Some(month_end(12)));

    // Opening AR and AP are collected and paid in full
    let controls = ControlAccounts::default();
    let open_ar: BigDecimal = dataset
        .invoices
        .iter()
        .filter(|i| i.invoice_number.starts_with("INV-R") && !i.status.is_paid())
        .map(|i| i.net_amount())
        .sum();
    assert_eq!(report.accumulator.balance(controls.accounts_receivable), open_ar);

    let held: BigDecimal = dataset
        .invoices
        .iter()
        .filter(|i| i.invoice_number.starts_with("INV-R"))
        .map(|i| i.retainage_held.clone())
        .sum();
    assert_eq!(report.accumulator.balance(controls.retainage_receivable), held);
}

#[test]
fn test_generated_invoices_satisfy_retainage_invariant() {
    let dataset = build_dataset();

    for invoice in &dataset.invoices {
        validate_invoice(invoice, &"0.5".parse().unwrap()).unwrap();
    }
}

#[test]
fn test_generated_entries_pass_import_validation() {
    let validator = EnhancedLineValidator::default();
    let dataset = build_dataset();

    use ledger_verifier::LineValidator;
    for line in &dataset.lines {
        validator.validate_line(line).unwrap();
    }
}

#[test]
fn test_report_rendering() {
    let dataset = build_dataset();
    let config = VerifierConfig::default().with_target_net_income(dataset.expected_net_income.clone());
    let verifier = Verifier::new(config, ChartOfAccounts::standard());

    let text = verifier
        .verify(&dataset.lines, &dataset.invoices)
        .unwrap()
        .to_string();

    assert!(text.contains("FINANCIAL VERIFICATION"));
    assert!(text.contains("journal entries balance"));
    assert!(text.contains("Retainage Receivable"));
    assert!(text.contains("[OK] Trial balance is within tolerance"));
    assert!(text.contains("[OK] Net income within tolerance of target"));
}

#[test]
fn test_generate_mode_reports_broken_dataset() {
    let mut dataset = build_dataset();
    // Drop the credit side of the last change order entry
    dataset.lines.pop();
    dataset
        .lines
        .push(JournalLine::credit("JE-9999", 1010, BigDecimal::from(25), "Manual AR write-off"));

    let config = VerifierConfig::default().with_target_net_income(dataset.expected_net_income.clone());
    let verifier = Verifier::new(config, ChartOfAccounts::standard());

    let report = verifier.verify(&dataset.lines, &dataset.invoices).unwrap();

    assert_eq!(report.entry_balances.unbalanced_count(), 2);
    assert!(!report.balanced());
    assert_eq!(report.net_income_within_target(), Some(false));

    let text = report.to_string();
    assert!(text.contains("[FAIL] 2 unbalanced journal entries!"));
    assert!(text.contains("UNBALANCED JE: JE-9999"));
    assert!(text.contains("[WARN] Trial balance off by"));
}

#[test]
fn test_import_mode_rejects_broken_dataset() {
    let mut dataset = build_dataset();
    dataset.lines.pop();

    let config = VerifierConfig::default().with_mode(VerificationMode::Import);
    let verifier = Verifier::new(config, ChartOfAccounts::standard());

    match verifier.verify(&dataset.lines, &dataset.invoices) {
        Err(VerifierError::UnbalancedEntry { delta, .. }) => {
            assert_eq!(delta, BigDecimal::from(850_000));
        }
        other => panic!("expected unbalanced entry, got {:?}", other),
    }
}

#[test]
fn test_config_from_json_drives_verifier() {
    let dataset = build_dataset();
    let json = format!(
        r#"{{ "mode": "import", "target_net_income": "{}", "tolerances": {{ "net_income": "1" }} }}"#,
        dataset.expected_net_income
    );
    let config = VerifierConfig::from_json(&json).unwrap();
    let verifier = Verifier::new(config, ChartOfAccounts::standard());

    let report = verifier.verify(&dataset.lines, &dataset.invoices).unwrap();
    assert_eq!(report.net_income_within_target(), Some(true));
}
