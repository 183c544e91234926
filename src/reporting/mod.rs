//! Verification reports and their text rendering

pub mod trial_balance;

pub use trial_balance::*;

use bigdecimal::BigDecimal;
use std::fmt;

use crate::ledger::{EntryBalanceReport, TrialBalanceAccumulator};
use crate::types::*;

const WIDTH: usize = 70;

/// Outcome of a full verification run
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationReport {
    pub entry_balances: EntryBalanceReport,
    pub trial_balance: TrialBalanceReport,
    pub income_statement: IncomeStatementSummary,
    /// Final balances after journal lines and invoice projections
    pub accumulator: TrialBalanceAccumulator,
    /// Findings that did not abort verification
    pub warnings: Vec<VerifierError>,
}

impl VerificationReport {
    pub fn balanced(&self) -> bool {
        self.trial_balance.balanced
    }

    pub fn net_income_within_target(&self) -> Option<bool> {
        self.income_statement.within_target
    }

    /// No warnings of any kind
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Format an amount with two decimals and thousands separators, e.g. `-1,234.50`
pub fn format_amount(amount: &BigDecimal) -> String {
    let rounded = amount.round(2).with_scale(2);
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded < BigDecimal::from(0) { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(WIDTH);
        writeln!(f, "{}", "=".repeat(WIDTH))?;
        writeln!(f, "FINANCIAL VERIFICATION")?;
        writeln!(f, "{}", "=".repeat(WIDTH))?;

        for finding in &self.entry_balances.unbalanced {
            if let VerifierError::UnbalancedEntry {
                entry_id,
                total_debit,
                total_credit,
                ..
            } = finding
            {
                writeln!(
                    f,
                    "  UNBALANCED JE: {} DR={} CR={}",
                    entry_id,
                    format_amount(total_debit),
                    format_amount(total_credit)
                )?;
            }
        }
        if self.entry_balances.is_balanced() {
            writeln!(
                f,
                "[OK] All {} journal entries balance",
                self.entry_balances.entry_count()
            )?;
        } else {
            writeln!(
                f,
                "[FAIL] {} unbalanced journal entries!",
                self.entry_balances.unbalanced_count()
            )?;
        }

        let tb = &self.trial_balance;
        let title = match tb.as_of_date {
            Some(date) => format!("TRIAL BALANCE (Estimated Post-Import, as of {})", date),
            None => "TRIAL BALANCE (Estimated Post-Import)".to_string(),
        };
        writeln!(f)?;
        writeln!(f, "{:^width$}", title, width = WIDTH)?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "{:>6}  {:<40}  {:>14}  {:>14}", "Acct", "Name", "Debit", "Credit")?;
        writeln!(f, "{}", rule)?;
        for line in &tb.lines {
            let debit = line.debit.as_ref().map(format_amount).unwrap_or_default();
            let credit = line.credit.as_ref().map(format_amount).unwrap_or_default();
            writeln!(
                f,
                "{:>6}  {:<40}  {:>14}  {:>14}",
                line.account_number, line.name, debit, credit
            )?;
        }
        writeln!(f, "{}", rule)?;
        writeln!(
            f,
            "{:>6}  {:<40}  {:>14}  {:>14}",
            "",
            "TOTALS",
            format_amount(&tb.total_debits),
            format_amount(&tb.total_credits)
        )?;
        writeln!(
            f,
            "{:>6}  {:<40}  {:>14}",
            "",
            "DIFFERENCE",
            format_amount(&tb.difference)
        )?;
        if tb.balanced {
            writeln!(f, "[OK] Trial balance is within tolerance")?;
        } else {
            writeln!(
                f,
                "[WARN] Trial balance off by ${}",
                format_amount(&tb.difference)
            )?;
        }

        let is = &self.income_statement;
        writeln!(f)?;
        writeln!(f, "{:^width$}", "INCOME STATEMENT SUMMARY (Estimated)", width = WIDTH)?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "  Total Revenue:    ${:>18}", format_amount(&is.total_revenue))?;
        writeln!(f, "  Total Expenses:   ${:>18}", format_amount(&is.total_expenses))?;
        writeln!(f, "  Net Income:       ${:>18}", format_amount(&is.net_income))?;
        if let (Some(target), Some(deviation)) = (&is.target_net_income, &is.deviation) {
            writeln!(f, "  Target NI:        ${:>18}", format_amount(target))?;
            if is.within_target == Some(true) {
                writeln!(
                    f,
                    "  [OK] Net income within tolerance of target (diff: ${})",
                    format_amount(deviation)
                )?;
            } else {
                writeln!(
                    f,
                    "  [WARN] Net income differs from target by ${}",
                    format_amount(deviation)
                )?;
            }
        }

        Ok(())
    }
}
