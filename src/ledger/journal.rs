//! Journal entries: construction, balance checks and common patterns

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::config::{ControlAccounts, Tolerances};
use crate::traits::*;
use crate::types::*;

/// A complete journal entry with its lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub entry_id: String,
    pub entry_date: NaiveDate,
    pub description: String,
    /// Optional reference (e.g. "PR-2025-01", "OB-2025")
    pub reference: Option<String>,
    pub lines: Vec<JournalLine>,
}

impl JournalEntry {
    pub fn new(entry_id: impl Into<String>, entry_date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            entry_id: entry_id.into(),
            entry_date,
            description: description.into(),
            reference: None,
            lines: Vec::new(),
        }
    }

    pub fn total_debits(&self) -> BigDecimal {
        self.lines.iter().map(|l| &l.debit).sum()
    }

    pub fn total_credits(&self) -> BigDecimal {
        self.lines.iter().map(|l| &l.credit).sum()
    }

    pub fn totals(&self) -> EntryTotals {
        EntryTotals {
            total_debit: self.total_debits(),
            total_credit: self.total_credits(),
        }
    }

    /// Check if the entry is balanced within the tolerance
    pub fn is_balanced(&self, tolerance: &BigDecimal) -> bool {
        self.totals().is_balanced(tolerance)
    }

    /// Validate structure, balance and control account usage
    pub fn validate(
        &self,
        validator: &dyn LineValidator,
        controls: &ControlAccounts,
        tolerance: &BigDecimal,
    ) -> VerifierResult<()> {
        if self.lines.len() < 2 {
            return Err(VerifierError::InvalidJournalLine(format!(
                "Entry {} must have at least two lines for double-entry bookkeeping",
                self.entry_id
            )));
        }

        for line in &self.lines {
            validator.validate_line(line)?;

            if controls.is_restricted(line.account_number) {
                return Err(VerifierError::RestrictedAccount {
                    entry_id: self.entry_id.clone(),
                    account_number: line.account_number,
                });
            }
        }

        // Built entries must stay strictly inside the tolerance
        let totals = self.totals();
        let delta = totals.delta();
        if delta != BigDecimal::from(0) && delta >= *tolerance {
            return Err(VerifierError::UnbalancedEntry {
                entry_id: self.entry_id.clone(),
                delta,
                total_debit: totals.total_debit,
                total_credit: totals.total_credit,
            });
        }

        Ok(())
    }

    /// Flatten into journal lines
    pub fn into_lines(self) -> Vec<JournalLine> {
        self.lines
    }
}

/// Builder for journal entries that refuses entries a ledger import would reject
pub struct JournalEntryBuilder {
    entry: JournalEntry,
    controls: ControlAccounts,
    tolerance: BigDecimal,
    validator: Box<dyn LineValidator>,
}

impl JournalEntryBuilder {
    /// Create a new journal entry builder with default control accounts and tolerance
    pub fn new(entry_id: impl Into<String>, entry_date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            entry: JournalEntry::new(entry_id, entry_date, description),
            controls: ControlAccounts::default(),
            tolerance: Tolerances::default().entry,
            validator: Box::new(DefaultLineValidator),
        }
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.entry.reference = Some(reference.into());
        self
    }

    pub fn controls(mut self, controls: ControlAccounts) -> Self {
        self.controls = controls;
        self
    }

    pub fn tolerance(mut self, tolerance: BigDecimal) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn validator(mut self, validator: Box<dyn LineValidator>) -> Self {
        self.validator = validator;
        self
    }

    /// Add a debit line
    pub fn debit(
        self,
        account_number: AccountNumber,
        amount: BigDecimal,
        description: impl Into<String>,
    ) -> Self {
        let line = JournalLine::debit(
            self.entry.entry_id.clone(),
            account_number,
            amount,
            description,
        );
        self.line(line)
    }

    /// Add a credit line
    pub fn credit(
        self,
        account_number: AccountNumber,
        amount: BigDecimal,
        description: impl Into<String>,
    ) -> Self {
        let line = JournalLine::credit(
            self.entry.entry_id.clone(),
            account_number,
            amount,
            description,
        );
        self.line(line)
    }

    /// Add a custom line; entry id and date are taken from the entry
    pub fn line(mut self, mut line: JournalLine) -> Self {
        line.entry_id = self.entry.entry_id.clone();
        line.entry_date = Some(self.entry.entry_date);
        self.entry.lines.push(line);
        self
    }

    /// Build the entry
    pub fn build(self) -> VerifierResult<JournalEntry> {
        self.entry
            .validate(self.validator.as_ref(), &self.controls, &self.tolerance)?;
        Ok(self.entry)
    }
}

/// Per-entry totals of a line collection and the entries that do not balance
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntryBalanceReport {
    pub totals: BTreeMap<String, EntryTotals>,
    /// `UnbalancedEntry` findings in entry id order
    pub unbalanced: Vec<VerifierError>,
}

impl EntryBalanceReport {
    pub fn entry_count(&self) -> usize {
        self.totals.len()
    }

    pub fn unbalanced_count(&self) -> usize {
        self.unbalanced.len()
    }

    pub fn is_balanced(&self) -> bool {
        self.unbalanced.is_empty()
    }
}

/// Group lines by entry id and flag entries whose debits and credits differ
/// by more than the tolerance. Never fails.
pub fn check_entry_balances(lines: &[JournalLine], tolerance: &BigDecimal) -> EntryBalanceReport {
    let mut totals: BTreeMap<String, EntryTotals> = BTreeMap::new();
    for line in lines {
        let entry = totals.entry(line.entry_id.clone()).or_default();
        entry.total_debit += &line.debit;
        entry.total_credit += &line.credit;
    }

    let unbalanced = totals
        .iter()
        .filter(|(_, t)| !t.is_balanced(tolerance))
        .map(|(entry_id, t)| VerifierError::UnbalancedEntry {
            entry_id: entry_id.clone(),
            total_debit: t.total_debit.clone(),
            total_credit: t.total_credit.clone(),
            delta: t.delta(),
        })
        .collect();

    EntryBalanceReport { totals, unbalanced }
}

/// Like [`check_entry_balances`] but fails on the first unbalanced entry
pub fn enforce_entry_balances(
    lines: &[JournalLine],
    tolerance: &BigDecimal,
) -> VerifierResult<EntryBalanceReport> {
    let report = check_entry_balances(lines, tolerance);
    match report.unbalanced.first() {
        Some(err) => Err(err.clone()),
        None => Ok(report),
    }
}

/// Lines that touch a restricted control account, one finding per entry and account
pub fn find_restricted_lines(lines: &[JournalLine], controls: &ControlAccounts) -> Vec<VerifierError> {
    let hits: BTreeSet<(&str, AccountNumber)> = lines
        .iter()
        .filter(|l| controls.is_restricted(l.account_number))
        .map(|l| (l.entry_id.as_str(), l.account_number))
        .collect();

    hits.into_iter()
        .map(|(entry_id, account_number)| VerifierError::RestrictedAccount {
            entry_id: entry_id.to_string(),
            account_number,
        })
        .collect()
}

/// Parameters for splitting one amount across two debit/credit pairs
pub struct SplitEntryParams {
    pub entry_id: String,
    pub date: NaiveDate,
    pub description: String,
    pub amount: BigDecimal,
    /// Share of the amount booked to the first pair, in [0, 1]; a pair whose
    /// share rounds to zero is left out of the entry
    pub ratio: BigDecimal,
    pub first: (AccountNumber, AccountNumber),
    pub second: (AccountNumber, AccountNumber),
}

/// Common journal entry patterns
pub mod patterns {
    use super::*;

    fn zero() -> BigDecimal {
        BigDecimal::from(0)
    }

    /// Opening balance entry from signed balances (positive = debit)
    ///
    /// Restricted control accounts are skipped since their opening balances come
    /// from opening-balance invoices; the difference is plugged to retained earnings.
    pub fn opening_balance(
        entry_id: impl Into<String>,
        date: NaiveDate,
        description: impl Into<String>,
        balances: &[(AccountNumber, BigDecimal)],
        controls: &ControlAccounts,
    ) -> VerifierResult<JournalEntry> {
        let mut builder = JournalEntryBuilder::new(entry_id, date, description)
            .controls(controls.clone());
        let mut total_debit = zero();
        let mut total_credit = zero();

        let mut sorted: Vec<&(AccountNumber, BigDecimal)> = balances.iter().collect();
        sorted.sort_by_key(|(account, _)| *account);

        for (account, balance) in sorted {
            if controls.is_restricted(*account) || *balance == zero() {
                continue;
            }
            let memo = format!("Opening balance account {}", account);
            if *balance > zero() {
                total_debit += balance;
                builder = builder.debit(*account, balance.clone(), memo);
            } else {
                let amount = balance.abs();
                total_credit += &amount;
                builder = builder.credit(*account, amount, memo);
            }
        }

        let plug = &total_debit - &total_credit;
        let memo = "Opening balance plug - AR/AP via invoices";
        if plug > zero() {
            builder = builder.credit(controls.retained_earnings, plug, memo);
        } else if plug < zero() {
            builder = builder.debit(controls.retained_earnings, plug.abs(), memo);
        }

        builder.build()
    }

    /// Debit each line's account and credit the total to one offset account
    pub fn accrual(
        entry_id: impl Into<String>,
        date: NaiveDate,
        description: impl Into<String>,
        debits: &[(AccountNumber, BigDecimal, String)],
        credit_account: AccountNumber,
        credit_memo: impl Into<String>,
    ) -> VerifierResult<JournalEntry> {
        let mut builder = JournalEntryBuilder::new(entry_id, date, description);
        let mut total = zero();

        for (account, amount, memo) in debits {
            if *amount > zero() {
                total += amount;
                builder = builder.debit(*account, amount.clone(), memo.clone());
            }
        }

        builder.credit(credit_account, total, credit_memo).build()
    }

    /// Expenses paid straight from cash
    pub fn cash_disbursement(
        entry_id: impl Into<String>,
        date: NaiveDate,
        description: impl Into<String>,
        cash_account: AccountNumber,
        expenses: &[(AccountNumber, BigDecimal, String)],
    ) -> VerifierResult<JournalEntry> {
        let description = description.into();
        let memo = format!("Cash - {}", description.to_lowercase());
        accrual(entry_id, date, description, expenses, cash_account, memo)
    }

    /// Income collected in cash (debit cash, credit revenue)
    pub fn cash_receipt(
        entry_id: impl Into<String>,
        date: NaiveDate,
        description: impl Into<String>,
        cash_account: AccountNumber,
        revenue_account: AccountNumber,
        amount: BigDecimal,
    ) -> VerifierResult<JournalEntry> {
        JournalEntryBuilder::new(entry_id, date, description)
            .debit(cash_account, amount.clone(), "Cash received")
            .credit(revenue_account, amount, "Revenue recognized")
            .build()
    }

    /// Split an amount across two debit/credit pairs, e.g. equipment and building
    /// depreciation. The first share is rounded to cents, the second takes the rest.
    pub fn split_entry(params: SplitEntryParams) -> VerifierResult<JournalEntry> {
        if params.ratio < zero() || params.ratio > BigDecimal::from(1) {
            return Err(VerifierError::Validation(format!(
                "Split ratio must be between 0 and 1, got {}",
                params.ratio
            )));
        }

        let first = (&params.amount * &params.ratio).round(2);
        let second = (&params.amount - &first).round(2);
        let (first_debit, first_credit) = params.first;
        let (second_debit, second_credit) = params.second;

        let mut builder =
            JournalEntryBuilder::new(params.entry_id, params.date, params.description);
        if first != zero() {
            let memo = format!("Share of {}", params.amount);
            builder = builder
                .debit(first_debit, first.clone(), memo.clone())
                .credit(first_credit, first, memo);
        }
        if second != zero() {
            let memo = format!("Remainder of {}", params.amount);
            builder = builder
                .debit(second_debit, second.clone(), memo.clone())
                .credit(second_credit, second, memo);
        }

        builder.build()
    }
}
