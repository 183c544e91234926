//! Trial balance accumulator

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::ControlAccounts;
use crate::traits::LedgerProjection;
use crate::types::*;

/// Signed balances keyed by account number
///
/// Balances are debit-normal: positive means net debit, negative net credit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrialBalanceAccumulator {
    balances: BTreeMap<AccountNumber, BigDecimal>,
    as_of: Option<NaiveDate>,
}

impl TrialBalanceAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from journal lines only
    pub fn from_journal_lines(lines: &[JournalLine]) -> Self {
        let mut accumulator = Self::new();
        accumulator.fold_journal_lines(lines);
        accumulator
    }

    /// Add a signed debit-normal amount to an account
    pub fn adjust(&mut self, account_number: AccountNumber, amount: &BigDecimal) {
        *self
            .balances
            .entry(account_number)
            .or_insert_with(|| BigDecimal::from(0)) += amount;
    }

    pub fn debit(&mut self, account_number: AccountNumber, amount: &BigDecimal) {
        self.adjust(account_number, amount);
    }

    pub fn credit(&mut self, account_number: AccountNumber, amount: &BigDecimal) {
        let negated = -amount.clone();
        self.adjust(account_number, &negated);
    }

    /// Record a dated activity, keeping the latest date
    pub fn observe_date(&mut self, date: Option<NaiveDate>) {
        if let Some(date) = date {
            if self.as_of.map_or(true, |current| date > current) {
                self.as_of = Some(date);
            }
        }
    }

    pub fn fold_journal_lines(&mut self, lines: &[JournalLine]) {
        let controls = ControlAccounts::default();
        for line in lines {
            line.project(self, &controls);
        }
    }

    /// Apply any projection (journal line, invoice) to this accumulator
    pub fn apply<P: LedgerProjection + ?Sized>(&mut self, record: &P, controls: &ControlAccounts) {
        record.project(self, controls);
    }

    /// Balance of an account, zero when never touched
    pub fn balance(&self, account_number: AccountNumber) -> BigDecimal {
        self.balances
            .get(&account_number)
            .cloned()
            .unwrap_or_else(|| BigDecimal::from(0))
    }

    pub fn contains(&self, account_number: AccountNumber) -> bool {
        self.balances.contains_key(&account_number)
    }

    /// Balances in ascending account order
    pub fn iter(&self) -> impl Iterator<Item = (AccountNumber, &BigDecimal)> {
        self.balances.iter().map(|(account, balance)| (*account, balance))
    }

    /// Sum of all balances; zero for a balanced ledger
    pub fn total(&self) -> BigDecimal {
        self.balances.values().sum()
    }

    pub fn as_of(&self) -> Option<NaiveDate> {
        self.as_of
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}

impl LedgerProjection for JournalLine {
    fn project(&self, accumulator: &mut TrialBalanceAccumulator, _controls: &ControlAccounts) {
        accumulator.adjust(self.account_number, &self.net());
        accumulator.observe_date(self.entry_date);
    }
}
