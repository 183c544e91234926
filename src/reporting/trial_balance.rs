//! Trial balance and income statement rollups over an accumulator

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::AccountRange;
use crate::ledger::TrialBalanceAccumulator;
use crate::traits::AccountDirectory;
use crate::types::*;

/// One printed trial balance row; exactly one side is set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalanceLine {
    pub account_number: AccountNumber,
    pub name: String,
    pub debit: Option<BigDecimal>,
    pub credit: Option<BigDecimal>,
}

/// Trial balance with debit and credit columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    pub as_of_date: Option<NaiveDate>,
    /// Rows with a balance of at least one cent, ascending by account
    pub lines: Vec<TrialBalanceLine>,
    pub total_debits: BigDecimal,
    pub total_credits: BigDecimal,
    /// Debits minus credits
    pub difference: BigDecimal,
    /// |difference| below the trial balance tolerance
    pub balanced: bool,
}

impl TrialBalanceReport {
    pub fn build<D: AccountDirectory + ?Sized>(
        accumulator: &TrialBalanceAccumulator,
        directory: &D,
        tolerance: &BigDecimal,
    ) -> Self {
        let zero = BigDecimal::from(0);
        let cent = BigDecimal::new(1.into(), 2);
        let mut lines = Vec::new();
        let mut total_debits = BigDecimal::from(0);
        let mut total_credits = BigDecimal::from(0);

        for (account_number, balance) in accumulator.iter() {
            let (debit, credit) = if *balance > zero {
                total_debits += balance;
                (Some(balance.clone()), None)
            } else {
                let amount = balance.abs();
                total_credits += &amount;
                (None, Some(amount))
            };

            if balance.abs() < cent {
                continue;
            }

            lines.push(TrialBalanceLine {
                account_number,
                name: directory.display_name(account_number),
                debit,
                credit,
            });
        }

        let difference = &total_debits - &total_credits;
        let balanced = difference.abs() < *tolerance;

        Self {
            as_of_date: accumulator.as_of(),
            lines,
            total_debits,
            total_credits,
            difference,
            balanced,
        }
    }
}

/// Revenue, expense and net income over the configured account ranges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatementSummary {
    pub total_revenue: BigDecimal,
    pub total_expenses: BigDecimal,
    pub net_income: BigDecimal,
    pub target_net_income: Option<BigDecimal>,
    /// Actual minus target
    pub deviation: Option<BigDecimal>,
    /// None when no target was given
    pub within_target: Option<bool>,
}

impl IncomeStatementSummary {
    pub fn build(
        accumulator: &TrialBalanceAccumulator,
        revenue_range: &AccountRange,
        expense_range: &AccountRange,
        target: Option<&BigDecimal>,
        tolerance: &BigDecimal,
    ) -> Self {
        let mut total_revenue = BigDecimal::from(0);
        let mut total_expenses = BigDecimal::from(0);

        for (account_number, balance) in accumulator.iter() {
            if revenue_range.contains(account_number) {
                // credit-normal, stored negative
                total_revenue -= balance;
            } else if expense_range.contains(account_number) {
                total_expenses += balance;
            }
        }

        let net_income = &total_revenue - &total_expenses;
        let deviation = target.map(|t| &net_income - t);
        let within_target = deviation.as_ref().map(|d| d.abs() < *tolerance);

        Self {
            total_revenue,
            total_expenses,
            net_income,
            target_net_income: target.cloned(),
            deviation,
            within_target,
        }
    }
}
