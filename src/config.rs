//! Verifier configuration
//!
//! All thresholds, account ranges and control account numbers live in an explicit
//! [`VerifierConfig`] that is passed to the [`Verifier`](crate::Verifier).

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::types::*;

/// How findings are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationMode {
    /// Data generation self-check: every finding becomes a warning
    #[default]
    Generate,
    /// Import gate: unbalanced entries and restricted-account usage are rejected
    Import,
}

/// Absolute-difference tolerances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Allowed |debit - credit| per journal entry
    pub entry: BigDecimal,
    /// Allowed |sum of all balances| for the trial balance
    pub trial_balance: BigDecimal,
    /// Allowed |actual - target| net income
    pub net_income: BigDecimal,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            entry: BigDecimal::new(2.into(), 2),
            trial_balance: BigDecimal::from(1),
            net_income: BigDecimal::from(100_000),
        }
    }
}

/// Half-open range of account numbers `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRange {
    pub start: AccountNumber,
    pub end: AccountNumber,
}

impl AccountRange {
    pub fn new(start: AccountNumber, end: AccountNumber) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, account_number: AccountNumber) -> bool {
        account_number >= self.start && account_number < self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn overlaps(&self, other: &AccountRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Accounts driven by invoices rather than journal entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlAccounts {
    pub cash: AccountNumber,
    pub accounts_receivable: AccountNumber,
    pub retainage_receivable: AccountNumber,
    pub accounts_payable: AccountNumber,
    pub retainage_payable: AccountNumber,
    pub retained_earnings: AccountNumber,
}

impl Default for ControlAccounts {
    fn default() -> Self {
        Self {
            cash: 1000,
            accounts_receivable: 1010,
            retainage_receivable: 1020,
            accounts_payable: 2000,
            retainage_payable: 2010,
            retained_earnings: 3010,
        }
    }
}

impl ControlAccounts {
    /// Accounts journal entries must never touch
    pub fn restricted(&self) -> [AccountNumber; 4] {
        [
            self.accounts_receivable,
            self.retainage_receivable,
            self.accounts_payable,
            self.retainage_payable,
        ]
    }

    pub fn is_restricted(&self, account_number: AccountNumber) -> bool {
        self.restricted().contains(&account_number)
    }

    fn all(&self) -> [AccountNumber; 6] {
        [
            self.cash,
            self.accounts_receivable,
            self.retainage_receivable,
            self.accounts_payable,
            self.retainage_payable,
            self.retained_earnings,
        ]
    }
}

/// Complete verifier configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    pub mode: VerificationMode,
    pub tolerances: Tolerances,
    /// Expected net income; the income statement check is skipped when absent
    pub target_net_income: Option<BigDecimal>,
    /// Credit-normal revenue accounts
    pub revenue_range: AccountRange,
    /// Debit-normal expense accounts
    pub expense_range: AccountRange,
    pub control_accounts: ControlAccounts,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            mode: VerificationMode::Generate,
            tolerances: Tolerances::default(),
            target_net_income: None,
            revenue_range: AccountRange::new(4000, 5000),
            expense_range: AccountRange::new(5000, 8000),
            control_accounts: ControlAccounts::default(),
        }
    }
}

impl VerifierConfig {
    /// Parse and validate a JSON configuration; missing fields take defaults
    pub fn from_json(json: &str) -> VerifierResult<Self> {
        let config: VerifierConfig =
            serde_json::from_str(json).map_err(|e| VerifierError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_mode(mut self, mode: VerificationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_target_net_income(mut self, target: BigDecimal) -> Self {
        self.target_net_income = Some(target);
        self
    }

    /// Parse the target from a decimal string such as "8500000.00"
    pub fn with_target_str(self, target: &str) -> VerifierResult<Self> {
        let target = BigDecimal::from_str(target)
            .map_err(|e| VerifierError::Config(format!("Invalid target net income: {}", e)))?;
        Ok(self.with_target_net_income(target))
    }

    pub fn validate(&self) -> VerifierResult<()> {
        let zero = BigDecimal::from(0);
        for (name, value) in [
            ("entry", &self.tolerances.entry),
            ("trial_balance", &self.tolerances.trial_balance),
            ("net_income", &self.tolerances.net_income),
        ] {
            if *value < zero {
                return Err(VerifierError::Config(format!(
                    "Tolerance '{}' cannot be negative: {}",
                    name, value
                )));
            }
        }

        if self.revenue_range.is_empty() || self.expense_range.is_empty() {
            return Err(VerifierError::Config(
                "Revenue and expense account ranges cannot be empty".to_string(),
            ));
        }

        if self.revenue_range.overlaps(&self.expense_range) {
            return Err(VerifierError::Config(format!(
                "Revenue range {}..{} overlaps expense range {}..{}",
                self.revenue_range.start,
                self.revenue_range.end,
                self.expense_range.start,
                self.expense_range.end
            )));
        }

        let accounts = self.control_accounts.all();
        for (i, account) in accounts.iter().enumerate() {
            if accounts[i + 1..].contains(account) {
                return Err(VerifierError::Config(format!(
                    "Control account {} is assigned more than once",
                    account
                )));
            }
        }

        Ok(())
    }
}
