//! Core types and data structures for the verifier

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Numeric general-ledger account identifier (e.g. 1000 for Cash)
pub type AccountNumber = u32;

/// Account types following standard accounting principles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Assets - what the business owns (Cash, Receivables, Equipment, etc.)
    Asset,
    /// Liabilities - what the business owes (Payables, Retainage Payable, Loans, etc.)
    Liability,
    /// Equity - owner's interest in the business (Capital, Retained Earnings)
    Equity,
    /// Revenue - contract, rental and change order income
    Revenue,
    /// Expenses - direct costs, overhead, depreciation and interest
    Expense,
}

impl AccountType {
    /// Returns the normal balance side for this account type
    /// Assets and Expenses normally have debit balances
    /// Liabilities, Equity, and Revenue normally have credit balances
    pub fn normal_balance(&self) -> EntryType {
        match self {
            AccountType::Asset | AccountType::Expense => EntryType::Debit,
            AccountType::Liability | AccountType::Equity | AccountType::Revenue => {
                EntryType::Credit
            }
        }
    }
}

/// Sides of a double-entry posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Debit,
    Credit,
}

/// One line of a journal entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalLine {
    /// Identifier shared by all lines of the same entry (e.g. "JE-0001")
    pub entry_id: String,
    /// Posting date of the entry, when known
    pub entry_date: Option<NaiveDate>,
    /// Account being affected
    pub account_number: AccountNumber,
    /// Debit amount, zero when the line is a credit
    pub debit: BigDecimal,
    /// Credit amount, zero when the line is a debit
    pub credit: BigDecimal,
    /// Line description
    pub description: String,
}

impl JournalLine {
    /// Create a new journal line
    pub fn new(
        entry_id: impl Into<String>,
        account_number: AccountNumber,
        debit: BigDecimal,
        credit: BigDecimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            entry_id: entry_id.into(),
            entry_date: None,
            account_number,
            debit,
            credit,
            description: description.into(),
        }
    }

    /// Create a debit line
    pub fn debit(
        entry_id: impl Into<String>,
        account_number: AccountNumber,
        amount: BigDecimal,
        description: impl Into<String>,
    ) -> Self {
        Self::new(
            entry_id,
            account_number,
            amount,
            BigDecimal::from(0),
            description,
        )
    }

    /// Create a credit line
    pub fn credit(
        entry_id: impl Into<String>,
        account_number: AccountNumber,
        amount: BigDecimal,
        description: impl Into<String>,
    ) -> Self {
        Self::new(
            entry_id,
            account_number,
            BigDecimal::from(0),
            amount,
            description,
        )
    }

    /// Attach a posting date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.entry_date = Some(date);
        self
    }

    /// Signed debit-normal effect of this line (debit minus credit)
    pub fn net(&self) -> BigDecimal {
        &self.debit - &self.credit
    }
}

/// Direction of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceType {
    /// Billed to a client (progress billing, rent)
    Receivable,
    /// Received from a vendor or subcontractor (payment application)
    Payable,
}

/// Lifecycle status of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Paid,
    Approved,
    Pending,
    Draft,
}

impl InvoiceStatus {
    pub fn is_paid(&self) -> bool {
        matches!(self, InvoiceStatus::Paid)
    }
}

/// Invoice record; its ledger effects are derived, never stored as journal lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_number: String,
    pub invoice_type: InvoiceType,
    pub invoice_date: Option<NaiveDate>,
    /// Gross billed amount
    pub amount: BigDecimal,
    /// Retainage percentage in [0, 100]
    pub retainage_pct: BigDecimal,
    /// Amount withheld until contract completion
    pub retainage_held: BigDecimal,
    /// Revenue, expense or retained earnings account offset by this invoice
    pub gl_account: Option<AccountNumber>,
    pub status: InvoiceStatus,
    pub project_name: Option<String>,
    pub vendor_name: Option<String>,
    pub client_name: Option<String>,
    pub description: Option<String>,
}

impl Invoice {
    /// Create a new invoice with no retainage
    pub fn new(
        invoice_number: impl Into<String>,
        invoice_type: InvoiceType,
        amount: BigDecimal,
        gl_account: Option<AccountNumber>,
        status: InvoiceStatus,
    ) -> Self {
        Self {
            invoice_number: invoice_number.into(),
            invoice_type,
            invoice_date: None,
            amount,
            retainage_pct: BigDecimal::from(0),
            retainage_held: BigDecimal::from(0),
            gl_account,
            status,
            project_name: None,
            vendor_name: None,
            client_name: None,
            description: None,
        }
    }

    /// Create a receivable invoice
    pub fn receivable(
        invoice_number: impl Into<String>,
        amount: BigDecimal,
        gl_account: Option<AccountNumber>,
        status: InvoiceStatus,
    ) -> Self {
        Self::new(
            invoice_number,
            InvoiceType::Receivable,
            amount,
            gl_account,
            status,
        )
    }

    /// Create a payable invoice
    pub fn payable(
        invoice_number: impl Into<String>,
        amount: BigDecimal,
        gl_account: Option<AccountNumber>,
        status: InvoiceStatus,
    ) -> Self {
        Self::new(
            invoice_number,
            InvoiceType::Payable,
            amount,
            gl_account,
            status,
        )
    }

    /// Set retainage percentage and the amount held
    pub fn with_retainage(mut self, retainage_pct: BigDecimal, retainage_held: BigDecimal) -> Self {
        self.retainage_pct = retainage_pct;
        self.retainage_held = retainage_held;
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.invoice_date = Some(date);
        self
    }

    pub fn with_project(mut self, project_name: impl Into<String>) -> Self {
        self.project_name = Some(project_name.into());
        self
    }

    pub fn with_vendor(mut self, vendor_name: impl Into<String>) -> Self {
        self.vendor_name = Some(vendor_name.into());
        self
    }

    pub fn with_client(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = Some(client_name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Amount net of retainage, booked to AR/AP
    pub fn net_amount(&self) -> BigDecimal {
        &self.amount - &self.retainage_held
    }
}

/// Chart of accounts entry, used for labelling report lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartOfAccountsEntry {
    pub account_number: AccountNumber,
    pub name: String,
    pub account_type: AccountType,
    pub sub_type: String,
    pub description: String,
}

impl ChartOfAccountsEntry {
    pub fn new(
        account_number: AccountNumber,
        name: impl Into<String>,
        account_type: AccountType,
        sub_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            account_number,
            name: name.into(),
            account_type,
            sub_type: sub_type.into(),
            description: description.into(),
        }
    }
}

/// Debit and credit totals of a single journal entry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntryTotals {
    pub total_debit: BigDecimal,
    pub total_credit: BigDecimal,
}

impl EntryTotals {
    /// Absolute difference between debits and credits
    pub fn delta(&self) -> BigDecimal {
        (&self.total_debit - &self.total_credit).abs()
    }

    /// Check if debits equal credits within the tolerance
    pub fn is_balanced(&self, tolerance: &BigDecimal) -> bool {
        self.delta() <= *tolerance
    }
}

/// Errors and findings raised by the verifier
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VerifierError {
    #[error("Unbalanced journal entry {entry_id}: debits = {total_debit}, credits = {total_credit}, delta = {delta}")]
    UnbalancedEntry {
        entry_id: String,
        total_debit: BigDecimal,
        total_credit: BigDecimal,
        delta: BigDecimal,
    },
    #[error("Journal entry {entry_id} touches restricted control account {account_number}")]
    RestrictedAccount {
        entry_id: String,
        account_number: AccountNumber,
    },
    #[error("Trial balance is off by {difference}")]
    TrialBalanceMismatch { difference: BigDecimal },
    #[error("Net income {actual} differs from target {target} by {deviation}")]
    NetIncomeDeviation {
        actual: BigDecimal,
        target: BigDecimal,
        deviation: BigDecimal,
    },
    #[error("Invalid invoice: {0}")]
    InvalidInvoice(String),
    #[error("Invalid journal line: {0}")]
    InvalidJournalLine(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for verifier operations
pub type VerifierResult<T> = Result<T, VerifierError>;
