//! # Ledger Verifier
//!
//! Double-entry verification for generated construction and property-management
//! accounting datasets.
//!
//! ## Features
//!
//! - **Entry balance checks**: journal lines grouped by entry id, debits must equal credits
//! - **Invoice projection**: AR, AP and retainage balances derived from invoices
//! - **Reporting**: trial balance and income statement summary against a target net income
//! - **Control accounts**: journal entries touching AR/AP or retainage are rejected
//! - **Helpers**: retainage calculation, month allocation, journal entry patterns
//!
//! ## Quick Start
//!
//! ```rust
//! use ledger_verifier::{ChartOfAccounts, Invoice, InvoiceStatus, JournalLine, Verifier, VerifierConfig};
//! use bigdecimal::BigDecimal;
//!
//! let lines = vec![
//!     JournalLine::debit("JE-0001", 1000, BigDecimal::from(500), "Rent collected"),
//!     JournalLine::credit("JE-0001", 4100, BigDecimal::from(500), "Rental income"),
//! ];
//! let invoices = vec![
//!     Invoice::payable("INV-P001", BigDecimal::from(200), Some(5000), InvoiceStatus::Paid),
//! ];
//!
//! let verifier = Verifier::new(VerifierConfig::default(), ChartOfAccounts::standard());
//! let report = verifier.verify(&lines, &invoices).unwrap();
//! assert!(report.balanced());
//! assert_eq!(report.income_statement.net_income, BigDecimal::from(300));
//! ```

pub mod billing;
pub mod config;
pub mod ledger;
pub mod reporting;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use billing::*;
pub use config::*;
pub use ledger::*;
pub use reporting::*;
pub use traits::*;
pub use types::*;

// Re-export journal entry patterns for convenience
pub use ledger::journal::patterns;
