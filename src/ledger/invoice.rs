//! Projection of invoices onto the trial balance
//!
//! AR, AP and the retainage accounts are driven exclusively by invoices. Each invoice
//! implies a small set of postings that are never materialized as journal lines:
//!
//! - receivable: DR AR (net of retainage), DR Retainage Receivable, CR gl_account;
//!   when paid, DR Cash / CR AR
//! - payable: DR gl_account, CR AP (net of retainage), CR Retainage Payable;
//!   when paid, DR AP / CR Cash

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::config::ControlAccounts;
use crate::ledger::TrialBalanceAccumulator;
use crate::traits::LedgerProjection;
use crate::types::*;

/// A derived ledger effect of an invoice (debit-normal sign)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    pub account_number: AccountNumber,
    pub amount: BigDecimal,
    pub memo: String,
}

impl Posting {
    fn new(account_number: AccountNumber, amount: BigDecimal, memo: &str) -> Self {
        Self {
            account_number,
            amount,
            memo: memo.to_string(),
        }
    }
}

/// Postings implied by one invoice, in booking order
pub fn invoice_postings(invoice: &Invoice, controls: &ControlAccounts) -> Vec<Posting> {
    let zero = BigDecimal::from(0);
    let net = invoice.net_amount();
    let has_retainage = invoice.retainage_held > zero;
    let mut postings = Vec::with_capacity(5);

    match invoice.invoice_type {
        InvoiceType::Receivable => {
            postings.push(Posting::new(
                controls.accounts_receivable,
                net.clone(),
                "DR AR net of retainage",
            ));
            if has_retainage {
                postings.push(Posting::new(
                    controls.retainage_receivable,
                    invoice.retainage_held.clone(),
                    "DR Retainage Receivable",
                ));
            }
            if let Some(gl) = invoice.gl_account {
                postings.push(Posting::new(gl, -invoice.amount.clone(), "CR revenue"));
            }
            if invoice.status.is_paid() {
                postings.push(Posting::new(controls.cash, net.clone(), "DR Cash collected"));
                postings.push(Posting::new(
                    controls.accounts_receivable,
                    -net,
                    "CR AR collected",
                ));
            }
        }
        InvoiceType::Payable => {
            if let Some(gl) = invoice.gl_account {
                postings.push(Posting::new(gl, invoice.amount.clone(), "DR expense"));
            }
            postings.push(Posting::new(
                controls.accounts_payable,
                -net.clone(),
                "CR AP net of retainage",
            ));
            if has_retainage {
                postings.push(Posting::new(
                    controls.retainage_payable,
                    -invoice.retainage_held.clone(),
                    "CR Retainage Payable",
                ));
            }
            if invoice.status.is_paid() {
                postings.push(Posting::new(controls.accounts_payable, net.clone(), "DR AP paid"));
                postings.push(Posting::new(controls.cash, -net, "CR Cash paid"));
            }
        }
    }

    postings
}

impl LedgerProjection for Invoice {
    fn project(&self, accumulator: &mut TrialBalanceAccumulator, controls: &ControlAccounts) {
        for posting in invoice_postings(self, controls) {
            accumulator.adjust(posting.account_number, &posting.amount);
        }
        accumulator.observe_date(self.invoice_date);
    }
}

/// Add one invoice's effect to the accumulator in place
pub fn project_invoice(
    accumulator: &mut TrialBalanceAccumulator,
    invoice: &Invoice,
    controls: &ControlAccounts,
) {
    accumulator.apply(invoice, controls);
}

/// Project invoices onto a copy of `base`; the inputs are left untouched
pub fn project_invoices(
    invoices: &[Invoice],
    base: &TrialBalanceAccumulator,
    controls: &ControlAccounts,
) -> TrialBalanceAccumulator {
    let mut accumulator = base.clone();
    for invoice in invoices {
        project_invoice(&mut accumulator, invoice, controls);
    }
    accumulator
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controls() -> ControlAccounts {
        ControlAccounts::default()
    }

    #[test]
    fn test_paid_receivable_with_retainage() {
        let invoice = Invoice::receivable("INV-R001", BigDecimal::from(100), Some(4000), InvoiceStatus::Paid)
            .with_retainage(BigDecimal::from(5), BigDecimal::from(5));

        let result = project_invoices(&[invoice], &TrialBalanceAccumulator::new(), &controls());

        assert_eq!(result.balance(1010), BigDecimal::from(0));
        assert_eq!(result.balance(1020), BigDecimal::from(5));
        assert_eq!(result.balance(4000), BigDecimal::from(-100));
        assert_eq!(result.balance(1000), BigDecimal::from(95));
        assert_eq!(result.total(), BigDecimal::from(0));
    }

    #[test]
    fn test_approved_payable_with_retainage() {
        let invoice = Invoice::payable("INV-P001", BigDecimal::from(200), Some(5000), InvoiceStatus::Approved)
            .with_retainage(BigDecimal::from(5), BigDecimal::from(10));

        let result = project_invoices(&[invoice], &TrialBalanceAccumulator::new(), &controls());

        assert_eq!(result.balance(5000), BigDecimal::from(200));
        assert_eq!(result.balance(2000), BigDecimal::from(-190));
        assert_eq!(result.balance(2010), BigDecimal::from(-10));
        assert!(!result.contains(1000));
        assert_eq!(result.total(), BigDecimal::from(0));
    }

    #[test]
    fn test_zero_retainage_emits_no_retainage_posting() {
        let receivable = Invoice::receivable("INV-R002", BigDecimal::from(500), Some(4100), InvoiceStatus::Pending);
        let payable = Invoice::payable("INV-P002", BigDecimal::from(500), Some(5100), InvoiceStatus::Paid);

        let recv_postings = invoice_postings(&receivable, &controls());
        let pay_postings = invoice_postings(&payable, &controls());

        assert!(recv_postings.iter().all(|p| p.account_number != 1020));
        assert!(pay_postings.iter().all(|p| p.account_number != 2010));

        let result = project_invoices(&[receivable, payable], &TrialBalanceAccumulator::new(), &controls());
        assert!(!result.contains(1020));
        assert!(!result.contains(2010));
    }

    #[test]
    fn test_missing_gl_account_still_books_control_accounts() {
        let invoice = Invoice::receivable("INV-OB-R001", BigDecimal::from(1000), None, InvoiceStatus::Approved)
            .with_retainage(BigDecimal::from(10), BigDecimal::from(100));

        let postings = invoice_postings(&invoice, &controls());
        assert_eq!(postings.len(), 2);

        let result = project_invoices(&[invoice], &TrialBalanceAccumulator::new(), &controls());
        assert_eq!(result.balance(1010), BigDecimal::from(900));
        assert_eq!(result.balance(1020), BigDecimal::from(100));
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_missing_gl_account_on_payable_books_only_control_accounts() {
        let invoice = Invoice::payable("INV-OB-P001", BigDecimal::from(2000), None, InvoiceStatus::Approved)
            .with_retainage(BigDecimal::from(5), BigDecimal::from(100));

        let postings = invoice_postings(&invoice, &controls());
        assert_eq!(postings.len(), 2);

        let result = project_invoices(&[invoice], &TrialBalanceAccumulator::new(), &controls());
        assert_eq!(result.balance(2000), BigDecimal::from(-1900));
        assert_eq!(result.balance(2010), BigDecimal::from(-100));
        assert_eq!(result.len(), 2);
        assert_eq!(result.total(), BigDecimal::from(-2000));
    }

    #[test]
    fn test_projection_does_not_mutate_base() {
        let mut base = TrialBalanceAccumulator::new();
        base.debit(1000, &BigDecimal::from(50));
        let invoice = Invoice::payable("INV-P003", BigDecimal::from(40), Some(6030), InvoiceStatus::Paid);

        let result = project_invoices(&[invoice], &base, &controls());

        assert_eq!(base.balance(1000), BigDecimal::from(50));
        assert_eq!(result.balance(1000), BigDecimal::from(10));
        assert_eq!(result.balance(2000), BigDecimal::from(0));
    }

    #[test]
    fn test_custom_control_accounts() {
        let custom = ControlAccounts {
            cash: 1001,
            accounts_receivable: 1200,
            ..ControlAccounts::default()
        };
        let invoice = Invoice::receivable("INV-R003", BigDecimal::from(10), Some(4000), InvoiceStatus::Paid);

        let result = project_invoices(&[invoice], &TrialBalanceAccumulator::new(), &custom);
        assert_eq!(result.balance(1001), BigDecimal::from(10));
        assert_eq!(result.balance(1200), BigDecimal::from(0));
        assert!(!result.contains(1010));
    }
}
