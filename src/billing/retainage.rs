//! Retainage calculation for progress billings and payment applications

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::*;
use crate::utils::validate_positive_amount;

/// Retainage percentage, validated to [0, 100]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetainageRate {
    pct: BigDecimal,
}

impl RetainageRate {
    pub fn new(pct: BigDecimal) -> VerifierResult<Self> {
        if pct < BigDecimal::from(0) || pct > BigDecimal::from(100) {
            return Err(VerifierError::Validation(format!(
                "Retainage percentage must be between 0 and 100, got {}",
                pct
            )));
        }
        Ok(Self { pct })
    }

    pub fn none() -> Self {
        Self {
            pct: BigDecimal::from(0),
        }
    }

    pub fn pct(&self) -> &BigDecimal {
        &self.pct
    }

    pub fn is_zero(&self) -> bool {
        self.pct == BigDecimal::from(0)
    }
}

/// Common contract retainage terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RetainageTerms {
    /// Opening balance and rent invoices - 0%
    None,
    /// Typical subcontract payment application - 5%
    Standard,
    /// Owner progress billing on large projects - 10%
    Elevated,
}

impl RetainageTerms {
    pub fn rate(&self) -> RetainageRate {
        let pct = match self {
            RetainageTerms::None => 0,
            RetainageTerms::Standard => 5,
            RetainageTerms::Elevated => 10,
        };
        RetainageRate {
            pct: BigDecimal::from(pct),
        }
    }
}

/// Retainage breakdown of a billed amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetainageCalculation {
    pub amount: BigDecimal,
    pub rate: RetainageRate,
    pub retainage_held: BigDecimal,
    /// Amount minus retainage, booked to AR/AP
    pub net_amount: BigDecimal,
}

impl RetainageCalculation {
    /// Calculate retainage rounded to cents
    pub fn calculate(amount: BigDecimal, rate: RetainageRate) -> VerifierResult<Self> {
        Self::calculate_rounded(amount, rate, 2)
    }

    /// Calculate retainage rounded to `digits` decimal places (0 for whole dollars)
    pub fn calculate_rounded(
        amount: BigDecimal,
        rate: RetainageRate,
        digits: i64,
    ) -> VerifierResult<Self> {
        validate_positive_amount(&amount, "Billed amount")?;

        let retainage_held = (&amount * rate.pct() / BigDecimal::from(100)).round(digits);
        let net_amount = &amount - &retainage_held;

        Ok(Self {
            amount,
            rate,
            retainage_held,
            net_amount,
        })
    }

    /// Copy the retainage fields onto an invoice
    pub fn apply_to(&self, invoice: Invoice) -> Invoice {
        invoice.with_retainage(self.rate.pct().clone(), self.retainage_held.clone())
    }
}

/// Expected retainage for an invoice, unrounded
pub fn expected_retainage(invoice: &Invoice) -> BigDecimal {
    &invoice.amount * &invoice.retainage_pct / BigDecimal::from(100)
}

/// Validate invoice amounts and the retainage invariant
///
/// `tolerance` bounds |retainage_held - amount * pct / 100|; generators that round
/// retainage to whole dollars need at least 0.50.
pub fn validate_invoice(invoice: &Invoice, tolerance: &BigDecimal) -> VerifierResult<()> {
    let zero = BigDecimal::from(0);

    if invoice.invoice_number.trim().is_empty() {
        return Err(VerifierError::InvalidInvoice(
            "Invoice number cannot be empty".to_string(),
        ));
    }

    validate_positive_amount(
        &invoice.amount,
        &format!("Invoice {} amount", invoice.invoice_number),
    )?;

    RetainageRate::new(invoice.retainage_pct.clone()).map_err(|_| {
        VerifierError::InvalidInvoice(format!(
            "Invoice {} retainage percentage {} is outside 0..=100",
            invoice.invoice_number, invoice.retainage_pct
        ))
    })?;

    if invoice.retainage_held < zero || invoice.retainage_held > invoice.amount {
        return Err(VerifierError::InvalidInvoice(format!(
            "Invoice {} retainage held {} must be between 0 and the amount {}",
            invoice.invoice_number, invoice.retainage_held, invoice.amount
        )));
    }

    let drift = (&invoice.retainage_held - expected_retainage(invoice)).abs();
    if drift > *tolerance {
        return Err(VerifierError::InvalidInvoice(format!(
            "Invoice {} retainage held {} does not match {}% of {}",
            invoice.invoice_number, invoice.retainage_held, invoice.retainage_pct, invoice.amount
        )));
    }

    Ok(())
}
