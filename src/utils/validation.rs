//! Validation utilities

use bigdecimal::BigDecimal;

use crate::config::ControlAccounts;
use crate::traits::*;
use crate::types::*;

/// Validate that an amount is positive; `what` names the amount in the error
pub fn validate_positive_amount(amount: &BigDecimal, what: &str) -> VerifierResult<()> {
    if *amount <= BigDecimal::from(0) {
        Err(VerifierError::Validation(format!(
            "{} must be positive, got {}",
            what, amount
        )))
    } else {
        Ok(())
    }
}

/// Validate that a journal entry id is usable as a grouping key
pub fn validate_entry_id(entry_id: &str) -> VerifierResult<()> {
    if entry_id.trim().is_empty() {
        return Err(VerifierError::Validation(
            "Entry ID cannot be empty".to_string(),
        ));
    }

    if entry_id.len() > 50 {
        return Err(VerifierError::Validation(
            "Entry ID cannot exceed 50 characters".to_string(),
        ));
    }

    // alphanumeric, dashes, underscores
    if !entry_id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(VerifierError::Validation(
            "Entry ID can only contain alphanumeric characters, dashes, and underscores"
                .to_string(),
        ));
    }

    Ok(())
}

/// Validate that an account number is a four or five digit GL number
pub fn validate_account_number(account_number: AccountNumber) -> VerifierResult<()> {
    if !(1000..100_000).contains(&account_number) {
        return Err(VerifierError::Validation(format!(
            "Account number {} is outside 1000..99999",
            account_number
        )));
    }
    Ok(())
}

/// Validate that a line description is valid
pub fn validate_line_description(description: &str) -> VerifierResult<()> {
    if description.len() > 500 {
        return Err(VerifierError::Validation(
            "Line description cannot exceed 500 characters".to_string(),
        ));
    }

    Ok(())
}

/// Line validator for ledgers bound for import
///
/// Applies the default amount rules, checks ids and account numbers, and rejects
/// restricted control accounts on every line.
pub struct EnhancedLineValidator {
    controls: ControlAccounts,
}

impl EnhancedLineValidator {
    pub fn new(controls: ControlAccounts) -> Self {
        Self { controls }
    }
}

impl Default for EnhancedLineValidator {
    fn default() -> Self {
        Self::new(ControlAccounts::default())
    }
}

impl LineValidator for EnhancedLineValidator {
    fn validate_line(&self, line: &JournalLine) -> VerifierResult<()> {
        DefaultLineValidator.validate_line(line)?;

        validate_entry_id(&line.entry_id)?;
        validate_account_number(line.account_number)?;
        validate_line_description(&line.description)?;

        let zero = BigDecimal::from(0);
        if line.debit > zero && line.credit > zero {
            return Err(VerifierError::InvalidJournalLine(format!(
                "Entry {} account {} carries both a debit and a credit",
                line.entry_id, line.account_number
            )));
        }

        if self.controls.is_restricted(line.account_number) {
            return Err(VerifierError::RestrictedAccount {
                entry_id: line.entry_id.clone(),
                account_number: line.account_number,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_positive_amount() {
        assert!(validate_positive_amount(&BigDecimal::from(1), "Amount").is_ok());
        assert_eq!(
            validate_positive_amount(&BigDecimal::from(0), "Invoice INV-R001 amount"),
            Err(VerifierError::Validation(
                "Invoice INV-R001 amount must be positive, got 0".to_string()
            ))
        );
        assert!(validate_positive_amount(&BigDecimal::from(-5), "Amount").is_err());
    }

    #[test]
    fn test_validate_entry_id() {
        assert!(validate_entry_id("JE-0001").is_ok());
        assert!(validate_entry_id("OB_2025").is_ok());
        assert!(validate_entry_id("").is_err());
        assert!(validate_entry_id("JE 0001").is_err());
        assert!(validate_entry_id(&"J".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_account_number() {
        assert!(validate_account_number(1000).is_ok());
        assert!(validate_account_number(7010).is_ok());
        assert!(validate_account_number(999).is_err());
    }

    #[test]
    fn test_enhanced_validator() {
        let validator = EnhancedLineValidator::default();

        let ok = JournalLine::debit("JE-0001", 5300, BigDecimal::from(10), "Fuel");
        assert!(validator.validate_line(&ok).is_ok());

        let both = JournalLine::new("JE-0001", 5300, BigDecimal::from(10), BigDecimal::from(10), "Both");
        assert!(matches!(
            validator.validate_line(&both),
            Err(VerifierError::InvalidJournalLine(_))
        ));

        let restricted = JournalLine::credit("JE-0001", 2010, BigDecimal::from(10), "Retainage");
        assert!(matches!(
            validator.validate_line(&restricted),
            Err(VerifierError::RestrictedAccount { account_number: 2010, .. })
        ));
    }
}
