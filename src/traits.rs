//! Traits for account lookup, ledger projection and line validation

use bigdecimal::BigDecimal;

use crate::config::ControlAccounts;
use crate::ledger::TrialBalanceAccumulator;
use crate::types::*;

/// Read-only lookup of chart of accounts entries
///
/// Reports only need names and types, so any static table or loaded chart can
/// back the verifier by implementing this trait.
pub trait AccountDirectory {
    /// Get an account by number
    fn lookup(&self, account_number: AccountNumber) -> Option<&ChartOfAccountsEntry>;

    /// Name used in report lines, falling back to the bare number
    fn display_name(&self, account_number: AccountNumber) -> String {
        self.lookup(account_number)
            .map(|entry| entry.name.clone())
            .unwrap_or_else(|| account_number.to_string())
    }
}

/// Anything that contributes balances to a trial balance
pub trait LedgerProjection {
    /// Add this record's effect to the accumulator
    fn project(&self, accumulator: &mut TrialBalanceAccumulator, controls: &ControlAccounts);
}

/// Trait for implementing custom journal line validation rules
pub trait LineValidator {
    /// Validate a single line before it joins an entry
    fn validate_line(&self, line: &JournalLine) -> VerifierResult<()>;
}

/// Default line validator: amounts are non-negative and at least one side is set
pub struct DefaultLineValidator;

impl LineValidator for DefaultLineValidator {
    fn validate_line(&self, line: &JournalLine) -> VerifierResult<()> {
        let zero = BigDecimal::from(0);

        if line.debit < zero || line.credit < zero {
            return Err(VerifierError::InvalidJournalLine(format!(
                "Entry {} account {} has a negative amount",
                line.entry_id, line.account_number
            )));
        }

        if line.debit == zero && line.credit == zero {
            return Err(VerifierError::InvalidJournalLine(format!(
                "Entry {} account {} has neither a debit nor a credit",
                line.entry_id, line.account_number
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_line_validator() {
        let validator = DefaultLineValidator;

        let line = JournalLine::debit("JE-0001", 1000, BigDecimal::from(10), "Cash");
        assert!(validator.validate_line(&line).is_ok());

        let empty = JournalLine::debit("JE-0001", 1000, BigDecimal::from(0), "Nothing");
        assert!(validator.validate_line(&empty).is_err());

        let negative = JournalLine::credit("JE-0001", 1000, BigDecimal::from(-5), "Negative");
        assert!(matches!(
            validator.validate_line(&negative),
            Err(VerifierError::InvalidJournalLine(_))
        ));
    }
}
