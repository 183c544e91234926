//! Verifier orchestrating balance checks, invoice projection and reporting

use tracing::{debug, info, warn};

use crate::config::{VerificationMode, VerifierConfig};
use crate::ledger::{
    check_entry_balances, find_restricted_lines, project_invoices, TrialBalanceAccumulator,
};
use crate::reporting::{IncomeStatementSummary, TrialBalanceReport, VerificationReport};
use crate::traits::*;
use crate::types::*;

/// Ledger balance verifier over journal lines and invoices
pub struct Verifier<D: AccountDirectory> {
    config: VerifierConfig,
    directory: D,
}

impl<D: AccountDirectory> Verifier<D> {
    /// Create a new verifier with the given configuration and account directory
    pub fn new(config: VerifierConfig, directory: D) -> Self {
        Self { config, directory }
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Run the full verification
    ///
    /// In import mode unbalanced entries and journal lines touching restricted
    /// control accounts abort with an error. Trial balance mismatch and net income
    /// deviation are always reported as warnings. An invalid configuration is
    /// rejected before any line is read.
    pub fn verify(
        &self,
        lines: &[JournalLine],
        invoices: &[Invoice],
    ) -> VerifierResult<VerificationReport> {
        let config = &self.config;
        config.validate()?;
        let import = config.mode == VerificationMode::Import;
        let mut warnings = Vec::new();

        let entry_balances = check_entry_balances(lines, &config.tolerances.entry);
        debug!(
            entries = entry_balances.entry_count(),
            lines = lines.len(),
            "checked journal entry balances"
        );
        if import {
            if let Some(err) = entry_balances.unbalanced.first() {
                return Err(err.clone());
            }
        }
        for finding in &entry_balances.unbalanced {
            warn!("{}", finding);
            warnings.push(finding.clone());
        }

        let restricted = find_restricted_lines(lines, &config.control_accounts);
        if import {
            if let Some(err) = restricted.first() {
                return Err(err.clone());
            }
        }
        for finding in restricted {
            warn!("{}", finding);
            warnings.push(finding);
        }

        let mut accumulator = TrialBalanceAccumulator::new();
        for line in lines {
            accumulator.apply(line, &config.control_accounts);
        }
        let accumulator = project_invoices(invoices, &accumulator, &config.control_accounts);
        debug!(
            invoices = invoices.len(),
            accounts = accumulator.len(),
            "projected invoices onto trial balance"
        );

        let trial_balance = TrialBalanceReport::build(
            &accumulator,
            &self.directory,
            &config.tolerances.trial_balance,
        );
        if !trial_balance.balanced {
            let finding = VerifierError::TrialBalanceMismatch {
                difference: trial_balance.difference.clone(),
            };
            warn!("{}", finding);
            warnings.push(finding);
        }

        let income_statement = IncomeStatementSummary::build(
            &accumulator,
            &config.revenue_range,
            &config.expense_range,
            config.target_net_income.as_ref(),
            &config.tolerances.net_income,
        );
        if let (Some(false), Some(target), Some(deviation)) = (
            income_statement.within_target,
            &income_statement.target_net_income,
            &income_statement.deviation,
        ) {
            let finding = VerifierError::NetIncomeDeviation {
                actual: income_statement.net_income.clone(),
                target: target.clone(),
                deviation: deviation.clone(),
            };
            warn!("{}", finding);
            warnings.push(finding);
        }

        info!(
            entries = entry_balances.entry_count(),
            invoices = invoices.len(),
            balanced = trial_balance.balanced,
            net_income = %income_statement.net_income,
            warnings = warnings.len(),
            "financial verification complete"
        );

        Ok(VerificationReport {
            entry_balances,
            trial_balance,
            income_statement,
            accumulator,
            warnings,
        })
    }
}
