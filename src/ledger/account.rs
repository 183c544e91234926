//! Chart of accounts used to label report lines

use std::collections::BTreeMap;

use crate::traits::*;
use crate::types::*;

/// In-memory chart of accounts keyed by account number
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartOfAccounts {
    accounts: BTreeMap<AccountNumber, ChartOfAccountsEntry>,
}

impl ChartOfAccounts {
    /// Create an empty chart
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a chart from entries, rejecting duplicate account numbers
    pub fn from_entries(entries: impl IntoIterator<Item = ChartOfAccountsEntry>) -> VerifierResult<Self> {
        let mut chart = Self::new();
        for entry in entries {
            chart.add_account(entry)?;
        }
        Ok(chart)
    }

    /// Add an account to the chart
    pub fn add_account(&mut self, entry: ChartOfAccountsEntry) -> VerifierResult<()> {
        if entry.name.trim().is_empty() {
            return Err(VerifierError::Validation(format!(
                "Account {} must have a name",
                entry.account_number
            )));
        }

        if self.accounts.contains_key(&entry.account_number) {
            return Err(VerifierError::Validation(format!(
                "Account with number '{}' already exists",
                entry.account_number
            )));
        }

        self.accounts.insert(entry.account_number, entry);
        Ok(())
    }

    /// List accounts of one type in ascending order
    pub fn accounts_by_type(&self, account_type: AccountType) -> Vec<&ChartOfAccountsEntry> {
        self.accounts
            .values()
            .filter(|entry| entry.account_type == account_type)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChartOfAccountsEntry> {
        self.accounts.values()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Standard chart for a construction company with property management
    pub fn standard() -> Self {
        use AccountType::*;

        let rows: &[(AccountNumber, &str, AccountType, &str)] = &[
            (1000, "Cash & Equivalents", Asset, "Current Asset"),
            (1010, "Accounts Receivable", Asset, "Current Asset"),
            (1020, "Retainage Receivable", Asset, "Current Asset"),
            (1030, "Costs in Excess of Billings", Asset, "Current Asset"),
            (1040, "Prepaid Expenses", Asset, "Current Asset"),
            (1050, "Rent Receivable", Asset, "Current Asset"),
            (1100, "Equipment & Vehicles", Asset, "Fixed Asset"),
            (1110, "Accum Dep - Equipment", Asset, "Fixed Asset"),
            (1120, "Buildings & Improvements", Asset, "Fixed Asset"),
            (1130, "Accum Dep - Buildings", Asset, "Fixed Asset"),
            (1200, "Land", Asset, "Fixed Asset"),
            (1300, "Security Deposits", Asset, "Other Asset"),
            (2000, "Accounts Payable", Liability, "Current Liability"),
            (2010, "Retainage Payable", Liability, "Current Liability"),
            (2020, "Accrued Payroll", Liability, "Current Liability"),
            (2030, "Accrued Expenses", Liability, "Current Liability"),
            (2040, "Billings in Excess", Liability, "Current Liability"),
            (2050, "Sales Tax Payable", Liability, "Current Liability"),
            (2060, "Deferred Rental Revenue", Liability, "Current Liability"),
            (2100, "Equipment Financing", Liability, "Long-Term Liability"),
            (2200, "Construction LOC", Liability, "Long-Term Liability"),
            (2210, "Mortgage Payable", Liability, "Long-Term Liability"),
            (3000, "Owners Capital", Equity, "Equity"),
            (3010, "Retained Earnings", Equity, "Equity"),
            (4000, "Contract Revenue - Airport", Revenue, "Operating Revenue"),
            (4010, "Contract Revenue - Condo", Revenue, "Operating Revenue"),
            (4100, "Rental Income", Revenue, "Operating Revenue"),
            (4200, "Change Order Revenue", Revenue, "Operating Revenue"),
            (5000, "Subcontractor Costs - Structural", Expense, "Direct Cost"),
            (5010, "Subcontractor Costs - MEP", Expense, "Direct Cost"),
            (5020, "Subcontractor Costs - Concrete", Expense, "Direct Cost"),
            (5030, "Subcontractor Costs - Steel & Metals", Expense, "Direct Cost"),
            (5100, "Materials - Concrete & Aggregate", Expense, "Direct Cost"),
            (5110, "Materials - Steel & Rebar", Expense, "Direct Cost"),
            (5200, "Direct Labor - Field", Expense, "Direct Cost"),
            (5210, "Direct Labor - Payroll Taxes", Expense, "Direct Cost"),
            (5300, "Equipment Operations", Expense, "Direct Cost"),
            (6000, "Officer & Admin Salaries", Expense, "Operating Expense"),
            (6010, "G&A Payroll Taxes & Benefits", Expense, "Operating Expense"),
            (6020, "Office Rent & Utilities", Expense, "Operating Expense"),
            (6030, "Professional Services", Expense, "Operating Expense"),
            (6040, "Insurance - General Liability", Expense, "Operating Expense"),
            (6100, "Depreciation - Equipment", Expense, "Operating Expense"),
            (6110, "Depreciation - Buildings", Expense, "Operating Expense"),
            (6200, "Property Management Fees", Expense, "Operating Expense"),
            (6210, "Property Insurance", Expense, "Operating Expense"),
            (6220, "Property Taxes", Expense, "Operating Expense"),
            (7000, "Interest Expense", Expense, "Other Expense"),
        ];

        let accounts = rows
            .iter()
            .map(|(number, name, account_type, sub_type)| {
                (
                    *number,
                    ChartOfAccountsEntry::new(*number, *name, *account_type, *sub_type, ""),
                )
            })
            .collect();

        Self { accounts }
    }
}

impl AccountDirectory for ChartOfAccounts {
    fn lookup(&self, account_number: AccountNumber) -> Option<&ChartOfAccountsEntry> {
        self.accounts.get(&account_number)
    }
}
