//! Operator-supplied contract parameters shared across a run.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// PO reference and contract period entered by the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractParameters {
    /// Purchase order reference.
    pub po_reference: String,

    /// First day of the contract.
    pub contract_start: NaiveDate,

    /// Last day of the contract.
    pub contract_end: NaiveDate,
}

/// A date split into zero-padded form components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateComponents {
    /// Day of month, two digits.
    pub day: String,
    /// Month, two digits.
    pub month: String,
    /// Year, four digits.
    pub year: String,
}

impl DateComponents {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            day: format!("{:02}", date.day()),
            month: format!("{:02}", date.month()),
            year: format!("{:04}", date.year()),
        }
    }
}

impl ContractParameters {
    pub fn new(po_reference: impl Into<String>, contract_start: NaiveDate, contract_end: NaiveDate) -> Self {
        Self {
            po_reference: po_reference.into(),
            contract_start,
            contract_end,
        }
    }

    pub fn start(&self) -> DateComponents {
        DateComponents::from_date(self.contract_start)
    }

    pub fn end(&self) -> DateComponents {
        DateComponents::from_date(self.contract_end)
    }
}
