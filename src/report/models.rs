//! Report parameter and response types.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    category::{CategoryId, GroupType},
};

/// Income and expense totals over the caller's transactions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinancialSummary {
    pub income: f64,
    pub expense: f64,
    /// `income - expense`.
    pub balance: f64,
}

/// A [FinancialSummary] restricted to one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlySummary {
    pub month: i64,
    pub year: i64,
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

/// One category's transaction total, as returned by the breakdown endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category_id: CategoryId,
    pub category_name: String,
    pub transaction_type: GroupType,
    pub total_amount: f64,
}

/// Query parameters shared by the monthly report endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct MonthYearParams {
    /// The calendar month to report on. Required.
    pub month: Option<i64>,
    /// The calendar year to report on. Required.
    pub year: Option<i64>,
}

impl MonthYearParams {
    /// Unpack the month and year, which are both required.
    ///
    /// # Errors
    ///
    /// Returns a [Error::Validation] if either is missing.
    pub fn require(self) -> Result<(i64, i64), Error> {
        match (self.month, self.year) {
            (Some(month), Some(year)) => Ok((month, year)),
            _ => Err(Error::Validation("Missing month or year.".to_owned())),
        }
    }
}
