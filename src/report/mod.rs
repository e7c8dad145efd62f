//! Read-only financial reports, recomputed from transactions on every
//! request.

mod breakdown;
mod db;
mod models;
mod summary;

pub use breakdown::{get_breakdown_endpoint, get_monthly_breakdown_endpoint};
pub use db::{get_breakdown, get_monthly_breakdown, get_monthly_summary, get_summary};
pub use models::{CategoryTotal, FinancialSummary, MonthYearParams, MonthlySummary};
pub use summary::{get_monthly_summary_endpoint, get_summary_endpoint};
