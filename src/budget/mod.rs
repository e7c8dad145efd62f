//! Budgets: per-category monthly spending targets, one row per user,
//! category, and month.

mod db;
mod delete;
mod list;
mod models;
mod upsert;

pub use db::{create_budget_table, delete_budget, get_budgets, upsert_budget};
pub use delete::delete_budget_endpoint;
pub use list::get_budgets_endpoint;
pub use models::{BudgetId, BudgetWithCategory, UpsertOutcome};
pub use upsert::upsert_budget_endpoint;
