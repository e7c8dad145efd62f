//! Core budget domain types.

use serde::Serialize;

use crate::category::{CategoryId, GroupType};

/// Database identifier for a budget.
pub type BudgetId = i64;

/// Whether an upsert inserted a new budget or replaced an existing amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No budget existed for the category and month, a new row was inserted.
    Created,
    /// A budget already existed and its amount was overwritten.
    Updated,
}

/// A budget joined to its category, as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetWithCategory {
    pub id: BudgetId,
    pub amount: f64,
    pub month: i64,
    pub year: i64,
    pub category_id: CategoryId,
    pub category_name: String,
    pub category_type: GroupType,
}
