//! Core transaction domain types.

use serde::Serialize;
use time::{format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    category::{CategoryId, GroupType},
    user::UserID,
};

/// Database identifier for a transaction.
pub type TransactionId = i64;

/// The date format transactions are stored and exchanged in, e.g. `2024-03-15`.
pub const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The account the transaction belongs to.
    pub user_id: UserID,
    /// The category the money was recorded against.
    pub category_id: CategoryId,
    /// The amount of money spent or earned. Always positive, the category's
    /// group decides whether it counts as income or an expense.
    pub amount: f64,
    /// When the transaction happened, as `YYYY-MM-DD`.
    pub date: String,
    /// A text description of what the transaction was for.
    pub description: String,
    /// When the row was inserted.
    pub created_at: String,
}

/// A transaction joined to its category and group, as returned by the list
/// endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionWithCategory {
    pub id: TransactionId,
    pub amount: f64,
    pub date: String,
    pub description: String,
    pub created_at: String,
    pub category_id: CategoryId,
    pub category_name: String,
    pub group_name: String,
    pub transaction_type: GroupType,
}
