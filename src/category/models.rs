//! Core category domain types.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput};
use serde::{Deserialize, Serialize};

use crate::user::UserID;

/// Database identifier for a category.
pub type CategoryId = i64;

/// Database identifier for a category group.
pub type GroupId = i64;

/// Whether money in a group's categories flows in or out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GroupType {
    /// Money coming in, e.g. salary or refunds.
    Income,
    /// Money going out.
    Expense,
}

impl GroupType {
    /// The name stored in the database for this group type.
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupType::Income => "income",
            GroupType::Expense => "expense",
        }
    }
}

impl FromSql for GroupType {
    fn column_result(value: rusqlite::types::ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "income" => Ok(GroupType::Income),
            "expense" => Ok(GroupType::Expense),
            other => Err(FromSqlError::Other(
                format!("unknown group type {other}").into(),
            )),
        }
    }
}

impl ToSql for GroupType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

/// A transaction category, e.g. 'Groceries' or 'Salary'.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub group_id: GroupId,
    /// `None` for the shared categories every account can read.
    pub user_id: Option<UserID>,
}

/// A category joined to its group, as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryWithGroup {
    pub id: CategoryId,
    pub name: String,
    pub group_id: GroupId,
    pub user_id: Option<UserID>,
    pub group_name: String,
    #[serde(rename = "type")]
    pub group_type: GroupType,
}
