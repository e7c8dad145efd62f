//! Database operations for budgets.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    budget::{BudgetId, BudgetWithCategory, UpsertOutcome},
    category::CategoryId,
    user::UserID,
};

/// Initialize the budget table.
///
/// The unique index over the owner, category, and month is what makes
/// [upsert_budget] safe: two concurrent upserts for the same key land on the
/// same row instead of creating duplicates.
pub fn create_budget_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS budget (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL,
            category_id INTEGER NOT NULL,
            amount REAL NOT NULL,
            month INTEGER NOT NULL,
            year INTEGER NOT NULL,
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE,
            FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE CASCADE,
            UNIQUE(user_id, category_id, month, year)
        );",
    )?;

    Ok(())
}

/// Set the budget for a category and month, inserting a new row or replacing
/// the amount of the existing one.
///
/// The write is a single `INSERT ... ON CONFLICT DO UPDATE`, so it cannot
/// create a second row for the same key. The returned [UpsertOutcome] reports
/// whether a budget already existed beforehand.
///
/// # Errors
///
/// This function will return an error if:
/// - `category_id` does not refer to an existing category
///   ([Error::InvalidForeignKey]).
/// - there was some other SQL error ([Error::SqlError]).
pub fn upsert_budget(
    category_id: CategoryId,
    amount: f64,
    month: i64,
    year: i64,
    user_id: UserID,
    connection: &Connection,
) -> Result<(BudgetId, UpsertOutcome), Error> {
    let existed: bool = connection
        .prepare(
            "SELECT EXISTS (
                SELECT 1 FROM budget
                WHERE user_id = ?1 AND category_id = ?2 AND month = ?3 AND year = ?4
            )",
        )?
        .query_row((user_id.as_i64(), category_id, month, year), |row| {
            row.get(0)
        })?;

    let id: BudgetId = connection
        .prepare(
            "INSERT INTO budget (user_id, category_id, amount, month, year)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(user_id, category_id, month, year)
            DO UPDATE SET amount = excluded.amount
            RETURNING id",
        )?
        .query_row(
            (user_id.as_i64(), category_id, amount, month, year),
            |row| row.get(0),
        )?;

    let outcome = if existed {
        UpsertOutcome::Updated
    } else {
        UpsertOutcome::Created
    };

    Ok((id, outcome))
}

/// Retrieve the budgets `user_id` has set for the given month, each joined to
/// its category.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn get_budgets(
    month: i64,
    year: i64,
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<BudgetWithCategory>, Error> {
    connection
        .prepare(
            "SELECT b.id, b.amount, b.month, b.year, c.id, c.name, cg.type
            FROM budget b
            INNER JOIN category c ON b.category_id = c.id
            INNER JOIN category_group cg ON c.group_id = cg.id
            WHERE b.user_id = ?1 AND b.month = ?2 AND b.year = ?3
            ORDER BY b.id",
        )?
        .query_map((user_id.as_i64(), month, year), map_row_with_category)?
        .map(|maybe_budget| maybe_budget.map_err(|error| error.into()))
        .collect()
}

/// Delete a budget belonging to `user_id`.
///
/// # Errors
///
/// Returns a [Error::DeleteMissingBudget] if the budget does not exist or is
/// not owned by `user_id`.
pub fn delete_budget(
    budget_id: BudgetId,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM budget WHERE id = ?1 AND user_id = ?2",
        (budget_id, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingBudget);
    }

    Ok(())
}

fn map_row_with_category(row: &Row) -> Result<BudgetWithCategory, rusqlite::Error> {
    Ok(BudgetWithCategory {
        id: row.get(0)?,
        amount: row.get(1)?,
        month: row.get(2)?,
        year: row.get(3)?,
        category_id: row.get(4)?,
        category_name: row.get(5)?,
        category_type: row.get(6)?,
    })
}
