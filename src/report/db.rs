//! Read-only aggregation queries over transactions.
//!
//! Every report is recomputed from the source rows on each call, nothing is
//! cached or materialized.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    report::{CategoryTotal, FinancialSummary},
    user::UserID,
};

/// Sum the caller's income and expenses over all of their transactions.
///
/// Users without transactions get all-zero totals.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn get_summary(user_id: UserID, connection: &Connection) -> Result<FinancialSummary, Error> {
    connection
        .prepare(
            "SELECT
                COALESCE(SUM(CASE WHEN cg.type = 'income' THEN t.amount ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN cg.type = 'expense' THEN t.amount ELSE 0 END), 0)
            FROM \"transaction\" t
            INNER JOIN category c ON t.category_id = c.id
            INNER JOIN category_group cg ON c.group_id = cg.id
            WHERE t.user_id = :user_id",
        )?
        .query_row(&[(":user_id", &user_id.as_i64())], map_summary_row)
        .map_err(|error| error.into())
}

/// Sum the caller's income and expenses over one calendar month of
/// transaction dates.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn get_monthly_summary(
    month: i64,
    year: i64,
    user_id: UserID,
    connection: &Connection,
) -> Result<FinancialSummary, Error> {
    connection
        .prepare(
            "SELECT
                COALESCE(SUM(CASE WHEN cg.type = 'income' THEN t.amount ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN cg.type = 'expense' THEN t.amount ELSE 0 END), 0)
            FROM \"transaction\" t
            INNER JOIN category c ON t.category_id = c.id
            INNER JOIN category_group cg ON c.group_id = cg.id
            WHERE t.user_id = ?1
                AND CAST(strftime('%m', t.date) AS INTEGER) = ?2
                AND CAST(strftime('%Y', t.date) AS INTEGER) = ?3",
        )?
        .query_row((user_id.as_i64(), month, year), map_summary_row)
        .map_err(|error| error.into())
}

/// Total up the caller's transactions per category, largest total first.
///
/// Categories without any transactions are absent rather than zero-filled.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn get_breakdown(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<CategoryTotal>, Error> {
    connection
        .prepare(
            "SELECT c.id, c.name, cg.type, SUM(t.amount) AS total_amount
            FROM \"transaction\" t
            INNER JOIN category c ON t.category_id = c.id
            INNER JOIN category_group cg ON c.group_id = cg.id
            WHERE t.user_id = :user_id
            GROUP BY c.id, c.name, cg.type
            ORDER BY total_amount DESC",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], map_total_row)?
        .map(|maybe_total| maybe_total.map_err(|error| error.into()))
        .collect()
}

/// Total up one calendar month of the caller's transactions per category,
/// largest total first.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn get_monthly_breakdown(
    month: i64,
    year: i64,
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<CategoryTotal>, Error> {
    connection
        .prepare(
            "SELECT c.id, c.name, cg.type, SUM(t.amount) AS total_amount
            FROM \"transaction\" t
            INNER JOIN category c ON t.category_id = c.id
            INNER JOIN category_group cg ON c.group_id = cg.id
            WHERE t.user_id = ?1
                AND CAST(strftime('%m', t.date) AS INTEGER) = ?2
                AND CAST(strftime('%Y', t.date) AS INTEGER) = ?3
            GROUP BY c.id, c.name, cg.type
            ORDER BY total_amount DESC",
        )?
        .query_map((user_id.as_i64(), month, year), map_total_row)?
        .map(|maybe_total| maybe_total.map_err(|error| error.into()))
        .collect()
}

fn map_summary_row(row: &Row) -> Result<FinancialSummary, rusqlite::Error> {
    let income: f64 = row.get(0)?;
    let expense: f64 = row.get(1)?;

    Ok(FinancialSummary {
        income,
        expense,
        balance: income - expense,
    })
}

fn map_total_row(row: &Row) -> Result<CategoryTotal, rusqlite::Error> {
    Ok(CategoryTotal {
        category_id: row.get(0)?,
        category_name: row.get(1)?,
        transaction_type: row.get(2)?,
        total_amount: row.get(3)?,
    })
}
