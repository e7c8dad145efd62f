//! Database operations for transactions.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{CategoryId, category_is_usable},
    transaction::{Transaction, TransactionId, TransactionWithCategory},
    user::UserID,
};

/// Initialize the transaction table and indexes.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL,
            category_id INTEGER NOT NULL,
            amount REAL NOT NULL,
            date TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE,
            FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_user_date ON \"transaction\"(user_id, date);",
    )?;

    Ok(())
}

/// Record a transaction for `user_id` and return it with its generated ID and
/// insertion timestamp.
///
/// # Errors
///
/// This function will return an error if:
/// - `category_id` is not a category the user may use, i.e. neither shared
///   nor their own ([Error::InvalidCategory]).
/// - there was some other SQL error ([Error::SqlError]).
pub fn create_transaction(
    category_id: CategoryId,
    amount: f64,
    date: &str,
    description: &str,
    user_id: UserID,
    connection: &Connection,
) -> Result<Transaction, Error> {
    if !category_is_usable(category_id, user_id, connection)? {
        return Err(Error::InvalidCategory);
    }

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (user_id, category_id, amount, date, description)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id, user_id, category_id, amount, date, description, created_at",
        )?
        .query_row(
            (user_id.as_i64(), category_id, amount, date, description),
            map_row,
        )?;

    Ok(transaction)
}

/// Retrieve the transactions belonging to `user_id`, newest first, each
/// joined to its category and group.
///
/// `limit` caps the number of rows returned; `None` returns them all.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn get_transactions(
    user_id: UserID,
    limit: Option<i64>,
    connection: &Connection,
) -> Result<Vec<TransactionWithCategory>, Error> {
    // SQLite treats a negative LIMIT as unbounded.
    connection
        .prepare(
            "SELECT t.id, t.amount, t.date, t.description, t.created_at, t.category_id,
                c.name, cg.name, cg.type
            FROM \"transaction\" t
            INNER JOIN category c ON t.category_id = c.id
            INNER JOIN category_group cg ON c.group_id = cg.id
            WHERE t.user_id = ?1
            ORDER BY t.date DESC, t.created_at DESC
            LIMIT ?2",
        )?
        .query_map(
            (user_id.as_i64(), limit.unwrap_or(-1)),
            map_row_with_category,
        )?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// Retrieve a single transaction belonging to `user_id`.
///
/// # Errors
///
/// Returns a [Error::TransactionNotFound] if the transaction does not exist
/// or is not owned by `user_id`.
pub fn get_transaction(
    transaction_id: TransactionId,
    user_id: UserID,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(
            "SELECT id, user_id, category_id, amount, date, description, created_at
            FROM \"transaction\"
            WHERE id = ?1 AND user_id = ?2",
        )?
        .query_row((transaction_id, user_id.as_i64()), map_row)
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::TransactionNotFound,
            error => error.into(),
        })
}

/// Overwrite every field of a transaction belonging to `user_id`.
///
/// # Errors
///
/// This function will return an error if:
/// - `category_id` is not a category the user may use
///   ([Error::InvalidCategory]).
/// - the transaction does not exist or is not owned by `user_id`
///   ([Error::TransactionNotFound]).
pub fn update_transaction(
    transaction_id: TransactionId,
    category_id: CategoryId,
    amount: f64,
    date: &str,
    description: &str,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    if !category_is_usable(category_id, user_id, connection)? {
        return Err(Error::InvalidCategory);
    }

    let rows_affected = connection.execute(
        "UPDATE \"transaction\"
        SET amount = ?1, date = ?2, description = ?3, category_id = ?4
        WHERE id = ?5 AND user_id = ?6",
        (
            amount,
            date,
            description,
            category_id,
            transaction_id,
            user_id.as_i64(),
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::TransactionNotFound);
    }

    Ok(())
}

/// Delete a transaction belonging to `user_id`.
///
/// # Errors
///
/// Returns a [Error::TransactionNotFound] if the transaction does not exist
/// or is not owned by `user_id`.
pub fn delete_transaction(
    transaction_id: TransactionId,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM \"transaction\" WHERE id = ?1 AND user_id = ?2",
        (transaction_id, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::TransactionNotFound);
    }

    Ok(())
}

fn map_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        user_id: UserID::new(row.get(1)?),
        category_id: row.get(2)?,
        amount: row.get(3)?,
        date: row.get(4)?,
        description: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn map_row_with_category(row: &Row) -> Result<TransactionWithCategory, rusqlite::Error> {
    Ok(TransactionWithCategory {
        id: row.get(0)?,
        amount: row.get(1)?,
        date: row.get(2)?,
        description: row.get(3)?,
        created_at: row.get(4)?,
        category_id: row.get(5)?,
        category_name: row.get(6)?,
        group_name: row.get(7)?,
        transaction_type: row.get(8)?,
    })
}
