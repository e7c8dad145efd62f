//! Database initialization for the application schema.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    Error,
    budget::create_budget_table,
    category::{create_category_group_table, create_category_table, seed_category_groups},
    transaction::create_transaction_table,
    user::create_user_table,
};

/// Create the application tables and reference data if they do not exist.
///
/// Schema statements run inside one exclusive transaction so that two
/// processes racing to initialize the same file cannot interleave them.
/// Foreign key enforcement is switched on first since SQLite will not change
/// it mid-transaction.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.execute_batch("PRAGMA foreign_keys = ON;")?;

    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_user_table(&transaction)?;
    create_category_group_table(&transaction)?;
    create_category_table(&transaction)?;
    create_transaction_table(&transaction)?;
    create_budget_table(&transaction)?;
    seed_category_groups(&transaction)?;

    transaction.commit()?;

    Ok(())
}
