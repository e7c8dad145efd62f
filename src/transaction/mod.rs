//! Transactions: the individual income and expense records that summaries,
//! breakdowns, and budgets are computed from.

mod create;
mod db;
mod delete;
mod get;
mod list;
mod models;
mod update;

pub use create::create_transaction_endpoint;
pub use db::{
    create_transaction, create_transaction_table, delete_transaction, get_transaction,
    get_transactions, update_transaction,
};
pub use delete::delete_transaction_endpoint;
pub use get::get_transaction_endpoint;
pub use list::get_transactions_endpoint;
pub use models::{DATE_FORMAT, Transaction, TransactionId, TransactionWithCategory};
pub use update::update_transaction_endpoint;
