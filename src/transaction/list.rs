//! The transaction list endpoint.

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{
    AppState, Error,
    auth::CurrentUser,
    transaction::{TransactionWithCategory, get_transactions},
};

/// Query parameters accepted by the transaction list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionListParams {
    /// Cap on the number of rows returned, newest first. Absent returns all.
    pub limit: Option<i64>,
}

/// Handler for listing the caller's transactions, newest first, each joined
/// to its category and group.
///
/// # Errors
///
/// This function will return an error if there was an error trying to access
/// the database.
pub async fn get_transactions_endpoint(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<TransactionListParams>,
) -> Result<Json<Vec<TransactionWithCategory>>, Error> {
    let limit = params.limit.filter(|limit| *limit >= 0);

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Err(Error::DatabaseLock);
        }
    };

    let transactions = get_transactions(user.id, limit, &connection)?;

    Ok(Json(transactions))
}
