//! The single transaction endpoint.

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::{
    AppState, Error,
    auth::CurrentUser,
    transaction::{Transaction, TransactionId, get_transaction},
};

/// Handler for retrieving one of the caller's transactions by ID.
///
/// Other users' transactions report not-found rather than forbidden, so the
/// endpoint does not reveal which IDs exist.
///
/// # Errors
///
/// This function will return an error if:
/// - the transaction does not exist or is not owned by the caller.
/// - there was an error trying to access the database.
pub async fn get_transaction_endpoint(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<Transaction>, Error> {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Err(Error::DatabaseLock);
        }
    };

    let transaction = get_transaction(transaction_id, user.id, &connection)?;

    Ok(Json(transaction))
}
