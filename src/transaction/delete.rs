//! The transaction deletion endpoint.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use crate::{
    AppState, Error,
    auth::CurrentUser,
    transaction::{TransactionId, delete_transaction},
};

/// Handler for deleting one of the caller's transactions.
///
/// # Errors
///
/// This function will return an error if:
/// - the transaction does not exist or is not owned by the caller.
/// - there was an error trying to access the database.
pub async fn delete_transaction_endpoint(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<Value>, Error> {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Err(Error::DatabaseLock);
        }
    };

    delete_transaction(transaction_id, user.id, &connection)?;

    Ok(Json(json!({"message": "Transaction deleted successfully."})))
}
