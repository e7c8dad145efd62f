//! The budget deletion endpoint.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use crate::{
    AppState, Error,
    auth::CurrentUser,
    budget::{BudgetId, delete_budget},
};

/// Handler for deleting one of the caller's budgets.
///
/// # Errors
///
/// This function will return an error if:
/// - the budget does not exist or is not owned by the caller.
/// - there was an error trying to access the database.
pub async fn delete_budget_endpoint(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(budget_id): Path<BudgetId>,
) -> Result<Json<Value>, Error> {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Err(Error::DatabaseLock);
        }
    };

    delete_budget(budget_id, user.id, &connection)?;

    Ok(Json(json!({"message": "Budget deleted successfully."})))
}
