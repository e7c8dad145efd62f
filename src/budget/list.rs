//! The budget list endpoint.

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{
    AppState, Error,
    auth::CurrentUser,
    budget::{BudgetWithCategory, get_budgets},
};

/// Query parameters accepted by the budget list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct BudgetListParams {
    /// The calendar month to list budgets for. Required.
    pub month: Option<i64>,
    /// The calendar year to list budgets for. Required.
    pub year: Option<i64>,
}

/// Handler for listing the caller's budgets for one month, each joined to its
/// category.
///
/// # Errors
///
/// This function will return an error if:
/// - the month or year parameter is missing.
/// - there was an error trying to access the database.
pub async fn get_budgets_endpoint(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<BudgetListParams>,
) -> Result<Json<Vec<BudgetWithCategory>>, Error> {
    let (month, year) = match (params.month, params.year) {
        (Some(month), Some(year)) => (month, year),
        _ => return Err(Error::Validation("Missing month or year.".to_owned())),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Err(Error::DatabaseLock);
        }
    };

    let budgets = get_budgets(month, year, user.id, &connection)?;

    Ok(Json(budgets))
}
