//! The per-category breakdown endpoints.

use axum::{
    Extension, Json,
    extract::{Query, State},
};

use crate::{
    AppState, Error,
    auth::CurrentUser,
    report::{CategoryTotal, MonthYearParams, get_breakdown, get_monthly_breakdown},
};

/// Handler for the caller's all-time per-category totals, largest first.
///
/// # Errors
///
/// This function will return an error if there was an error trying to access
/// the database.
pub async fn get_breakdown_endpoint(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<CategoryTotal>>, Error> {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Err(Error::DatabaseLock);
        }
    };

    let totals = get_breakdown(user.id, &connection)?;

    Ok(Json(totals))
}

/// Handler for the caller's per-category totals over one calendar month.
///
/// # Errors
///
/// This function will return an error if:
/// - the month or year parameter is missing.
/// - there was an error trying to access the database.
pub async fn get_monthly_breakdown_endpoint(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<MonthYearParams>,
) -> Result<Json<Vec<CategoryTotal>>, Error> {
    let (month, year) = params.require()?;

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Err(Error::DatabaseLock);
        }
    };

    let totals = get_monthly_breakdown(month, year, user.id, &connection)?;

    Ok(Json(totals))
}
