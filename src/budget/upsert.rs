//! The budget upsert endpoint.

use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    AppState, Error,
    auth::CurrentUser,
    budget::{UpsertOutcome, upsert_budget},
    category::CategoryId,
};

/// The body of a budget upsert request.
#[derive(Debug, Deserialize)]
pub struct UpsertBudget {
    /// The category the budget applies to. Required.
    pub category_id: Option<CategoryId>,
    /// The budgeted amount for the month. Required.
    pub amount: Option<f64>,
    /// The calendar month the budget applies to. Required.
    pub month: Option<i64>,
    /// The calendar year the budget applies to. Required.
    pub year: Option<i64>,
}

/// Handler for setting the caller's budget for a category and month.
///
/// Responds 201 when a new budget was created and 200 when an existing one
/// had its amount replaced.
///
/// # Errors
///
/// This function will return an error if:
/// - the category, amount, month, or year is missing.
/// - the category does not exist.
/// - there was an error trying to access the database.
pub async fn upsert_budget_endpoint(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<UpsertBudget>,
) -> Result<(StatusCode, Json<Value>), Error> {
    let (category_id, amount, month, year) = match (
        payload.category_id,
        payload.amount,
        payload.month,
        payload.year,
    ) {
        (Some(category_id), Some(amount), Some(month), Some(year)) => {
            (category_id, amount, month, year)
        }
        _ => {
            return Err(Error::Validation(
                "Missing category, amount, month, or year.".to_owned(),
            ));
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Err(Error::DatabaseLock);
        }
    };

    let (budget_id, outcome) = upsert_budget(category_id, amount, month, year, user.id, &connection)?;

    let (status, message) = match outcome {
        UpsertOutcome::Created => (StatusCode::CREATED, "Budget created successfully."),
        UpsertOutcome::Updated => (StatusCode::OK, "Budget updated successfully."),
    };

    Ok((status, Json(json!({"id": budget_id, "message": message}))))
}
