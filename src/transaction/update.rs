//! The transaction update endpoint.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use time::Date;

use crate::{
    AppState, Error,
    auth::CurrentUser,
    category::CategoryId,
    transaction::{DATE_FORMAT, TransactionId, update_transaction},
};

/// The body of a transaction update request. Every field overwrites the
/// stored row.
#[derive(Debug, Deserialize)]
pub struct UpdateTransaction {
    /// The new category. Required.
    pub category_id: Option<CategoryId>,
    /// The new amount, strictly positive. Required.
    pub amount: Option<f64>,
    /// The new date, as `YYYY-MM-DD`. Required.
    pub date: Option<String>,
    /// The new description. Defaults to an empty string.
    pub description: Option<String>,
}

/// Handler for overwriting one of the caller's transactions.
///
/// # Errors
///
/// This function will return an error if:
/// - the category, amount, or date is missing.
/// - the amount is zero or negative.
/// - the date is not a valid `YYYY-MM-DD` date.
/// - the category is not shared and not owned by the caller.
/// - the transaction does not exist or is not owned by the caller.
/// - there was an error trying to access the database.
pub async fn update_transaction_endpoint(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(transaction_id): Path<TransactionId>,
    Json(payload): Json<UpdateTransaction>,
) -> Result<Json<Value>, Error> {
    let (category_id, amount, date) =
        match (payload.category_id, payload.amount, payload.date.as_deref()) {
            (Some(category_id), Some(amount), Some(date)) if !date.is_empty() => {
                (category_id, amount, date)
            }
            _ => {
                return Err(Error::Validation(
                    "Missing category, amount, or date.".to_owned(),
                ));
            }
        };

    if amount <= 0.0 {
        return Err(Error::Validation(
            "Amount must be a positive number.".to_owned(),
        ));
    }

    if Date::parse(date, DATE_FORMAT).is_err() {
        return Err(Error::Validation(
            "Date must be in YYYY-MM-DD format.".to_owned(),
        ));
    }

    let description = payload.description.unwrap_or_default();

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Err(Error::DatabaseLock);
        }
    };

    update_transaction(
        transaction_id,
        category_id,
        amount,
        date,
        &description,
        user.id,
        &connection,
    )?;

    Ok(Json(json!({"message": "Transaction updated successfully."})))
}
