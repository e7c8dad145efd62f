//! The transaction creation endpoint.

use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use time::Date;

use crate::{
    AppState, Error,
    auth::CurrentUser,
    category::CategoryId,
    transaction::{DATE_FORMAT, create_transaction},
};

/// The body of a transaction creation request.
#[derive(Debug, Deserialize)]
pub struct CreateTransaction {
    /// The category to record the transaction against. Required.
    pub category_id: Option<CategoryId>,
    /// The amount of money, strictly positive. Required.
    pub amount: Option<f64>,
    /// The day the transaction happened, as `YYYY-MM-DD`. Required.
    pub date: Option<String>,
    /// What the transaction was for. Defaults to an empty string.
    pub description: Option<String>,
}

/// Handler for recording a transaction for the caller.
///
/// # Errors
///
/// This function will return an error if:
/// - the category, amount, or date is missing.
/// - the amount is zero or negative.
/// - the date is not a valid `YYYY-MM-DD` date.
/// - the category is not shared and not owned by the caller.
/// - there was an error trying to access the database.
pub async fn create_transaction_endpoint(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateTransaction>,
) -> Result<(StatusCode, Json<Value>), Error> {
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

    let transaction =
        create_transaction(category_id, amount, date, &description, user.id, &connection)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": transaction.id,
            "message": "Transaction created successfully.",
        })),
    ))
}

#[cfg(test)]
mod create_transaction_endpoint_tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::{
        endpoints,
        test_utils::{create_app_with_user_and_category, register_user},
    };

    #[tokio::test]
    async fn create_transaction_succeeds() {
        let (server, user, category_id) = create_app_with_user_and_category().await;

        let response = server
            .post(endpoints::TRANSACTIONS)
            .authorization_bearer(&user.token)
            .content_type("application/json")
            .json(&json!({
                "category_id": category_id,
                "amount": 12.5,
                "date": "2024-03-15",
                "description": "Weekly shop",
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body = response.json::<Value>();
        assert!(body["id"].as_i64().is_some_and(|id| id > 0));

        let transactions = server
            .get(endpoints::TRANSACTIONS)
            .authorization_bearer(&user.token)
            .await
            .json::<Vec<Value>>();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0]["amount"].as_f64(), Some(12.5));
        assert_eq!(transactions[0]["date"].as_str(), Some("2024-03-15"));
        assert_eq!(transactions[0]["description"].as_str(), Some("Weekly shop"));
        assert_eq!(transactions[0]["category_name"].as_str(), Some("Groceries"));
        assert_eq!(transactions[0]["group_name"].as_str(), Some("Expenses"));
        assert_eq!(transactions[0]["transaction_type"].as_str(), Some("expense"));
    }

    #[tokio::test]
    async fn create_transaction_defaults_description_to_empty() {
        let (server, user, category_id) = create_app_with_user_and_category().await;

        server
            .post(endpoints::TRANSACTIONS)
            .authorization_bearer(&user.token)
            .content_type("application/json")
            .json(&json!({"category_id": category_id, "amount": 5.0, "date": "2024-03-15"}))
            .await
            .assert_status(StatusCode::CREATED);

        let transactions = server
            .get(endpoints::TRANSACTIONS)
            .authorization_bearer(&user.token)
            .await
            .json::<Vec<Value>>();
        assert_eq!(transactions[0]["description"].as_str(), Some(""));
    }

    #[tokio::test]
    async fn create_transaction_fails_with_missing_fields() {
        let (server, user, category_id) = create_app_with_user_and_category().await;

        let response = server
            .post(endpoints::TRANSACTIONS)
            .authorization_bearer(&user.token)
            .content_type("application/json")
            .json(&json!({"category_id": category_id, "amount": 12.5}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        assert_eq!(
            body["message"].as_str(),
            Some("Missing category, amount, or date.")
        );
    }

    #[tokio::test]
    async fn create_transaction_fails_with_non_positive_amount() {
        let (server, user, category_id) = create_app_with_user_and_category().await;

        for amount in [0.0, -12.5] {
            let response = server
                .post(endpoints::TRANSACTIONS)
                .authorization_bearer(&user.token)
                .content_type("application/json")
                .json(&json!({
                    "category_id": category_id,
                    "amount": amount,
                    "date": "2024-03-15",
                }))
                .await;

            response.assert_status(StatusCode::BAD_REQUEST);
            let body = response.json::<Value>();
            assert_eq!(
                body["message"].as_str(),
                Some("Amount must be a positive number.")
            );
        }
    }

    #[tokio::test]
    async fn create_transaction_fails_with_bad_date() {
        let (server, user, category_id) = create_app_with_user_and_category().await;

        let response = server
            .post(endpoints::TRANSACTIONS)
            .authorization_bearer(&user.token)
            .content_type("application/json")
            .json(&json!({
                "category_id": category_id,
                "amount": 12.5,
                "date": "15/03/2024",
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        assert_eq!(
            body["message"].as_str(),
            Some("Date must be in YYYY-MM-DD format.")
        );
    }

    #[tokio::test]
    async fn create_transaction_fails_with_foreign_category() {
        let (server, _, category_id) = create_app_with_user_and_category().await;
        let other_user = register_user(&server, "other@test.com").await;

        let response = server
            .post(endpoints::TRANSACTIONS)
            .authorization_bearer(&other_user.token)
            .content_type("application/json")
            .json(&json!({
                "category_id": category_id,
                "amount": 12.5,
                "date": "2024-03-15",
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        assert_eq!(body["message"].as_str(), Some("Invalid category."));
    }

    #[tokio::test]
    async fn create_transaction_requires_authentication() {
        let (server, _, category_id) = create_app_with_user_and_category().await;

        server
            .post(endpoints::TRANSACTIONS)
            .content_type("application/json")
            .json(&json!({
                "category_id": category_id,
                "amount": 12.5,
                "date": "2024-03-15",
            }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
