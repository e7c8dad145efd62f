//! The all-time and monthly summary endpoints.

use axum::{
    Extension, Json,
    extract::{Query, State},
};

use crate::{
    AppState, Error,
    auth::CurrentUser,
    report::{FinancialSummary, MonthYearParams, MonthlySummary, get_monthly_summary, get_summary},
};

/// Handler for the caller's all-time income, expense, and balance totals.
///
/// # Errors
///
/// This function will return an error if there was an error trying to access
/// the database.
pub async fn get_summary_endpoint(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<FinancialSummary>, Error> {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Err(Error::DatabaseLock);
        }
    };

    let summary = get_summary(user.id, &connection)?;

    Ok(Json(summary))
}

/// Handler for the caller's totals over one calendar month.
///
/// # Errors
///
/// This function will return an error if:
/// - the month or year parameter is missing.
/// - there was an error trying to access the database.
pub async fn get_monthly_summary_endpoint(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<MonthYearParams>,
) -> Result<Json<MonthlySummary>, Error> {
    let (month, year) = params.require()?;

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Err(Error::DatabaseLock);
        }
    };

    let totals = get_monthly_summary(month, year, user.id, &connection)?;

    Ok(Json(MonthlySummary {
        month,
        year,
        income: totals.income,
        expense: totals.expense,
        balance: totals.balance,
    }))
}

#[cfg(test)]
mod summary_endpoint_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        endpoints,
        test_utils::{TestUser, create_app_with_user_and_category},
    };

    /// Give the user a salary of 1000 and grocery spending of 250 + 150 in
    /// March 2024, plus an 80 grocery spend in April.
    async fn seed_transactions(server: &TestServer, user: &TestUser, groceries_id: i64) {
        let salary_id = server
            .post(endpoints::CATEGORIES)
            .authorization_bearer(&user.token)
            .content_type("application/json")
            .json(&json!({"name": "Salary", "group_id": 1}))
            .await
            .json::<Value>()["id"]
            .as_i64()
            .expect("Response should contain the new category ID");

        for (category_id, amount, date) in [
            (salary_id, 1000.0, "2024-03-01"),
            (groceries_id, 250.0, "2024-03-10"),
            (groceries_id, 150.0, "2024-03-20"),
            (groceries_id, 80.0, "2024-04-05"),
        ] {
            server
                .post(endpoints::TRANSACTIONS)
                .authorization_bearer(&user.token)
                .content_type("application/json")
                .json(&json!({"category_id": category_id, "amount": amount, "date": date}))
                .await
                .assert_status_success();
        }
    }

    #[tokio::test]
    async fn get_summary_computes_balance() {
        let (server, user, groceries_id) = create_app_with_user_and_category().await;
        seed_transactions(&server, &user, groceries_id).await;

        let response = server
            .get(endpoints::SUMMARY)
            .authorization_bearer(&user.token)
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["income"].as_f64(), Some(1000.0));
        assert_eq!(body["expense"].as_f64(), Some(480.0));
        assert_eq!(body["balance"].as_f64(), Some(520.0));
    }

    #[tokio::test]
    async fn get_summary_returns_zeros_for_new_account() {
        let (server, user, _) = create_app_with_user_and_category().await;

        let body = server
            .get(endpoints::SUMMARY)
            .authorization_bearer(&user.token)
            .await
            .json::<Value>();

        assert_eq!(body["income"].as_f64(), Some(0.0));
        assert_eq!(body["expense"].as_f64(), Some(0.0));
        assert_eq!(body["balance"].as_f64(), Some(0.0));
    }

    #[tokio::test]
    async fn get_monthly_summary_restricts_to_month() {
        let (server, user, groceries_id) = create_app_with_user_and_category().await;
        seed_transactions(&server, &user, groceries_id).await;

        let response = server
            .get(&format!("{}?month=3&year=2024", endpoints::MONTHLY_SUMMARY))
            .authorization_bearer(&user.token)
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["month"].as_i64(), Some(3));
        assert_eq!(body["year"].as_i64(), Some(2024));
        assert_eq!(body["income"].as_f64(), Some(1000.0));
        assert_eq!(body["expense"].as_f64(), Some(400.0));
        assert_eq!(body["balance"].as_f64(), Some(600.0));
    }

    #[tokio::test]
    async fn get_monthly_summary_fails_with_missing_params() {
        let (server, user, _) = create_app_with_user_and_category().await;

        let response = server
            .get(&format!("{}?month=3", endpoints::MONTHLY_SUMMARY))
            .authorization_bearer(&user.token)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        assert_eq!(body["message"].as_str(), Some("Missing month or year."));
    }

    #[tokio::test]
    async fn get_summary_requires_authentication() {
        let (server, _, _) = create_app_with_user_and_category().await;

        server
            .get(endpoints::SUMMARY)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
