//! Application router configuration with protected and unprotected route
//! definitions.

use std::path::Path;

use axum::{
    Router,
    http::{HeaderValue, Method, StatusCode, header},
    middleware,
    response::{IntoResponse, Response},
    routing::{any, delete, get, post, put},
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
};

use crate::{
    AppState, Error,
    auth::{auth_guard, get_auth_profile, log_in, register},
    budget::{delete_budget_endpoint, get_budgets_endpoint, upsert_budget_endpoint},
    category::{
        create_category_endpoint, delete_category_endpoint, get_categories_endpoint,
        update_category_endpoint,
    },
    endpoints,
    report::{
        get_breakdown_endpoint, get_monthly_breakdown_endpoint, get_monthly_summary_endpoint,
        get_summary_endpoint,
    },
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_transaction_endpoint,
        get_transactions_endpoint, update_transaction_endpoint,
    },
    user::{change_password, get_profile, update_profile},
};

/// Return a router with all the app's routes, serving the single page app
/// bundle from `asset_dir`.
///
/// Passing a `cors_origin` enables cross-origin requests from that origin,
/// which a separately hosted development front end needs.
pub fn build_router(state: AppState, asset_dir: &Path, cors_origin: Option<HeaderValue>) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::COFFEE, get(get_coffee))
        .route(endpoints::REGISTER, post(register))
        .route(endpoints::LOG_IN, post(log_in))
        // Unknown API paths get a JSON 404 instead of the SPA fallback.
        .route("/api", any(api_not_found))
        .route("/api/{*path}", any(api_not_found));

    let protected_routes = Router::new()
        .route(endpoints::AUTH_PROFILE, get(get_auth_profile))
        .route(endpoints::CATEGORIES, get(get_categories_endpoint))
        .route(endpoints::CATEGORIES, post(create_category_endpoint))
        .route(endpoints::CATEGORY, put(update_category_endpoint))
        .route(endpoints::CATEGORY, delete(delete_category_endpoint))
        .route(endpoints::TRANSACTIONS, get(get_transactions_endpoint))
        .route(endpoints::TRANSACTIONS, post(create_transaction_endpoint))
        .route(endpoints::TRANSACTION, get(get_transaction_endpoint))
        .route(endpoints::TRANSACTION, put(update_transaction_endpoint))
        .route(endpoints::TRANSACTION, delete(delete_transaction_endpoint))
        .route(endpoints::BUDGETS, get(get_budgets_endpoint))
        .route(endpoints::BUDGETS, post(upsert_budget_endpoint))
        .route(endpoints::BUDGET, delete(delete_budget_endpoint))
        .route(endpoints::SUMMARY, get(get_summary_endpoint))
        .route(endpoints::MONTHLY_SUMMARY, get(get_monthly_summary_endpoint))
        .route(endpoints::BREAKDOWN, get(get_breakdown_endpoint))
        .route(
            endpoints::MONTHLY_BREAKDOWN,
            get(get_monthly_breakdown_endpoint),
        )
        .route(endpoints::USER_PROFILE, get(get_profile))
        .route(endpoints::USER_PROFILE, put(update_profile))
        .route(endpoints::USER_PASSWORD, put(change_password))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    // Requests for client-side routes fall back to index.html so deep links
    // into the SPA resolve.
    let spa = ServeDir::new(asset_dir).fallback(ServeFile::new(asset_dir.join("index.html")));

    let router = protected_routes
        .merge(unprotected_routes)
        .fallback_service(spa)
        .with_state(state);

    match cors_origin {
        Some(origin) => router.layer(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
                .allow_credentials(true),
        ),
        None => router,
    }
}

/// Attempt to get a cup of coffee from the server.
async fn get_coffee() -> Response {
    (StatusCode::IM_A_TEAPOT, "I'm a teapot").into_response()
}

async fn api_not_found() -> Response {
    Error::NotFound.into_response()
}
