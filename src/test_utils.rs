//! Shared helpers for endpoint tests.

use std::path::Path;

use axum_test::TestServer;
use rusqlite::Connection;
use serde_json::{Value, json};

use crate::{AppState, build_router, endpoints};

/// The password test accounts are registered with.
pub const TEST_PASSWORD: &str = "averysafepassword";

/// Create an application state backed by a fresh in-memory database.
pub fn get_test_app_state() -> AppState {
    let connection = Connection::open_in_memory().expect("Could not open in-memory database");

    AppState::new(connection, "42").expect("Could not create app state")
}

/// Create a test server running the full router over a fresh database.
pub fn new_test_server() -> (TestServer, AppState) {
    let state = get_test_app_state();
    let router = build_router(state.clone(), Path::new("static"), None);
    let server = TestServer::try_new(router).expect("Could not create test server");

    (server, state)
}

/// An account created through the register endpoint, with its bearer token.
pub struct TestUser {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub password: String,
    pub token: String,
}

/// Register an account with the given email and return its details and
/// bearer token.
pub async fn register_user(server: &TestServer, email: &str) -> TestUser {
    let response = server
        .post(endpoints::REGISTER)
        .content_type("application/json")
        .json(&json!({
            "email": email,
            "username": "testuser",
            "password": TEST_PASSWORD,
        }))
        .await;
    response.assert_status_success();
    let body = response.json::<Value>();

    TestUser {
        id: body["id"]
            .as_i64()
            .expect("Response should contain the user ID"),
        email: email.to_owned(),
        username: "testuser".to_owned(),
        password: TEST_PASSWORD.to_owned(),
        token: body["token"]
            .as_str()
            .expect("Response should contain a token")
            .to_owned(),
    }
}

/// Create a test server with one registered account.
pub async fn create_app_with_user() -> (TestServer, TestUser) {
    let (server, _) = new_test_server();
    let user = register_user(&server, "test@test.com").await;

    (server, user)
}

/// Create a test server with one registered account that owns a category
/// named Groceries in the expenses group.
pub async fn create_app_with_user_and_category() -> (TestServer, TestUser, i64) {
    let (server, user) = create_app_with_user().await;

    let response = server
        .post(endpoints::CATEGORIES)
        .authorization_bearer(&user.token)
        .content_type("application/json")
        .json(&json!({"name": "Groceries", "group_id": 2}))
        .await;
    response.assert_status_success();
    let category_id = response.json::<Value>()["id"]
        .as_i64()
        .expect("Response should contain the new category ID");

    (server, user, category_id)
}
