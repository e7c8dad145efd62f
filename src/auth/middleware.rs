//! The middleware that checks bearer tokens on protected API routes.

use axum::{
    RequestPartsExt,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use email_address::EmailAddress;

use crate::{
    AppState, Error,
    auth::decode_token,
    user::{UserID, get_user_by_id},
};

/// The authenticated caller, attached to request extensions once its token
/// checks out.
///
/// **Note**: Route handlers can use the function argument
/// `Extension(user): Extension<CurrentUser>` to receive it.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// The ID of the user the token was issued to.
    pub id: UserID,
    /// The email address on the account.
    pub email: EmailAddress,
}

/// Middleware function that checks for a valid bearer token.
///
/// The caller's identity is placed into the request and the request is then
/// executed normally if the token is valid, otherwise a 401 JSON response is
/// returned.
///
/// The token's user ID is looked up in the database on every request, so a
/// token issued to an account that has since been deleted stops working
/// immediately.
///
/// # Errors
///
/// This function will return an error if:
/// - the `Authorization` header is missing or does not carry a bearer token
///   ([Error::MissingToken]).
/// - the token fails signature or expiry verification ([Error::InvalidToken]).
/// - the user the token was issued to no longer exists ([Error::UserGone]).
pub async fn auth_guard(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, Error> {
    let (mut parts, body) = request.into_parts();

    let TypedHeader(Authorization(bearer)) = parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
        .map_err(|_| Error::MissingToken)?;

    let claims = decode_token(bearer.token(), &state.jwt_keys)?;

    let user = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Err(Error::DatabaseLock);
            }
        };

        get_user_by_id(claims.id, &connection).map_err(|error| match error {
            Error::NotFound => Error::UserGone,
            error => error,
        })?
    };

    parts.extensions.insert(CurrentUser {
        id: user.id,
        email: user.email,
    });

    let request = Request::from_parts(parts, body);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod auth_guard_tests {
    use axum::{Router, http::StatusCode, middleware, response::Html, routing::get};
    use axum_test::TestServer;
    use email_address::EmailAddress;
    use serde_json::Value;

    use crate::{
        AppState, PasswordHash,
        auth::{auth_guard, encode_token},
        test_utils::get_test_app_state,
        user::{User, create_user},
    };

    async fn test_handler() -> Html<&'static str> {
        Html("<h1>Hello, World!</h1>")
    }

    const TEST_PROTECTED_ROUTE: &str = "/protected";

    fn get_test_server() -> (TestServer, AppState) {
        let state = get_test_app_state();

        let app = Router::new()
            .route(TEST_PROTECTED_ROUTE, get(test_handler))
            .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard))
            .with_state(state.clone());

        let server = TestServer::try_new(app).expect("Could not create test server.");

        (server, state)
    }

    fn insert_test_user(state: &AppState) -> User {
        let connection = state.db_connection.lock().unwrap();

        create_user(
            &EmailAddress::new_unchecked("test@test.com"),
            "testuser",
            PasswordHash::new_unchecked("dummy hash"),
            &connection,
        )
        .expect("Could not insert test user")
    }

    #[tokio::test]
    async fn get_protected_route_with_valid_token() {
        let (server, state) = get_test_server();
        let user = insert_test_user(&state);
        let token = encode_token(user.id, &state.jwt_keys).expect("Could not encode token");

        server
            .get(TEST_PROTECTED_ROUTE)
            .authorization_bearer(token)
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn get_protected_route_with_no_header_returns_unauthorized() {
        let (server, _) = get_test_server();

        let response = server.get(TEST_PROTECTED_ROUTE).await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body = response.json::<Value>();
        assert_eq!(
            body["message"].as_str(),
            Some("Not authorized, no token provided.")
        );
    }

    #[tokio::test]
    async fn get_protected_route_with_garbage_token_returns_unauthorized() {
        let (server, _) = get_test_server();

        let response = server
            .get(TEST_PROTECTED_ROUTE)
            .authorization_bearer("FOOBAR")
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body = response.json::<Value>();
        assert_eq!(body["message"].as_str(), Some("Invalid or expired token."));
    }

    #[tokio::test]
    async fn get_protected_route_with_token_for_deleted_user_returns_unauthorized() {
        let (server, state) = get_test_server();
        let user = insert_test_user(&state);
        let token = encode_token(user.id, &state.jwt_keys).expect("Could not encode token");

        state
            .db_connection
            .lock()
            .unwrap()
            .execute("DELETE FROM user WHERE id = ?1", (user.id.as_i64(),))
            .expect("Could not delete test user");

        let response = server
            .get(TEST_PROTECTED_ROUTE)
            .authorization_bearer(token)
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body = response.json::<Value>();
        assert_eq!(body["message"].as_str(), Some("User no longer exists."));
    }
}
