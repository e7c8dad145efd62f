//! The token-validity probe used by the SPA on startup.

use axum::{Extension, Json};
use serde_json::{Value, json};

use crate::auth::CurrentUser;

/// Handler that echoes the identity attached by the auth middleware.
///
/// Reaching this handler at all means the bearer token passed verification,
/// so the client can treat a 200 here as "still logged in".
pub async fn get_auth_profile(Extension(user): Extension<CurrentUser>) -> Json<Value> {
    Json(json!({
        "id": user.id,
        "email": user.email,
        "message": "Token is valid.",
    }))
}

#[cfg(test)]
mod auth_profile_tests {
    use axum::http::StatusCode;
    use serde_json::Value;

    use crate::{endpoints, test_utils::create_app_with_user};

    #[tokio::test]
    async fn probe_echoes_token_identity() {
        let (server, user) = create_app_with_user().await;

        let response = server
            .get(endpoints::AUTH_PROFILE)
            .authorization_bearer(&user.token)
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["id"].as_i64(), Some(user.id));
        assert_eq!(body["email"].as_str(), Some(user.email.as_str()));
    }

    #[tokio::test]
    async fn probe_rejects_anonymous_requests() {
        let (server, _) = create_app_with_user().await;

        server
            .get(endpoints::AUTH_PROFILE)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
