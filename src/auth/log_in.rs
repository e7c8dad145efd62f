//! The login endpoint.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{AppState, Error, auth::encode_token, user::get_user_by_email};

/// The body of a login request.
#[derive(Debug, Deserialize)]
pub struct LogIn {
    /// The email entered during sign-in. Required.
    pub email: Option<String>,
    /// The password entered during sign-in. Required.
    pub password: Option<String>,
}

/// Handler for sign-in requests.
///
/// An unknown email and a wrong password produce the same response so that
/// the endpoint does not reveal which addresses are registered.
///
/// # Errors
///
/// This function will return an error in a few situations.
/// - The email or password is missing or empty.
/// - The email does not belong to a registered user.
/// - The password is not correct.
/// - An internal error occurred while verifying or signing.
pub async fn log_in(
    State(state): State<AppState>,
    Json(payload): Json<LogIn>,
) -> Result<Json<Value>, Error> {
    let (email, password) = match (payload.email.as_deref(), payload.password.as_deref()) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => return Err(Error::Validation("Missing email or password.".to_owned())),
    };

    let user = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Err(Error::DatabaseLock);
            }
        };

        get_user_by_email(email, &connection).map_err(|error| match error {
            Error::NotFound => Error::InvalidCredentials,
            error => error,
        })?
    };

    let password_matches = user.password_hash.verify(password).map_err(|error| {
        tracing::error!("Error verifying password: {error}");
        Error::Hashing(error.to_string())
    })?;

    if !password_matches {
        return Err(Error::InvalidCredentials);
    }

    let token = encode_token(user.id, &state.jwt_keys)?;

    Ok(Json(json!({
        "id": user.id,
        "email": user.email,
        "username": user.username,
        "message": "Logged in successfully.",
        "token": token,
    })))
}
