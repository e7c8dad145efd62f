//! The registration endpoint.

use axum::{Json, extract::State, http::StatusCode};
use email_address::EmailAddress;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{AppState, Error, HASH_COST, PasswordHash, auth::encode_token, user::create_user};

/// The body of a registration request.
#[derive(Debug, Deserialize)]
pub struct Register {
    /// The email address to register with. Required and must be unique.
    pub email: Option<String>,
    /// The display name for the new account. Required.
    pub username: Option<String>,
    /// The plain text password to hash and store. Required.
    pub password: Option<String>,
}

/// Handler for creating a new account.
///
/// On success the account is created and a signed token is returned along
/// with the new user's details, so the client is logged in immediately.
///
/// # Errors
///
/// This function will return an error in a few situations.
/// - Any of email, username, or password is missing or empty.
/// - The email does not parse as an email address.
/// - The email is already registered.
/// - An internal error occurred while hashing, inserting, or signing.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Register>,
) -> Result<(StatusCode, Json<Value>), Error> {
    let (email, username, password) = match (
        payload.email.as_deref(),
        payload.username.as_deref(),
        payload.password.as_deref(),
    ) {
        (Some(email), Some(username), Some(password))
            if !email.is_empty() && !username.is_empty() && !password.is_empty() =>
        {
            (email, username, password)
        }
        _ => {
            return Err(Error::Validation(
                "Missing email, username, or password.".to_owned(),
            ));
        }
    };

    let email: EmailAddress = email
        .parse()
        .map_err(|_| Error::Validation("Invalid email address.".to_owned()))?;

    let password_hash = PasswordHash::from_raw_password(password, HASH_COST)?;

    let user = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Err(Error::DatabaseLock);
            }
        };

        create_user(&email, username, password_hash, &connection)?
    };

    let token = encode_token(user.id, &state.jwt_keys)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": user.id,
            "email": user.email,
            "username": user.username,
            "message": "User registered successfully.",
            "token": token,
        })),
    ))
}
