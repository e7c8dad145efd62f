//! Reading and updating the caller's profile.

use axum::{Extension, Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    AppState, Error,
    auth::CurrentUser,
    user::{User, get_user_by_id, update_username},
};

/// Handler for reading the caller's profile.
///
/// # Errors
///
/// This function will return an error if:
/// - the caller's account row no longer exists.
/// - there was an error trying to access the database.
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<User>, Error> {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Err(Error::DatabaseLock);
        }
    };

    get_user_by_id(user.id, &connection)
        .map(Json)
        .map_err(|error| match error {
            Error::NotFound => Error::UserNotFound,
            error => error,
        })
}

/// The body of a profile update request.
#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    /// The new display name. Required.
    pub username: Option<String>,
}

/// Handler for overwriting the caller's display name.
///
/// # Errors
///
/// This function will return an error if:
/// - `username` is missing or empty.
/// - there was an error trying to access the database.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<UpdateProfile>,
) -> Result<Json<Value>, Error> {
    let username = match payload.username.as_deref() {
        Some(username) if !username.is_empty() => username,
        _ => return Err(Error::Validation("Missing username.".to_owned())),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Err(Error::DatabaseLock);
        }
    };

    update_username(user.id, username, &connection)?;

    Ok(Json(json!({"message": "Profile updated successfully."})))
}
