//! Changing the caller's password.

use axum::{Extension, Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    AppState, Error, HASH_COST, PasswordHash,
    auth::CurrentUser,
    user::{get_user_by_id, update_password},
};

/// The body of a password change request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePassword {
    /// The password currently on the account. Required.
    pub old_password: Option<String>,
    /// The replacement password. Required.
    pub new_password: Option<String>,
}

/// Handler for changing the caller's password.
///
/// The old password must match the stored hash before the new one is hashed
/// and written over it.
///
/// # Errors
///
/// This function will return an error in a few situations.
/// - Either password field is missing or empty.
/// - The old password does not match the stored hash.
/// - The caller's account row no longer exists.
/// - An internal error occurred while hashing or querying.
pub async fn change_password(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<ChangePassword>,
) -> Result<Json<Value>, Error> {
    let (old_password, new_password) = match (
        payload.old_password.as_deref(),
        payload.new_password.as_deref(),
    ) {
        (Some(old), Some(new)) if !old.is_empty() && !new.is_empty() => (old, new),
        _ => {
            return Err(Error::Validation(
                "Missing old or new password.".to_owned(),
            ));
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Err(Error::DatabaseLock);
        }
    };

    let account = get_user_by_id(user.id, &connection).map_err(|error| match error {
        Error::NotFound => Error::UserNotFound,
        error => error,
    })?;

    let old_password_matches = account.password_hash.verify(old_password).map_err(|error| {
        tracing::error!("Error verifying password: {error}");
        Error::Hashing(error.to_string())
    })?;

    if !old_password_matches {
        return Err(Error::WrongOldPassword);
    }

    let new_hash = PasswordHash::from_raw_password(new_password, HASH_COST)?;
    update_password(user.id, &new_hash, &connection)?;

    Ok(Json(json!({"message": "Password changed successfully."})))
}
