//! The category creation endpoint.

use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    AppState, Error,
    auth::CurrentUser,
    category::{GroupId, create_category},
};

/// The body of a category creation request.
#[derive(Debug, Deserialize)]
pub struct CreateCategory {
    /// The display name of the category. Required.
    pub name: Option<String>,
    /// The group the category belongs to. Required, must be a seeded group.
    pub group_id: Option<GroupId>,
}

/// Handler for creating a category owned by the caller.
///
/// # Errors
///
/// This function will return an error if:
/// - the name is missing or empty, or the group ID is missing.
/// - the group ID does not refer to one of the seeded groups.
/// - there was an error trying to access the database.
pub async fn create_category_endpoint(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateCategory>,
) -> Result<(StatusCode, Json<Value>), Error> {
    let (name, group_id) = match (payload.name.as_deref(), payload.group_id) {
        (Some(name), Some(group_id)) if !name.is_empty() => (name, group_id),
        _ => {
            return Err(Error::Validation(
                "Missing category name or group.".to_owned(),
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

    let category = create_category(name, group_id, user.id, &connection)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": category.id,
            "message": "Category created successfully.",
        })),
    ))
}
