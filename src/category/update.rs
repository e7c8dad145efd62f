//! The category update endpoint.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    AppState, Error,
    auth::CurrentUser,
    category::{CategoryId, GroupId, update_category},
};

/// The body of a category update request. Both fields overwrite the stored
/// row.
#[derive(Debug, Deserialize)]
pub struct UpdateCategory {
    /// The new display name. Required.
    pub name: Option<String>,
    /// The new group. Required.
    pub group_id: Option<GroupId>,
}

/// Handler for overwriting a category owned by the caller.
///
/// Shared categories and other users' categories report not-found rather than
/// forbidden, so the endpoint does not reveal which IDs exist.
///
/// # Errors
///
/// This function will return an error if:
/// - the name is missing or empty, or the group ID is missing.
/// - the category does not exist or is not owned by the caller.
/// - there was an error trying to access the database.
pub async fn update_category_endpoint(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(category_id): Path<CategoryId>,
    Json(payload): Json<UpdateCategory>,
) -> Result<Json<Value>, Error> {
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

    update_category(category_id, name, group_id, user.id, &connection)?;

    Ok(Json(json!({"message": "Category updated successfully."})))
}
