//! The category list endpoint.

use axum::{Extension, Json, extract::State};

use crate::{
    AppState, Error,
    auth::CurrentUser,
    category::{CategoryWithGroup, get_categories},
};

/// Handler for listing the categories visible to the caller: the shared ones
/// plus their own, each joined to its group.
///
/// # Errors
///
/// Returns an error if there was an error trying to access the database.
pub async fn get_categories_endpoint(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<CategoryWithGroup>>, Error> {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Err(Error::DatabaseLock);
        }
    };

    get_categories(user.id, &connection).map(Json)
}
