//! The category deletion endpoint.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use crate::{
    AppState, Error,
    auth::CurrentUser,
    category::{CategoryId, delete_category},
};

/// Handler for deleting a category owned by the caller.
///
/// # Errors
///
/// This function will return an error if:
/// - the category does not exist or is not owned by the caller.
/// - there was an error trying to access the database.
pub async fn delete_category_endpoint(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(category_id): Path<CategoryId>,
) -> Result<Json<Value>, Error> {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Err(Error::DatabaseLock);
        }
    };

    delete_category(category_id, user.id, &connection)?;

    Ok(Json(json!({"message": "Category deleted successfully."})))
}

#[cfg(test)]
mod delete_category_endpoint_tests {
    use serde_json::Value;

    use crate::{
        endpoints::{self, format_endpoint},
        test_utils::{create_app_with_user_and_category, register_user},
    };

    #[tokio::test]
    async fn delete_category_succeeds_for_owner() {
        let (server, user, category_id) = create_app_with_user_and_category().await;

        server
            .delete(&format_endpoint(endpoints::CATEGORY, category_id))
            .authorization_bearer(&user.token)
            .await
            .assert_status_ok();

        let categories = server
            .get(endpoints::CATEGORIES)
            .authorization_bearer(&user.token)
            .await
            .json::<Vec<Value>>();
        assert!(categories.is_empty());
    }

    #[tokio::test]
    async fn delete_category_fails_for_non_owner() {
        let (server, user, category_id) = create_app_with_user_and_category().await;
        let other_user = register_user(&server, "other@test.com").await;

        server
            .delete(&format_endpoint(endpoints::CATEGORY, category_id))
            .authorization_bearer(&other_user.token)
            .await
            .assert_status_not_found();

        // The owner still has the category.
        let categories = server
            .get(endpoints::CATEGORIES)
            .authorization_bearer(&user.token)
            .await
            .json::<Vec<Value>>();
        assert_eq!(categories.len(), 1);
    }

    #[tokio::test]
    async fn delete_category_fails_with_unknown_id() {
        let (server, user, _) = create_app_with_user_and_category().await;

        server
            .delete(&format_endpoint(endpoints::CATEGORY, 999))
            .authorization_bearer(&user.token)
            .await
            .assert_status_not_found();
    }
}
