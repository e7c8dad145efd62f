//! Fintrack is a personal finance tracker served as a JSON REST API.
//!
//! Users register and log in with an email and password, record income and
//! expense transactions against categories, set monthly budgets, and read
//! aggregated reports (all-time and monthly summaries, per-category
//! breakdowns). The server also hosts the pre-built browser client as
//! static files.
//!
//! Every route below `/api` except registration and login requires an
//! `Authorization: Bearer <token>` header.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod auth;
mod budget;
mod category;
mod db;
mod endpoints;
mod logging;
mod password;
mod report;
mod routing;
#[cfg(test)]
mod test_utils;
mod transaction;
mod user;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use password::{HASH_COST, PasswordHash};
pub use routing::build_router;
pub use user::{User, UserID, get_user_by_id};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur while handling API requests.
///
/// Each variant maps to exactly one HTTP status code and JSON body of the
/// form `{"message": ...}` via [IntoResponse]. Variants that map to 500 keep
/// their details out of the response body; those are only logged.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required field was missing, empty, or malformed.
    ///
    /// The contained string is shown to the client, so it should name the
    /// offending field rather than describe internals.
    #[error("{0}")]
    Validation(String),

    /// The email address is already registered to another user.
    #[error("Email is already registered.")]
    DuplicateEmail,

    /// The category referenced by a transaction does not exist, or belongs
    /// to another user.
    ///
    /// Both cases share one message so that clients cannot probe for the
    /// existence of other users' categories.
    #[error("Invalid category.")]
    InvalidCategory,

    /// A foreign key did not refer to a valid row.
    #[error("Invalid reference to a related record.")]
    InvalidForeignKey,

    /// Login failed.
    ///
    /// Unknown email and wrong password share this variant so the response
    /// cannot be used to test whether an email is registered.
    #[error("Incorrect email or password.")]
    InvalidCredentials,

    /// A protected route was called without a bearer token.
    #[error("Not authorized, no token provided.")]
    MissingToken,

    /// The bearer token failed signature or expiry verification.
    #[error("Invalid or expired token.")]
    InvalidToken,

    /// The bearer token was valid but its user no longer exists.
    #[error("User no longer exists.")]
    UserGone,

    /// The old password supplied for a password change did not match the
    /// stored hash.
    #[error("Old password is incorrect.")]
    WrongOldPassword,

    /// The caller's user row could not be found.
    #[error("User not found.")]
    UserNotFound,

    /// A transaction lookup or mutation matched no row owned by the caller.
    ///
    /// A transaction that exists but belongs to someone else takes this
    /// path too, so the response does not reveal whether the id exists.
    #[error("Transaction not found.")]
    TransactionNotFound,

    /// A category update matched no row owned by the caller.
    ///
    /// Shared categories have no owner and are read-only, so updating one
    /// reports this error as well.
    #[error("Cannot update a shared or unknown category.")]
    UpdateMissingCategory,

    /// A category delete matched no row owned by the caller.
    #[error("Cannot delete a shared or unknown category.")]
    DeleteMissingCategory,

    /// A budget delete matched no row owned by the caller.
    #[error("Budget not found.")]
    DeleteMissingBudget,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("The requested resource could not be found.")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLock,

    /// An unexpected error occurred in the underlying hashing library.
    #[error("hashing failed: {0}")]
    Hashing(String),

    /// Signing a new token failed.
    #[error("could not create a signed token")]
    TokenCreation,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("user.email") =>
            {
                Error::DuplicateEmail
            }
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(_))
                if sql_error.extended_code == 787 =>
            {
                Error::InvalidForeignKey
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Validation(_)
            | Error::DuplicateEmail
            | Error::InvalidCategory
            | Error::InvalidForeignKey => StatusCode::BAD_REQUEST,
            Error::InvalidCredentials
            | Error::MissingToken
            | Error::InvalidToken
            | Error::UserGone
            | Error::WrongOldPassword => StatusCode::UNAUTHORIZED,
            Error::UserNotFound
            | Error::TransactionNotFound
            | Error::UpdateMissingCategory
            | Error::DeleteMissingCategory
            | Error::DeleteMissingBudget
            | Error::NotFound => StatusCode::NOT_FOUND,
            Error::SqlError(_) | Error::DatabaseLock | Error::Hashing(_) | Error::TokenCreation => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("replying with a generic 500: {}", self);
            "Internal server error.".to_owned()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use rusqlite::Connection;

    use crate::Error;

    #[test]
    fn no_rows_maps_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }

    #[test]
    fn duplicate_email_maps_unique_violation_on_email() {
        let connection = Connection::open_in_memory().unwrap();
        connection
            .execute(
                "CREATE TABLE user (id INTEGER PRIMARY KEY, email TEXT NOT NULL UNIQUE)",
                (),
            )
            .unwrap();
        connection
            .execute("INSERT INTO user (email) VALUES ('foo@bar.baz')", ())
            .unwrap();

        let error: Error = connection
            .execute("INSERT INTO user (email) VALUES ('foo@bar.baz')", ())
            .unwrap_err()
            .into();

        assert_eq!(error, Error::DuplicateEmail);
    }

    #[test]
    fn validation_errors_map_to_bad_request() {
        let response = Error::Validation("Missing month or year.".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn credential_errors_map_to_unauthorized() {
        for error in [
            Error::InvalidCredentials,
            Error::MissingToken,
            Error::InvalidToken,
            Error::WrongOldPassword,
        ] {
            let response = error.into_response();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn missing_resource_errors_map_to_not_found() {
        for error in [
            Error::TransactionNotFound,
            Error::UpdateMissingCategory,
            Error::DeleteMissingCategory,
            Error::DeleteMissingBudget,
        ] {
            let response = error.into_response();

            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn internal_errors_hide_details() {
        let response = Error::DatabaseLock.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
