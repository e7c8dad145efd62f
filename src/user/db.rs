//! Code for creating the user table and reading and updating user accounts.

use std::fmt::Display;

use email_address::EmailAddress;
use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{Error, PasswordHash};

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A registered account.
///
/// Serializing a user omits the password hash, so a user can be returned
/// directly as a profile response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserID,
    /// The email address the user registered with. Unique across accounts.
    pub email: EmailAddress,
    /// The display name chosen at registration.
    pub username: String,
    /// The user's password hash.
    #[serde(skip_serializing)]
    pub password_hash: PasswordHash,
    /// When the account was created, as recorded by the database.
    pub created_at: String,
}

/// Create the user table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                username TEXT NOT NULL,
                password TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
                )",
        (),
    )?;

    Ok(())
}

/// Create and insert a new user into the database.
///
/// # Errors
///
/// This function will return an error if:
/// - `email` is already registered ([Error::DuplicateEmail]).
/// - an SQL related error occurred ([Error::SqlError]).
pub fn create_user(
    email: &EmailAddress,
    username: &str,
    password_hash: PasswordHash,
    connection: &Connection,
) -> Result<User, Error> {
    connection.execute(
        "INSERT INTO user (email, username, password) VALUES (?1, ?2, ?3)",
        (email.as_str(), username, password_hash.as_ref()),
    )?;

    let id = UserID::new(connection.last_insert_rowid());

    get_user_by_id(id, connection)
}

/// Get the user from the database with an ID equal to `user_id`.
///
/// # Errors
///
/// This function will return an error if:
/// - `user_id` does not belong to a registered user.
/// - there was an error trying to access the database.
pub fn get_user_by_id(user_id: UserID, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare("SELECT id, email, username, password, created_at FROM user WHERE id = :id")?
        .query_row(&[(":id", &user_id.as_i64())], map_row)
        .map_err(|error| error.into())
}

/// Get the user registered with `email`.
///
/// The email is taken as a plain string so that a lookup for an address that
/// could never be registered simply reports no match.
///
/// # Errors
///
/// This function will return an error if:
/// - `email` does not belong to a registered user.
/// - there was an error trying to access the database.
pub fn get_user_by_email(email: &str, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare("SELECT id, email, username, password, created_at FROM user WHERE email = :email")?
        .query_row(&[(":email", &email)], map_row)
        .map_err(|error| error.into())
}

/// Overwrite the display name of the user with ID `user_id`.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn update_username(
    user_id: UserID,
    username: &str,
    connection: &Connection,
) -> Result<(), Error> {
    connection.execute(
        "UPDATE user SET username = ?1 WHERE id = ?2",
        (username, user_id.as_i64()),
    )?;

    Ok(())
}

/// Overwrite the password hash of the user with ID `user_id`.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn update_password(
    user_id: UserID,
    password_hash: &PasswordHash,
    connection: &Connection,
) -> Result<(), Error> {
    connection.execute(
        "UPDATE user SET password = ?1 WHERE id = ?2",
        (password_hash.as_ref(), user_id.as_i64()),
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<User, rusqlite::Error> {
    let id = UserID::new(row.get(0)?);
    let email = EmailAddress::new_unchecked(row.get::<_, String>(1)?);
    let username = row.get(2)?;
    let password_hash = PasswordHash::new_unchecked(&row.get::<_, String>(3)?);
    let created_at = row.get(4)?;

    Ok(User {
        id,
        email,
        username,
        password_hash,
        created_at,
    })
}

#[cfg(test)]
mod user_tests {
    use email_address::EmailAddress;
    use rusqlite::Connection;

    use crate::{
        PasswordHash,
        user::{UserID, create_user, get_user_by_email, get_user_by_id, update_password, update_username},
    };

    use super::{Error, create_user_table};

    fn get_db_connection() -> Connection {
        let conn =
            Connection::open_in_memory().expect("Could not create in-memory SQLite database");
        create_user_table(&conn).expect("Could not create user table");

        conn
    }

    fn test_email() -> EmailAddress {
        EmailAddress::new_unchecked("test@test.com")
    }

    #[test]
    fn insert_user_succeeds() {
        let db_connection = get_db_connection();
        let password_hash = PasswordHash::new_unchecked("hunter2");

        let inserted_user =
            create_user(&test_email(), "testuser", password_hash.clone(), &db_connection).unwrap();

        assert!(inserted_user.id.as_i64() > 0);
        assert_eq!(inserted_user.email, test_email());
        assert_eq!(inserted_user.username, "testuser");
        assert_eq!(inserted_user.password_hash, password_hash);
        assert!(!inserted_user.created_at.is_empty());
    }

    #[test]
    fn insert_user_fails_with_duplicate_email() {
        let db_connection = get_db_connection();

        create_user(
            &test_email(),
            "first",
            PasswordHash::new_unchecked("hunter2"),
            &db_connection,
        )
        .unwrap();

        let result = create_user(
            &test_email(),
            "second",
            PasswordHash::new_unchecked("hunter3"),
            &db_connection,
        );

        assert_eq!(result, Err(Error::DuplicateEmail));
    }

    #[test]
    fn get_user_fails_with_non_existent_id() {
        let db_connection = get_db_connection();

        let id = UserID::new(42);

        assert_eq!(get_user_by_id(id, &db_connection), Err(Error::NotFound));
    }

    #[test]
    fn get_user_succeeds_with_existing_id() {
        let db_connection = get_db_connection();
        let test_user = create_user(
            &test_email(),
            "testuser",
            PasswordHash::new_unchecked("hunter2"),
            &db_connection,
        )
        .unwrap();

        let retrieved_user = get_user_by_id(test_user.id, &db_connection).unwrap();

        assert_eq!(retrieved_user, test_user);
    }

    #[test]
    fn get_user_by_email_finds_registered_user() {
        let db_connection = get_db_connection();
        let test_user = create_user(
            &test_email(),
            "testuser",
            PasswordHash::new_unchecked("hunter2"),
            &db_connection,
        )
        .unwrap();

        let retrieved_user = get_user_by_email("test@test.com", &db_connection).unwrap();

        assert_eq!(retrieved_user, test_user);
    }

    #[test]
    fn get_user_by_email_fails_with_unregistered_email() {
        let db_connection = get_db_connection();

        assert_eq!(
            get_user_by_email("nobody@test.com", &db_connection),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn update_username_overwrites_display_name() {
        let db_connection = get_db_connection();
        let test_user = create_user(
            &test_email(),
            "before",
            PasswordHash::new_unchecked("hunter2"),
            &db_connection,
        )
        .unwrap();

        update_username(test_user.id, "after", &db_connection).unwrap();

        let retrieved_user = get_user_by_id(test_user.id, &db_connection).unwrap();
        assert_eq!(retrieved_user.username, "after");
    }

    #[test]
    fn update_password_overwrites_hash() {
        let db_connection = get_db_connection();
        let test_user = create_user(
            &test_email(),
            "testuser",
            PasswordHash::new_unchecked("hunter2"),
            &db_connection,
        )
        .unwrap();
        let new_hash = PasswordHash::new_unchecked("hunter3");

        update_password(test_user.id, &new_hash, &db_connection).unwrap();

        let retrieved_user = get_user_by_id(test_user.id, &db_connection).unwrap();
        assert_eq!(retrieved_user.password_hash, new_hash);
    }

    #[test]
    fn serialized_user_omits_password_hash() {
        let db_connection = get_db_connection();
        let test_user = create_user(
            &test_email(),
            "testuser",
            PasswordHash::new_unchecked("hunter2"),
            &db_connection,
        )
        .unwrap();

        let json = serde_json::to_value(&test_user).expect("Could not serialize user");

        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
        assert_eq!(json.get("username").and_then(|v| v.as_str()), Some("testuser"));
    }
}
