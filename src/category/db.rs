//! Database operations for categories and their groups.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{Category, CategoryId, CategoryWithGroup, GroupId},
    user::UserID,
};

/// Initialize the category group table.
pub fn create_category_group_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category_group (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            type TEXT NOT NULL CHECK (type IN ('income', 'expense'))
        );",
    )?;

    Ok(())
}

/// Insert the two built-in groups if they are not already present.
///
/// Clients address these groups by the fixed IDs 1 (income) and 2 (expenses),
/// so they are reference data rather than user data and there is no API for
/// changing them.
pub fn seed_category_groups(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "INSERT OR IGNORE INTO category_group (id, name, type) VALUES
            (1, 'Income', 'income'),
            (2, 'Expenses', 'expense')",
        (),
    )?;

    Ok(())
}

/// Initialize the category table and indexes.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            group_id INTEGER NOT NULL,
            user_id INTEGER,
            FOREIGN KEY(group_id) REFERENCES category_group(id),
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_category_user_id ON category(user_id);",
    )?;

    Ok(())
}

/// Create a category owned by `user_id` and return it with its generated ID.
///
/// # Errors
///
/// This function will return an error if:
/// - `group_id` does not refer to one of the seeded groups
///   ([Error::InvalidForeignKey]).
/// - there was some other SQL error ([Error::SqlError]).
pub fn create_category(
    name: &str,
    group_id: GroupId,
    user_id: UserID,
    connection: &Connection,
) -> Result<Category, Error> {
    connection.execute(
        "INSERT INTO category (name, group_id, user_id) VALUES (?1, ?2, ?3)",
        (name, group_id, user_id.as_i64()),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Category {
        id,
        name: name.to_owned(),
        group_id,
        user_id: Some(user_id),
    })
}

/// Retrieve the categories visible to `user_id`: the shared ones plus their
/// own, each joined to its group.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn get_categories(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<CategoryWithGroup>, Error> {
    connection
        .prepare(
            "SELECT c.id, c.name, c.group_id, c.user_id, cg.name, cg.type
            FROM category c
            INNER JOIN category_group cg ON c.group_id = cg.id
            WHERE c.user_id IS NULL OR c.user_id = :user_id
            ORDER BY c.id",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], map_row_with_group)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Check that `category_id` refers to a category the user may record
/// transactions against, i.e. a shared category or one they own.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn category_is_usable(
    category_id: CategoryId,
    user_id: UserID,
    connection: &Connection,
) -> Result<bool, Error> {
    connection
        .prepare(
            "SELECT EXISTS (
                SELECT 1 FROM category
                WHERE id = ?1 AND (user_id IS NULL OR user_id = ?2)
            )",
        )?
        .query_row((category_id, user_id.as_i64()), |row| row.get(0))
        .map_err(|error| error.into())
}

/// Overwrite the name and group of a category owned by `user_id`.
///
/// Shared categories have no owner and cannot be updated through this
/// function.
///
/// # Errors
///
/// Returns a [Error::UpdateMissingCategory] if the category does not exist or
/// is not owned by `user_id`.
pub fn update_category(
    category_id: CategoryId,
    name: &str,
    group_id: GroupId,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE category SET name = ?1, group_id = ?2 WHERE id = ?3 AND user_id = ?4",
        (name, group_id, category_id, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingCategory);
    }

    Ok(())
}

/// Delete a category owned by `user_id`.
///
/// # Errors
///
/// Returns a [Error::DeleteMissingCategory] if the category does not exist or
/// is not owned by `user_id`.
pub fn delete_category(
    category_id: CategoryId,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM category WHERE id = ?1 AND user_id = ?2",
        (category_id, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingCategory);
    }

    Ok(())
}

fn map_row_with_group(row: &Row) -> Result<CategoryWithGroup, rusqlite::Error> {
    Ok(CategoryWithGroup {
        id: row.get(0)?,
        name: row.get(1)?,
        group_id: row.get(2)?,
        user_id: row.get::<_, Option<i64>>(3)?.map(UserID::new),
        group_name: row.get(4)?,
        group_type: row.get(5)?,
    })
}
