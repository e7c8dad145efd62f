//! User accounts: the database model plus the profile and password routes.

mod change_password;
mod db;
mod profile;

pub use change_password::change_password;
pub use db::{
    User, UserID, create_user, create_user_table, get_user_by_email, get_user_by_id,
    update_password, update_username,
};
pub use profile::{get_profile, update_profile};
