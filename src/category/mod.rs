//! Categories: the user-defined labels transactions are recorded against,
//! grouped into the two built-in income and expense groups.

mod create;
mod db;
mod delete;
mod list;
mod models;
mod update;

pub use create::create_category_endpoint;
pub use db::{
    category_is_usable, create_category, create_category_group_table, create_category_table,
    delete_category, get_categories, seed_category_groups, update_category,
};
pub use delete::delete_category_endpoint;
pub use list::get_categories_endpoint;
pub use models::{Category, CategoryId, CategoryWithGroup, GroupId, GroupType};
pub use update::update_category_endpoint;
