//! Spending categories that transactions are filed under.

mod api;
mod create;
mod db;
mod delete;
mod domain;
mod dto;
mod edit;
mod form;
mod list;
mod service;

pub use api::{
    create_category_api, delete_category_api, get_category_api, list_categories_api,
    update_category_api,
};
pub use create::{create_category_endpoint, get_new_category_page};
pub use db::{create_category_table, get_all_categories, get_category};
pub use delete::delete_category_endpoint;
pub use domain::{Category, CategoryFormData, CategoryId, CategoryName};
pub use dto::CategoryDto;
pub use edit::{get_edit_category_page, update_category_endpoint};
pub use list::get_categories_page;
pub use service::{create_category, delete_category, rename_category};
