//! Users: the people whose spending is tracked, and their running balances.
//!
//! This module contains everything related to users:
//! - Domain types and validation
//! - Database operations
//! - The JSON API and its wire format
//! - The web pages for listing, creating, editing and deleting users

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

pub use api::{create_user_api, delete_user_api, get_user_api, list_users_api, update_user_api};
pub use create::{create_user_endpoint, get_new_user_page};
pub use db::{create_user_table, get_all_users, get_user, get_user_balance, set_user_balance};
pub use delete::delete_user_endpoint;
pub use domain::{Email, FullName, NewUser, User, UserFormData, UserId};
pub use dto::UserDto;
pub use edit::{get_edit_user_page, update_user_endpoint};
pub use list::get_users_page;
pub use service::{create_user, delete_user, update_user};
