//! The REST and web endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/users/{user_id}', use [format_endpoint].

/// The root route which redirects to the transactions page.
pub const ROOT: &str = "/";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The JSON collection of users.
pub const USERS_API: &str = "/users";
/// A single user in the JSON API.
pub const USER_API: &str = "/users/{user_id}";
/// The JSON collection of categories.
pub const CATEGORIES_API: &str = "/categories";
/// A single category in the JSON API.
pub const CATEGORY_API: &str = "/categories/{category_id}";
/// The JSON collection of transactions.
pub const TRANSACTIONS_API: &str = "/transactions";
/// A single transaction in the JSON API.
pub const TRANSACTION_API: &str = "/transactions/{transaction_id}";

/// The page listing all users. Also the target of the create user form.
pub const USERS_VIEW: &str = "/web/users";
/// The page for creating a new user.
pub const NEW_USER_VIEW: &str = "/web/users/new";
/// The page for editing an existing user.
pub const EDIT_USER_VIEW: &str = "/web/users/{user_id}/edit";
/// The route the web pages use to update or delete a user.
pub const USER_VIEW: &str = "/web/users/{user_id}";

/// The page listing all categories. Also the target of the create category form.
pub const CATEGORIES_VIEW: &str = "/web/categories";
/// The page for creating a new category.
pub const NEW_CATEGORY_VIEW: &str = "/web/categories/new";
/// The page for editing an existing category.
pub const EDIT_CATEGORY_VIEW: &str = "/web/categories/{category_id}/edit";
/// The route the web pages use to update or delete a category.
pub const CATEGORY_VIEW: &str = "/web/categories/{category_id}";

/// The page listing all transactions. Also the target of the create transaction form.
pub const TRANSACTIONS_VIEW: &str = "/web/transactions";
/// The page for creating a new transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/web/transactions/new";
/// The page for editing an existing transaction.
pub const EDIT_TRANSACTION_VIEW: &str = "/web/transactions/{transaction_id}/edit";
/// The route the web pages use to update or delete a transaction.
pub const TRANSACTION_VIEW: &str = "/web/transactions/{transaction_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter starts with a left brace and ends with the next right brace,
/// e.g. '{user_id}' in '/users/{user_id}'. Only the first parameter is replaced.
///
/// If no parameter is found in `endpoint_path`, the original `endpoint_path` is returned.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
