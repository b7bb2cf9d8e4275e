//! Category operations shared by the JSON API and the web pages.

use rusqlite::Connection;

use crate::{
    Error,
    category::{
        Category, CategoryId, CategoryName,
        db::{delete_category_row, get_category, insert_category, update_category},
    },
    transaction::count_transactions_in_category,
};

/// Create a category.
pub fn create_category(name: &CategoryName, connection: &Connection) -> Result<Category, Error> {
    let category = insert_category(name, connection)?;
    tracing::info!("Created category {} '{}'", category.id, category.name);

    Ok(category)
}

/// Rename the category `category_id`.
///
/// # Errors
/// Returns [Error::EntityNotFound] if the category does not exist.
pub fn rename_category(
    category_id: CategoryId,
    name: &CategoryName,
    connection: &Connection,
) -> Result<Category, Error> {
    update_category(category_id, name, connection)
}

/// Delete the category `category_id` if no transaction uses it.
///
/// # Errors
/// Returns [Error::EntityNotFound] if the category does not exist, or [Error::CategoryInUse]
/// if transactions still refer to it.
pub fn delete_category(category_id: CategoryId, connection: &Connection) -> Result<(), Error> {
    get_category(category_id, connection)?;

    let transaction_count = count_transactions_in_category(category_id, connection)?;
    if transaction_count > 0 {
        return Err(Error::CategoryInUse {
            id: category_id,
            transaction_count,
        });
    }

    delete_category_row(category_id, connection)?;
    tracing::info!("Deleted category {category_id}");

    Ok(())
}
