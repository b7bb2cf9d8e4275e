//! Database operations for categories.

use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    Error,
    category::{Category, CategoryId, CategoryName},
    error::Entity,
};

/// Initialize the category table.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

/// Create a new category in the database.
pub fn insert_category(name: &CategoryName, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare("INSERT INTO category (name) VALUES (?1) RETURNING id, name")?
        .query_row((name.as_ref(),), map_category_row)
        .map_err(Error::from)
}

/// Retrieve a category by its `category_id`.
///
/// # Errors
/// Returns [Error::EntityNotFound] if no category has the ID.
pub fn get_category(category_id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, name FROM category WHERE id = :id")?
        .query_row(&[(":id", &category_id)], map_category_row)
        .optional()?
        .ok_or(Error::EntityNotFound {
            entity: Entity::Category,
            id: category_id,
        })
}

/// Retrieve all categories ordered by name.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, name FROM category ORDER BY name ASC, id ASC")?
        .query_map([], map_category_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Rename the category `category_id`.
///
/// # Errors
/// Returns [Error::EntityNotFound] if no category has the ID.
pub fn update_category(
    category_id: CategoryId,
    name: &CategoryName,
    connection: &Connection,
) -> Result<Category, Error> {
    connection
        .prepare("UPDATE category SET name = ?1 WHERE id = ?2 RETURNING id, name")?
        .query_row((name.as_ref(), category_id), map_category_row)
        .optional()?
        .ok_or(Error::EntityNotFound {
            entity: Entity::Category,
            id: category_id,
        })
}

/// Delete the category `category_id`.
///
/// # Errors
/// Returns [Error::EntityNotFound] if no category has the ID, or [Error::CategoryInUse] if
/// the foreign key from a transaction blocks the deletion.
pub fn delete_category_row(category_id: CategoryId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection
        .execute("DELETE FROM category WHERE id = ?1", [category_id])
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(sql_error, _)
                if sql_error.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
            {
                Error::CategoryInUse {
                    id: category_id,
                    transaction_count: 0,
                }
            }
            error => error.into(),
        })?;

    if rows_affected == 0 {
        return Err(Error::EntityNotFound {
            entity: Entity::Category,
            id: category_id,
        });
    }

    Ok(())
}

fn map_category_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;

    Ok(Category {
        id,
        name: CategoryName::new_unchecked(&raw_name),
    })
}
