//! Database operations for users.

use rusqlite::{Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

use crate::{
    Error,
    db::{decimal_to_sql, get_decimal},
    error::Entity,
    user::{Email, FullName, NewUser, User, UserId},
};

/// Initialize the user table.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
            id INTEGER PRIMARY KEY,
            full_name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            balance TEXT NOT NULL DEFAULT '0'
        )",
        (),
    )?;

    Ok(())
}

/// Insert a user with a zero balance and return it with its generated ID.
///
/// # Errors
/// Returns [Error::DuplicateEmail] if another user already has the email.
pub fn insert_user(new_user: &NewUser, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare(
            "INSERT INTO user (full_name, email, balance) VALUES (?1, ?2, ?3)
             RETURNING id, full_name, email, balance",
        )?
        .query_row(
            (
                new_user.full_name.as_ref(),
                new_user.email.as_ref(),
                decimal_to_sql(Decimal::ZERO),
            ),
            map_user_row,
        )
        .map_err(|error| match error {
            error if is_unique_email_violation(&error) => Error::DuplicateEmail {
                email: new_user.email.to_string(),
            },
            error => error.into(),
        })
}

/// Retrieve a single user by ID.
///
/// # Errors
/// Returns [Error::EntityNotFound] if no user has the ID.
pub fn get_user(user_id: UserId, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare("SELECT id, full_name, email, balance FROM user WHERE id = :id")?
        .query_row(&[(":id", &user_id)], map_user_row)
        .optional()?
        .ok_or(Error::EntityNotFound {
            entity: Entity::User,
            id: user_id,
        })
}

/// Retrieve all users ordered by ID.
pub fn get_all_users(connection: &Connection) -> Result<Vec<User>, Error> {
    connection
        .prepare("SELECT id, full_name, email, balance FROM user ORDER BY id ASC")?
        .query_map([], map_user_row)?
        .map(|maybe_user| maybe_user.map_err(|error| error.into()))
        .collect()
}

/// Find the ID of the user that owns `email`, if any.
pub fn get_user_id_by_email(email: &Email, connection: &Connection) -> Result<Option<UserId>, Error> {
    connection
        .prepare("SELECT id FROM user WHERE email = ?1")?
        .query_row((email.as_ref(),), |row| row.get(0))
        .optional()
        .map_err(Error::from)
}

/// Replace the name and email of a user, leaving the balance untouched.
///
/// # Errors
/// Returns [Error::EntityNotFound] if no user has the ID, or
/// [Error::DuplicateEmailOnUpdate] if another user already has the email.
pub fn update_user_details(
    user_id: UserId,
    details: &NewUser,
    connection: &Connection,
) -> Result<User, Error> {
    connection
        .prepare(
            "UPDATE user SET full_name = ?1, email = ?2 WHERE id = ?3
             RETURNING id, full_name, email, balance",
        )?
        .query_row(
            (details.full_name.as_ref(), details.email.as_ref(), user_id),
            map_user_row,
        )
        .optional()
        .map_err(|error| match error {
            error if is_unique_email_violation(&error) => Error::DuplicateEmailOnUpdate {
                id: user_id,
                email: details.email.to_string(),
            },
            error => error.into(),
        })?
        .ok_or(Error::EntityNotFound {
            entity: Entity::User,
            id: user_id,
        })
}

/// Delete a user by ID, along with the user's transactions.
///
/// # Errors
/// Returns [Error::EntityNotFound] if no user has the ID.
pub fn delete_user_row(user_id: UserId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM user WHERE id = ?1", [user_id])?;

    if rows_affected == 0 {
        return Err(Error::EntityNotFound {
            entity: Entity::User,
            id: user_id,
        });
    }

    Ok(())
}

/// Get the current balance of a user.
///
/// # Errors
/// Returns [Error::EntityNotFound] if no user has the ID.
pub fn get_user_balance(user_id: UserId, connection: &Connection) -> Result<Decimal, Error> {
    connection
        .prepare("SELECT balance FROM user WHERE id = ?1")?
        .query_row([user_id], |row| get_decimal(row, 0))
        .optional()?
        .ok_or(Error::EntityNotFound {
            entity: Entity::User,
            id: user_id,
        })
}

/// Overwrite the balance of a user.
///
/// Only balance reconciliation should call this, inside the same SQL transaction as the
/// transaction write that caused the change.
///
/// # Errors
/// Returns [Error::EntityNotFound] if no user has the ID.
pub fn set_user_balance(
    user_id: UserId,
    balance: Decimal,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE user SET balance = ?1 WHERE id = ?2",
        (decimal_to_sql(balance), user_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::EntityNotFound {
            entity: Entity::User,
            id: user_id,
        });
    }

    Ok(())
}

fn is_unique_email_violation(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(sql_error, Some(desc))
            if sql_error.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                && desc.contains("email")
    )
}

fn map_user_row(row: &Row) -> Result<User, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_full_name: String = row.get(1)?;
    let raw_email: String = row.get(2)?;
    let balance = get_decimal(row, 3)?;

    Ok(User {
        id,
        full_name: FullName::new_unchecked(&raw_full_name),
        email: Email::new_unchecked(&raw_email),
        balance,
    })
}

#[cfg(test)]
mod user_query_tests {
    use rusqlite::Connection;
    use rust_decimal::Decimal;

    use crate::{
        Error,
        error::Entity,
        user::{Email, FullName, NewUser},
    };

    use super::{
        create_user_table, delete_user_row, get_all_users, get_user, get_user_balance,
        get_user_id_by_email, insert_user, set_user_balance, update_user_details,
    };

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_user_table(&connection).expect("Could not create user table");
        connection
    }

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            full_name: FullName::new_unchecked(name),
            email: Email::new_unchecked(email),
        }
    }

    #[test]
    fn insert_user_starts_with_zero_balance() {
        let connection = get_test_db_connection();

        let user = insert_user(&new_user("Ada", "ada@example.com"), &connection)
            .expect("Could not create user");

        assert!(user.id > 0);
        assert_eq!(user.full_name.as_ref(), "Ada");
        assert_eq!(user.email.as_ref(), "ada@example.com");
        assert_eq!(user.balance, Decimal::ZERO);
    }

    #[test]
    fn insert_user_with_duplicate_email_fails() {
        let connection = get_test_db_connection();
        insert_user(&new_user("Ada", "ada@example.com"), &connection).unwrap();

        let result = insert_user(&new_user("Other Ada", "ada@example.com"), &connection);

        assert_eq!(
            result,
            Err(Error::DuplicateEmail {
                email: "ada@example.com".to_owned()
            })
        );
    }

    #[test]
    fn get_user_with_invalid_id_returns_not_found() {
        let connection = get_test_db_connection();
        let user = insert_user(&new_user("Ada", "ada@example.com"), &connection).unwrap();

        let result = get_user(user.id + 123, &connection);

        assert_eq!(
            result,
            Err(Error::EntityNotFound {
                entity: Entity::User,
                id: user.id + 123
            })
        );
    }

    #[test]
    fn get_all_users_returns_users_in_id_order() {
        let connection = get_test_db_connection();
        let first = insert_user(&new_user("Ada", "ada@example.com"), &connection).unwrap();
        let second = insert_user(&new_user("Bob", "bob@example.com"), &connection).unwrap();

        let users = get_all_users(&connection).expect("Could not get all users");

        assert_eq!(users, vec![first, second]);
    }

    #[test]
    fn get_user_id_by_email_finds_owner() {
        let connection = get_test_db_connection();
        let user = insert_user(&new_user("Ada", "ada@example.com"), &connection).unwrap();

        let found = get_user_id_by_email(&Email::new_unchecked("ada@example.com"), &connection);
        let missing = get_user_id_by_email(&Email::new_unchecked("bob@example.com"), &connection);

        assert_eq!(found, Ok(Some(user.id)));
        assert_eq!(missing, Ok(None));
    }

    #[test]
    fn update_user_details_keeps_balance() {
        let connection = get_test_db_connection();
        let user = insert_user(&new_user("Ada", "ada@example.com"), &connection).unwrap();
        set_user_balance(user.id, Decimal::new(-1050, 2), &connection).unwrap();

        let updated = update_user_details(
            user.id,
            &new_user("Ada L.", "ada.l@example.com"),
            &connection,
        )
        .expect("Could not update user");

        assert_eq!(updated.id, user.id);
        assert_eq!(updated.full_name.as_ref(), "Ada L.");
        assert_eq!(updated.email.as_ref(), "ada.l@example.com");
        assert_eq!(updated.balance, Decimal::new(-1050, 2));
    }

    #[test]
    fn update_user_details_with_invalid_id_returns_not_found() {
        let connection = get_test_db_connection();

        let result = update_user_details(999, &new_user("Ada", "ada@example.com"), &connection);

        assert_eq!(
            result,
            Err(Error::EntityNotFound {
                entity: Entity::User,
                id: 999
            })
        );
    }

    #[test]
    fn update_user_details_with_taken_email_fails() {
        let connection = get_test_db_connection();
        insert_user(&new_user("Ada", "ada@example.com"), &connection).unwrap();
        let bob = insert_user(&new_user("Bob", "bob@example.com"), &connection).unwrap();

        let result = update_user_details(bob.id, &new_user("Bob", "ada@example.com"), &connection);

        assert_eq!(
            result,
            Err(Error::DuplicateEmailOnUpdate {
                id: bob.id,
                email: "ada@example.com".to_owned()
            })
        );
    }

    #[test]
    fn delete_user_row_succeeds() {
        let connection = get_test_db_connection();
        let user = insert_user(&new_user("Ada", "ada@example.com"), &connection).unwrap();

        delete_user_row(user.id, &connection).expect("Could not delete user");

        assert!(get_user(user.id, &connection).is_err());
    }

    #[test]
    fn delete_user_row_with_invalid_id_returns_not_found() {
        let connection = get_test_db_connection();

        let result = delete_user_row(999, &connection);

        assert_eq!(
            result,
            Err(Error::EntityNotFound {
                entity: Entity::User,
                id: 999
            })
        );
    }

    #[test]
    fn set_and_get_balance() {
        let connection = get_test_db_connection();
        let user = insert_user(&new_user("Ada", "ada@example.com"), &connection).unwrap();

        set_user_balance(user.id, Decimal::new(12345, 2), &connection).unwrap();

        assert_eq!(
            get_user_balance(user.id, &connection),
            Ok(Decimal::new(12345, 2))
        );
    }
}
