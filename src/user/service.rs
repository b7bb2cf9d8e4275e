//! User operations shared by the JSON API and the web pages.

use rusqlite::Connection;

use crate::{
    Error,
    user::{
        NewUser, User, UserId,
        db::{delete_user_row, get_user, get_user_id_by_email, insert_user, update_user_details},
    },
};

/// Create a user with a zero balance.
///
/// # Errors
/// Returns [Error::DuplicateEmail] if the email already belongs to a user.
pub fn create_user(new_user: &NewUser, connection: &Connection) -> Result<User, Error> {
    if get_user_id_by_email(&new_user.email, connection)?.is_some() {
        return Err(Error::DuplicateEmail {
            email: new_user.email.to_string(),
        });
    }

    let user = insert_user(new_user, connection)?;
    tracing::info!("Created user {} <{}>", user.id, user.email);

    Ok(user)
}

/// Replace the name and email of the user `user_id`.
///
/// The balance is never changed here.
///
/// # Errors
/// Returns [Error::EntityNotFound] if the user does not exist, or
/// [Error::DuplicateEmailOnUpdate] if the email belongs to another user.
pub fn update_user(user_id: UserId, details: &NewUser, connection: &Connection) -> Result<User, Error> {
    get_user(user_id, connection)?;

    match get_user_id_by_email(&details.email, connection)? {
        Some(owner_id) if owner_id != user_id => {
            return Err(Error::DuplicateEmailOnUpdate {
                id: user_id,
                email: details.email.to_string(),
            });
        }
        _ => {}
    }

    update_user_details(user_id, details, connection)
}

/// Delete the user `user_id` together with the user's transactions.
///
/// # Errors
/// Returns [Error::EntityNotFound] if the user does not exist.
pub fn delete_user(user_id: UserId, connection: &Connection) -> Result<(), Error> {
    delete_user_row(user_id, connection)?;
    tracing::info!("Deleted user {user_id}");

    Ok(())
}
