//! Transaction operations shared by the JSON API and the web pages.
//!
//! Each write runs in one immediate SQL transaction together with the balance changes it causes,
//! so a failed write leaves every balance as it was.

use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    Error,
    category::get_category,
    db::begin_write,
    transaction::{
        NewTransaction, Transaction, TransactionId,
        balance::{apply_balance_changes, balance_changes},
        db::{delete_transaction_row, get_transaction, insert_transaction, update_transaction_row},
    },
    user::get_user,
};

/// Check that the user and category referenced by `new_transaction` exist.
fn check_references(new_transaction: &NewTransaction, connection: &Connection) -> Result<(), Error> {
    get_user(new_transaction.user_id, connection)?;
    get_category(new_transaction.category_id, connection)?;

    Ok(())
}

/// Create a transaction and add its amount to the user's balance.
///
/// A missing time defaults to now, in UTC.
///
/// # Errors
/// Returns [Error::EntityNotFound] if the user or category does not exist, or
/// [Error::BalanceOutOfRange] if the user's balance would overflow.
pub fn create_transaction(
    new_transaction: &NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let sql_transaction = begin_write(connection)?;
    check_references(new_transaction, &sql_transaction)?;

    let time = new_transaction.time.unwrap_or_else(OffsetDateTime::now_utc);
    let transaction = insert_transaction(new_transaction, time, &sql_transaction)?;
    apply_balance_changes(&balance_changes(None, Some(new_transaction))?, &sql_transaction)?;

    sql_transaction.commit()?;
    tracing::info!(
        "Created {} transaction {} of {} for user {}",
        transaction.transaction_type,
        transaction.id,
        transaction.amount,
        transaction.user_id
    );

    Ok(transaction)
}

/// Replace the transaction `transaction_id` and move the balances to match.
///
/// A missing time keeps the stored time.
///
/// # Errors
/// Returns [Error::EntityNotFound] if the transaction, user or category does not exist.
pub fn update_transaction(
    transaction_id: TransactionId,
    new_transaction: &NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let sql_transaction = begin_write(connection)?;
    let previous = get_transaction(transaction_id, &sql_transaction)?;
    check_references(new_transaction, &sql_transaction)?;

    let time = new_transaction.time.unwrap_or(previous.time);
    let transaction =
        update_transaction_row(transaction_id, new_transaction, time, &sql_transaction)?;
    apply_balance_changes(
        &balance_changes(Some(&previous), Some(new_transaction))?,
        &sql_transaction,
    )?;

    sql_transaction.commit()?;
    tracing::info!("Updated transaction {transaction_id}");

    Ok(transaction)
}

/// Delete the transaction `transaction_id` and take its amount back out of the user's balance.
///
/// # Errors
/// Returns [Error::EntityNotFound] if the transaction does not exist.
pub fn delete_transaction(
    transaction_id: TransactionId,
    connection: &Connection,
) -> Result<(), Error> {
    let sql_transaction = begin_write(connection)?;
    let previous = get_transaction(transaction_id, &sql_transaction)?;

    delete_transaction_row(transaction_id, &sql_transaction)?;
    apply_balance_changes(&balance_changes(Some(&previous), None)?, &sql_transaction)?;

    sql_transaction.commit()?;
    tracing::info!("Deleted transaction {transaction_id}");

    Ok(())
}
