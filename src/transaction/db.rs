//! Database operations for transactions.

use std::collections::HashMap;

use rusqlite::{Connection, OptionalExtension, Row};
use time::{OffsetDateTime, UtcOffset};

use crate::{
    Error,
    category::CategoryId,
    db::{decimal_to_sql, get_decimal},
    error::Entity,
    transaction::{Amount, NewTransaction, Transaction, TransactionId},
    user::FullName,
};

/// Initialize the transaction table and its indexes.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL,
            category_id INTEGER NOT NULL,
            type TEXT NOT NULL CHECK (type IN ('debit', 'credit')),
            amount TEXT NOT NULL,
            time TEXT NOT NULL,
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE,
            FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE RESTRICT
        )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_user_id ON \"transaction\"(user_id)",
        (),
    )?;
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_category_id ON \"transaction\"(category_id)",
        (),
    )?;

    Ok(())
}

/// Insert a transaction at `time` and return it with its generated ID.
///
/// `new_transaction.time` is ignored, the caller resolves the time beforehand.
pub fn insert_transaction(
    new_transaction: &NewTransaction,
    time: OffsetDateTime,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(
            "INSERT INTO \"transaction\" (user_id, category_id, type, amount, time)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, user_id, category_id, type, amount, time",
        )?
        .query_row(
            (
                new_transaction.user_id,
                new_transaction.category_id,
                new_transaction.transaction_type,
                decimal_to_sql(new_transaction.amount.value()),
                time.to_offset(UtcOffset::UTC),
            ),
            map_transaction_row,
        )
        .map_err(Error::from)
}

/// Retrieve a transaction by its `transaction_id`.
///
/// # Errors
/// Returns [Error::EntityNotFound] if no transaction has the ID.
pub fn get_transaction(
    transaction_id: TransactionId,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(
            "SELECT id, user_id, category_id, type, amount, time
             FROM \"transaction\" WHERE id = :id",
        )?
        .query_row(&[(":id", &transaction_id)], map_transaction_row)
        .optional()?
        .ok_or(Error::EntityNotFound {
            entity: Entity::Transaction,
            id: transaction_id,
        })
}

/// Retrieve all transactions ordered by ID.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, user_id, category_id, type, amount, time
             FROM \"transaction\" ORDER BY id ASC",
        )?
        .query_map([], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// Replace every field of the transaction `transaction_id`, with `time` as the resolved time.
///
/// # Errors
/// Returns [Error::EntityNotFound] if no transaction has the ID.
pub fn update_transaction_row(
    transaction_id: TransactionId,
    new_transaction: &NewTransaction,
    time: OffsetDateTime,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(
            "UPDATE \"transaction\"
             SET user_id = ?1, category_id = ?2, type = ?3, amount = ?4, time = ?5
             WHERE id = ?6
             RETURNING id, user_id, category_id, type, amount, time",
        )?
        .query_row(
            (
                new_transaction.user_id,
                new_transaction.category_id,
                new_transaction.transaction_type,
                decimal_to_sql(new_transaction.amount.value()),
                time.to_offset(UtcOffset::UTC),
                transaction_id,
            ),
            map_transaction_row,
        )
        .optional()?
        .ok_or(Error::EntityNotFound {
            entity: Entity::Transaction,
            id: transaction_id,
        })
}

/// Delete the transaction `transaction_id`.
///
/// # Errors
/// Returns [Error::EntityNotFound] if no transaction has the ID.
pub fn delete_transaction_row(
    transaction_id: TransactionId,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected =
        connection.execute("DELETE FROM \"transaction\" WHERE id = ?1", [transaction_id])?;

    if rows_affected == 0 {
        return Err(Error::EntityNotFound {
            entity: Entity::Transaction,
            id: transaction_id,
        });
    }

    Ok(())
}

/// Count the transactions filed under `category_id`.
pub fn count_transactions_in_category(
    category_id: CategoryId,
    connection: &Connection,
) -> Result<u64, Error> {
    connection
        .query_row(
            "SELECT COUNT(*) FROM \"transaction\" WHERE category_id = ?1",
            [category_id],
            |row| get_count(row, 0),
        )
        .map_err(Error::from)
}

/// Count the transactions of every category that has at least one.
pub fn count_transactions_per_category(
    connection: &Connection,
) -> Result<HashMap<CategoryId, u64>, Error> {
    connection
        .prepare("SELECT category_id, COUNT(*) FROM \"transaction\" GROUP BY category_id")?
        .query_map([], |row| {
            Ok((row.get::<_, CategoryId>(0)?, get_count(row, 1)?))
        })?
        .map(|maybe_count| maybe_count.map_err(|error| error.into()))
        .collect()
}

/// Read a `COUNT(*)` column, which SQLite returns as a signed integer.
fn get_count(row: &Row, index: usize) -> Result<u64, rusqlite::Error> {
    let count: i64 = row.get(index)?;

    u64::try_from(count).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(index, count))
}

/// A transaction joined with the names shown on the transactions page.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    /// The stored transaction.
    pub transaction: Transaction,
    /// The full name of the transaction's user.
    pub user_name: FullName,
    /// The name of the transaction's category.
    pub category_name: String,
}

/// Retrieve all transactions with their user and category names, most recent first.
pub fn get_transaction_rows(connection: &Connection) -> Result<Vec<TransactionRow>, Error> {
    connection
        .prepare(
            "SELECT t.id, t.user_id, t.category_id, t.type, t.amount, t.time,
                    u.full_name, c.name
             FROM \"transaction\" t
             INNER JOIN user u ON u.id = t.user_id
             INNER JOIN category c ON c.id = t.category_id
             ORDER BY t.time DESC, t.id DESC",
        )?
        .query_map([], |row| {
            let transaction = map_transaction_row(row)?;
            let raw_user_name: String = row.get(6)?;
            let category_name = row.get(7)?;

            Ok(TransactionRow {
                transaction,
                user_name: FullName::new_unchecked(&raw_user_name),
                category_name,
            })
        })?
        .map(|maybe_row| maybe_row.map_err(|error| error.into()))
        .collect()
}

fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let user_id = row.get(1)?;
    let category_id = row.get(2)?;
    let transaction_type = row.get(3)?;
    let amount = get_decimal(row, 4)?;
    let time = row.get(5)?;

    Ok(Transaction {
        id,
        user_id,
        category_id,
        transaction_type,
        amount: Amount::new_unchecked(amount),
        time,
    })
}

#[cfg(test)]
pub(crate) fn sum_signed_amounts(
    user_id: crate::user::UserId,
    connection: &Connection,
) -> rust_decimal::Decimal {
    get_all_transactions(connection)
        .expect("Could not get transactions")
        .into_iter()
        .filter(|transaction| transaction.user_id == user_id)
        .map(|transaction| transaction.signed_amount())
        .sum()
}
