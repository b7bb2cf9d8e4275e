//! Database schema initialization and the column helpers shared by the entity stores.

use std::str::FromStr;

use rusqlite::{Connection, Row, Transaction, TransactionBehavior, types::Type};
use rust_decimal::Decimal;

use crate::{
    category::create_category_table, transaction::create_transaction_table,
    user::create_user_table,
};

/// Create the tables for the domain models if they do not exist yet.
///
/// Foreign key enforcement is switched on for `connection`, the pragma is a no-op inside a
/// transaction so it is set before the schema transaction starts.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.pragma_update(None, "foreign_keys", true)?;

    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_user_table(&transaction)?;
    create_category_table(&transaction)?;
    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Start a transaction that takes the write lock immediately.
///
/// Writes that read a balance and then store a new one must run inside this transaction so that
/// no other writer can change the balance in between.
///
/// Uses `new_unchecked` because callers only hold a `&Connection` from the mutex guard.
pub(crate) fn begin_write(connection: &Connection) -> Result<Transaction<'_>, rusqlite::Error> {
    Transaction::new_unchecked(connection, TransactionBehavior::Immediate)
}

/// Read a decimal stored as TEXT at column `index`.
pub(crate) fn get_decimal(row: &Row, index: usize) -> Result<Decimal, rusqlite::Error> {
    let text: String = row.get(index)?;

    Decimal::from_str(&text).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(error))
    })
}

/// The TEXT representation a decimal is stored as.
pub(crate) fn decimal_to_sql(value: Decimal) -> String {
    value.normalize().to_string()
}


#[cfg(test)]
mod decimal_column_tests {
    use rusqlite::Connection;
    use rust_decimal::Decimal;

    use super::{decimal_to_sql, get_decimal};

    #[test]
    fn decimal_survives_storage_without_rounding() {
        let connection = Connection::open_in_memory().unwrap();
        connection
            .execute("CREATE TABLE money (amount TEXT NOT NULL)", ())
            .unwrap();
        let want = Decimal::new(-1234567890123, 4);

        connection
            .execute("INSERT INTO money (amount) VALUES (?1)", (decimal_to_sql(want),))
            .unwrap();
        let got = connection
            .query_row("SELECT amount FROM money", [], |row| get_decimal(row, 0))
            .unwrap();

        assert_eq!(want, got);
    }

    #[test]
    fn invalid_text_is_a_conversion_error() {
        let connection = Connection::open_in_memory().unwrap();

        let result = connection.query_row("SELECT 'not a number'", [], |row| get_decimal(row, 0));

        assert!(matches!(
            result,
            Err(rusqlite::Error::FromSqlConversionFailure(0, _, _))
        ));
    }
}
