//! Core transaction domain types.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{
    OffsetDateTime, PrimitiveDateTime, UtcOffset, format_description::BorrowedFormatItem,
    macros::format_description,
};

use crate::{Error, category::CategoryId, database_id::DatabaseId, user::UserId};

/// Database identifier for a transaction.
pub type TransactionId = DatabaseId;

/// Whether a transaction takes money from or gives money to its user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    /// Money spent, subtracted from the user's balance.
    Debit,
    /// Money received, added to the user's balance.
    Credit,
}

impl TransactionType {
    /// Parse the canonical wire string, "debit" or "credit".
    ///
    /// # Errors
    /// Returns [Error::UnsupportedTransactionType] if `value` is missing or is not exactly
    /// one of the canonical strings.
    pub fn from_canonical(value: Option<&str>) -> Result<Self, Error> {
        match value {
            Some("debit") => Ok(Self::Debit),
            Some("credit") => Ok(Self::Credit),
            Some(other) => Err(Error::UnsupportedTransactionType(format!(
                "Received unsupported transaction type [{other}]"
            ))),
            None => Err(Error::UnsupportedTransactionType(
                "Transaction type can not be null".to_owned(),
            )),
        }
    }

    /// The canonical wire and storage string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }

    /// `amount` with the sign this type applies to a balance.
    pub fn signed(&self, amount: Decimal) -> Decimal {
        match self {
            Self::Debit => -amount,
            Self::Credit => amount,
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_canonical(Some(s))
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// The largest accepted transaction amount, one quadrillion.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// A transaction amount, always greater than zero and at most [MAX_AMOUNT].
///
/// The direction of the money is given by the [TransactionType].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    /// Create an amount.
    ///
    /// # Errors
    /// Returns [Error::NonPositiveAmount] if `value` is zero or negative, or
    /// [Error::AmountTooLarge] if `value` is greater than [MAX_AMOUNT].
    pub fn new(value: Decimal) -> Result<Self, Error> {
        if value <= Decimal::ZERO {
            Err(Error::NonPositiveAmount(value))
        } else if value > MAX_AMOUNT {
            Err(Error::AmountTooLarge {
                amount: value,
                max: MAX_AMOUNT,
            })
        } else {
            Ok(Self(value))
        }
    }

    /// Create an amount without validation.
    ///
    /// The caller should ensure that `value` is greater than zero.
    pub fn new_unchecked(value: Decimal) -> Self {
        Self(value)
    }

    /// The amount as a decimal.
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored debit or credit.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The user whose balance the transaction affects.
    pub user_id: UserId,
    /// The category the transaction is filed under.
    pub category_id: CategoryId,
    /// Whether the amount is taken from or given to the user.
    pub transaction_type: TransactionType,
    /// The unsigned amount.
    pub amount: Amount,
    /// When the transaction happened, in UTC.
    pub time: OffsetDateTime,
}

impl Transaction {
    /// The effect this transaction has on its user's balance.
    pub fn signed_amount(&self) -> Decimal {
        self.transaction_type.signed(self.amount.value())
    }
}

/// The validated fields for creating or replacing a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The user whose balance the transaction affects.
    pub user_id: UserId,
    /// The category the transaction is filed under.
    pub category_id: CategoryId,
    /// Whether the amount is taken from or given to the user.
    pub transaction_type: TransactionType,
    /// The unsigned amount.
    pub amount: Amount,
    /// When the transaction happened.
    ///
    /// `None` means now when creating, and the stored time when replacing.
    pub time: Option<OffsetDateTime>,
}

impl NewTransaction {
    /// The effect this transaction would have on its user's balance.
    pub fn signed_amount(&self) -> Decimal {
        self.transaction_type.signed(self.amount.value())
    }
}

/// The format of an `<input type="datetime-local">` value.
const DATETIME_LOCAL_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]");

/// The same format when the browser includes seconds.
const DATETIME_LOCAL_SECONDS_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Format `time` for a `datetime-local` input.
pub(crate) fn format_datetime_local(time: OffsetDateTime) -> String {
    time.to_offset(UtcOffset::UTC)
        .format(DATETIME_LOCAL_FORMAT)
        .unwrap_or_default()
}

/// Parse a `datetime-local` value as a UTC time.
fn parse_datetime_local(value: &str) -> Result<OffsetDateTime, Error> {
    PrimitiveDateTime::parse(value, DATETIME_LOCAL_FORMAT)
        .or_else(|_| PrimitiveDateTime::parse(value, DATETIME_LOCAL_SECONDS_FORMAT))
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|error| Error::InvalidRequestBody(format!("invalid time '{value}': {error}")))
}

/// The form for creating or editing a transaction on the web pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFormData {
    /// The selected user ID, empty if none was chosen.
    #[serde(default)]
    pub user_id: String,
    /// The selected category ID, empty if none was chosen.
    #[serde(default)]
    pub category_id: String,
    /// "debit" or "credit".
    #[serde(rename = "type", default)]
    pub transaction_type: String,
    /// The amount as typed by the user.
    #[serde(default)]
    pub amount: String,
    /// The `datetime-local` value, empty to use the current time.
    #[serde(default)]
    pub time: String,
}

impl From<&Transaction> for TransactionFormData {
    fn from(transaction: &Transaction) -> Self {
        Self {
            user_id: transaction.user_id.to_string(),
            category_id: transaction.category_id.to_string(),
            transaction_type: transaction.transaction_type.to_string(),
            amount: transaction.amount.to_string(),
            time: format_datetime_local(transaction.time),
        }
    }
}

fn parse_form_id(value: &str, field: &'static str) -> Result<DatabaseId, Error> {
    let value = value.trim();

    if value.is_empty() {
        return Err(Error::MissingField(field));
    }

    value
        .parse()
        .map_err(|_| Error::InvalidRequestBody(format!("{field} must be an ID, got '{value}'")))
}

impl TryFrom<&TransactionFormData> for NewTransaction {
    type Error = Error;

    fn try_from(form: &TransactionFormData) -> Result<Self, Self::Error> {
        let transaction_type = match form.transaction_type.trim() {
            "" => TransactionType::from_canonical(None)?,
            value => TransactionType::from_canonical(Some(value))?,
        };

        let amount = form.amount.trim();
        if amount.is_empty() {
            return Err(Error::MissingField("amount"));
        }
        let amount = Decimal::from_str(amount).map_err(|error| {
            Error::InvalidRequestBody(format!("invalid amount '{amount}': {error}"))
        })?;

        let time = match form.time.trim() {
            "" => None,
            value => Some(parse_datetime_local(value)?),
        };

        Ok(Self {
            user_id: parse_form_id(&form.user_id, "userId")?,
            category_id: parse_form_id(&form.category_id, "categoryId")?,
            transaction_type,
            amount: Amount::new(amount)?,
            time,
        })
    }
}

#[cfg(test)]
mod transaction_form_data_tests {
    use rust_decimal::Decimal;
    use time::macros::datetime;

    use crate::{
        Error,
        transaction::{Amount, NewTransaction, TransactionFormData, TransactionType},
    };

    fn form(transaction_type: &str, amount: &str, time: &str) -> TransactionFormData {
        TransactionFormData {
            user_id: "1".to_owned(),
            category_id: "2".to_owned(),
            transaction_type: transaction_type.to_owned(),
            amount: amount.to_owned(),
            time: time.to_owned(),
        }
    }

    #[test]
    fn converts_valid_form() {
        let got = NewTransaction::try_from(&form("credit", "12.50", "2024-03-01T09:30"));

        assert_eq!(
            got,
            Ok(NewTransaction {
                user_id: 1,
                category_id: 2,
                transaction_type: TransactionType::Credit,
                amount: Amount::new_unchecked(Decimal::new(1250, 2)),
                time: Some(datetime!(2024-03-01 09:30 UTC)),
            })
        );
    }

    #[test]
    fn accepts_seconds_and_empty_time() {
        let with_seconds = NewTransaction::try_from(&form("debit", "1", "2024-03-01T09:30:15"));
        let without_time = NewTransaction::try_from(&form("debit", "1", ""));

        assert_eq!(
            with_seconds.map(|transaction| transaction.time),
            Ok(Some(datetime!(2024-03-01 09:30:15 UTC)))
        );
        assert_eq!(without_time.map(|transaction| transaction.time), Ok(None));
    }

    #[test]
    fn missing_type_is_unsupported() {
        let got = NewTransaction::try_from(&form("", "1", ""));

        assert_eq!(
            got,
            Err(Error::UnsupportedTransactionType(
                "Transaction type can not be null".to_owned()
            ))
        );
    }

    #[test]
    fn rejects_non_positive_amount() {
        let got = NewTransaction::try_from(&form("debit", "-3", ""));

        assert_eq!(got, Err(Error::NonPositiveAmount(Decimal::new(-3, 0))));
    }

    #[test]
    fn rejects_garbage_amount() {
        let got = NewTransaction::try_from(&form("debit", "ten", ""));

        assert!(matches!(got, Err(Error::InvalidRequestBody(_))));
    }

    #[test]
    fn rejects_missing_user() {
        let mut form = form("debit", "1", "");
        form.user_id = String::new();

        assert_eq!(
            NewTransaction::try_from(&form),
            Err(Error::MissingField("userId"))
        );
    }
}
