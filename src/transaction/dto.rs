//! The JSON representation of transactions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error,
    category::CategoryId,
    transaction::{Amount, NewTransaction, Transaction, TransactionId, TransactionType},
    user::UserId,
    validation::required,
};

/// A transaction as sent and received by the JSON API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDto {
    /// Must be null in requests.
    #[serde(default)]
    pub id: Option<TransactionId>,
    /// The user whose balance the transaction affects.
    #[serde(default)]
    pub user_id: Option<UserId>,
    /// The category the transaction is filed under.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// "debit" or "credit".
    #[serde(rename = "type", default)]
    pub transaction_type: Option<String>,
    /// The unsigned amount.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    /// RFC 3339 time, defaults to now on create and to the stored time on update.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub time: Option<OffsetDateTime>,
}

impl From<Transaction> for TransactionDto {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: Some(transaction.id),
            user_id: Some(transaction.user_id),
            category_id: Some(transaction.category_id),
            transaction_type: Some(transaction.transaction_type.to_string()),
            amount: Some(transaction.amount.value()),
            time: Some(transaction.time),
        }
    }
}

impl TryFrom<TransactionDto> for NewTransaction {
    type Error = Error;

    fn try_from(dto: TransactionDto) -> Result<Self, Self::Error> {
        if dto.id.is_some() {
            return Err(Error::UnexpectedId);
        }

        let transaction_type = TransactionType::from_canonical(dto.transaction_type.as_deref())?;
        let user_id = required(dto.user_id, "userId")?;
        let category_id = required(dto.category_id, "categoryId")?;
        let amount = Amount::new(required(dto.amount, "amount")?)?;

        Ok(Self {
            user_id,
            category_id,
            transaction_type,
            amount,
            time: dto.time,
        })
    }
}
