//! Keeps user balances in step with their transactions.
//!
//! Every transaction write is planned as a list of [BalanceChange]s by [balance_changes] and then
//! applied by [apply_balance_changes] inside the same SQL transaction as the write.

use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::{
    Error,
    transaction::{NewTransaction, Transaction},
    user::{UserId, get_user_balance, set_user_balance},
};

/// An amount to add to a user's balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceChange {
    /// The user whose balance changes.
    pub user_id: UserId,
    /// The signed amount added to the balance.
    pub delta: Decimal,
}

/// Plan the balance changes for replacing `previous` with `next`.
///
/// `None` for `previous` is a create, `None` for `next` is a delete. When the user stays the same,
/// an update is a single change by the difference of the signed amounts, and no change at all if
/// that difference is zero.
///
/// # Errors
/// Returns [Error::BalanceOutOfRange] if the difference does not fit in a decimal.
pub fn balance_changes(
    previous: Option<&Transaction>,
    next: Option<&NewTransaction>,
) -> Result<Vec<BalanceChange>, Error> {
    let changes = match (previous, next) {
        (None, None) => vec![],
        (None, Some(next)) => vec![BalanceChange {
            user_id: next.user_id,
            delta: next.signed_amount(),
        }],
        (Some(previous), None) => vec![BalanceChange {
            user_id: previous.user_id,
            delta: -previous.signed_amount(),
        }],
        (Some(previous), Some(next)) if previous.user_id == next.user_id => {
            let delta = next
                .signed_amount()
                .checked_sub(previous.signed_amount())
                .ok_or(Error::BalanceOutOfRange {
                    user_id: next.user_id,
                })?;

            if delta.is_zero() {
                vec![]
            } else {
                vec![BalanceChange {
                    user_id: next.user_id,
                    delta,
                }]
            }
        }
        (Some(previous), Some(next)) => vec![
            BalanceChange {
                user_id: previous.user_id,
                delta: -previous.signed_amount(),
            },
            BalanceChange {
                user_id: next.user_id,
                delta: next.signed_amount(),
            },
        ],
    };

    Ok(changes)
}

/// Add each change to its user's stored balance.
///
/// Must run inside the write transaction of the transaction change that produced `changes`.
///
/// # Errors
/// Returns [Error::EntityNotFound] if a user does not exist, or [Error::BalanceOutOfRange] if a
/// new balance does not fit in a decimal. Changes applied before the error are only undone when
/// the caller rolls back the SQL transaction.
pub fn apply_balance_changes(changes: &[BalanceChange], connection: &Connection) -> Result<(), Error> {
    for change in changes {
        let balance = get_user_balance(change.user_id, connection)?;
        let new_balance =
            balance
                .checked_add(change.delta)
                .ok_or(Error::BalanceOutOfRange {
                    user_id: change.user_id,
                })?;
        set_user_balance(change.user_id, new_balance, connection)?;

        tracing::debug!(
            "Balance of user {} changed by {} to {}",
            change.user_id,
            change.delta,
            new_balance
        );
    }

    Ok(())
}
