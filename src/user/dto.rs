//! The JSON representation of users.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    user::{Email, FullName, NewUser, User, UserId},
    validation::required,
};

/// A user as sent and received by the JSON API.
///
/// `id` and `balance` are assigned by the server and ignored or rejected in requests.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    /// Must be null in requests.
    #[serde(default)]
    pub id: Option<UserId>,
    /// The user's full name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// The user's email.
    #[serde(default)]
    pub email: Option<String>,
    /// The user's balance, ignored in requests.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub balance: Option<Decimal>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: Some(user.id),
            full_name: Some(user.full_name.to_string()),
            email: Some(user.email.to_string()),
            balance: Some(user.balance),
        }
    }
}

impl TryFrom<UserDto> for NewUser {
    type Error = Error;

    fn try_from(dto: UserDto) -> Result<Self, Self::Error> {
        if dto.id.is_some() {
            return Err(Error::UnexpectedId);
        }

        let full_name = required(dto.full_name, "fullName")?;
        let email = required(dto.email, "email")?;

        Ok(Self {
            full_name: FullName::new(&full_name)?,
            email: Email::new(&email)?,
        })
    }
}
