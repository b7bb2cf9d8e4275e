//! Core user domain types.

use std::fmt::Display;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Error, database_id::DatabaseId, validation::non_blank};

/// Database identifier for a user.
pub type UserId = DatabaseId;

/// A validated, non-blank full name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct FullName(String);

impl FullName {
    /// Create a full name, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [Error::BlankField] if `name` is empty or only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        non_blank(name, "fullName").map(Self)
    }

    /// Create a full name without validation.
    ///
    /// The caller should ensure that the string is not blank.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for FullName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for FullName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated, non-blank email address.
///
/// Only blankness is checked, uniqueness is enforced by the user service and the database.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Email(String);

impl Email {
    /// Create an email, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [Error::BlankField] if `email` is empty or only whitespace.
    pub fn new(email: &str) -> Result<Self, Error> {
        non_blank(email, "email").map(Self)
    }

    /// Create an email without validation.
    ///
    /// The caller should ensure that the string is not blank.
    pub fn new_unchecked(email: &str) -> Self {
        Self(email.to_owned())
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A person whose spending is tracked.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserId,
    /// The name displayed for the user.
    pub full_name: FullName,
    /// The user's email, unique across all users.
    pub email: Email,
    /// The net sum of the user's credits minus debits.
    ///
    /// Only transaction writes change this value.
    pub balance: Decimal,
}

/// The validated fields needed to create a user or replace an existing user's details.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    /// The name displayed for the user.
    pub full_name: FullName,
    /// The user's email.
    pub email: Email,
}

/// Form data for user creation and editing.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UserFormData {
    pub full_name: String,
    pub email: String,
}

impl From<&User> for UserFormData {
    fn from(user: &User) -> Self {
        Self {
            full_name: user.full_name.to_string(),
            email: user.email.to_string(),
        }
    }
}

impl TryFrom<&UserFormData> for NewUser {
    type Error = Error;

    fn try_from(form: &UserFormData) -> Result<Self, Self::Error> {
        Ok(Self {
            full_name: FullName::new(&form.full_name)?,
            email: Email::new(&form.email)?,
        })
    }
}
