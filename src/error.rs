//! Defines the app level error type and its conversions to JSON error bodies and HTML alerts.

use std::fmt::Display;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    alert::Alert, database_id::DatabaseId, internal_server_error::InternalServerError,
    not_found::NotFoundPage,
};

/// The kinds of stored entities, used to build "not found" messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    /// A person whose balance is tracked.
    User,
    /// A spending category.
    Category,
    /// A debit or credit.
    Transaction,
}

impl Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Entity::User => "User",
            Entity::Category => "Category",
            Entity::Transaction => "Transaction",
        };

        write!(f, "{name}")
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The referenced user, category or transaction does not exist.
    #[error("{entity} with id='{id}' not found")]
    EntityNotFound {
        /// The kind of entity that was looked up.
        entity: Entity,
        /// The ID that did not match any row.
        id: DatabaseId,
    },

    /// A new user was submitted with an email that belongs to another user.
    #[error("Wasn't able to create new user. User with email='{email}' already exists")]
    DuplicateEmail {
        /// The offending email.
        email: String,
    },

    /// An existing user was updated with an email that belongs to another user.
    #[error(
        "Wasn't able to update existing user with id='{id}'. User with email='{email}' already exists"
    )]
    DuplicateEmailOnUpdate {
        /// The ID of the user being updated.
        id: DatabaseId,
        /// The offending email.
        email: String,
    },

    /// The transaction type was missing or not one of the canonical strings.
    #[error("{0}")]
    UnsupportedTransactionType(String),

    /// A required field was null or absent.
    #[error("{0} must not be null")]
    MissingField(&'static str),

    /// A required text field was empty or only whitespace.
    #[error("{0} must not be blank")]
    BlankField(&'static str),

    /// A transaction amount of zero or less.
    #[error("amount must be greater than 0, got {0}")]
    NonPositiveAmount(Decimal),

    /// A transaction amount larger than the largest accepted amount.
    #[error("amount must be at most {max}, got {amount}")]
    AmountTooLarge {
        /// The submitted amount.
        amount: Decimal,
        /// The largest accepted amount.
        max: Decimal,
    },

    /// The client tried to choose the ID of an entity.
    #[error("id must be null, it is assigned by the server")]
    UnexpectedId,

    /// The request body could not be parsed as the expected JSON document.
    #[error("{0}")]
    InvalidRequestBody(String),

    /// A category cannot be deleted while transactions refer to it.
    #[error(
        "Wasn't able to delete category with id='{id}'. It is used by {transaction_count} transaction(s)"
    )]
    CategoryInUse {
        /// The category that was to be deleted.
        id: DatabaseId,
        /// How many transactions still reference the category.
        transaction_count: u64,
    },

    /// A balance change would take the user's balance beyond what a decimal can hold.
    #[error(
        "Wasn't able to update the balance of user with id='{user_id}'. The new balance is out of range"
    )]
    BalanceOutOfRange {
        /// The user whose balance would overflow.
        user_id: DatabaseId,
    },

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

/// The stable, machine readable code sent with every error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// See [Error::EntityNotFound].
    EntityNotFound,
    /// See [Error::DuplicateEmail] and [Error::DuplicateEmailOnUpdate].
    EntityAlreadyExists,
    /// See [Error::UnsupportedTransactionType].
    UnsupportedTransactionType,
    /// A field failed validation.
    ValidationFailed,
    /// See [Error::InvalidRequestBody].
    InvalidRequestBody,
    /// See [Error::CategoryInUse].
    EntityInUse,
    /// See [Error::BalanceOutOfRange].
    BalanceOutOfRange,
    /// Anything the client cannot fix.
    InternalError,
}

/// The JSON body of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// The stable error code.
    pub code: ErrorCode,
    /// A human-readable description that includes the offending value.
    pub message: String,
}

impl Error {
    /// The stable code identifying the kind of error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::EntityNotFound { .. } => ErrorCode::EntityNotFound,
            Error::DuplicateEmail { .. } | Error::DuplicateEmailOnUpdate { .. } => {
                ErrorCode::EntityAlreadyExists
            }
            Error::UnsupportedTransactionType(_) => ErrorCode::UnsupportedTransactionType,
            Error::MissingField(_)
            | Error::BlankField(_)
            | Error::NonPositiveAmount(_)
            | Error::AmountTooLarge { .. }
            | Error::UnexpectedId => ErrorCode::ValidationFailed,
            Error::InvalidRequestBody(_) => ErrorCode::InvalidRequestBody,
            Error::CategoryInUse { .. } => ErrorCode::EntityInUse,
            Error::BalanceOutOfRange { .. } => ErrorCode::BalanceOutOfRange,
            Error::DatabaseLockError | Error::SqlError(_) => ErrorCode::InternalError,
        }
    }

    /// The HTTP status code that the error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self.code() {
            ErrorCode::EntityNotFound => StatusCode::NOT_FOUND,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Convert the error into an HTTP response with an HTML alert.
    ///
    /// Used by the web pages, where the alert is swapped into the page's alert container.
    pub fn into_alert_response(self) -> Response {
        let status_code = self.status_code();

        let alert = match self.code() {
            ErrorCode::InternalError => {
                tracing::error!("An unexpected error occurred: {self}");
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details: "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                }
            }
            ErrorCode::EntityNotFound => Alert::Error {
                message: "Not found".to_owned(),
                details: format!(
                    "{self}. Try refreshing the page to see if it has already been deleted."
                ),
            },
            ErrorCode::EntityAlreadyExists => Alert::Error {
                message: "Duplicate email".to_owned(),
                details: self.to_string(),
            },
            ErrorCode::EntityInUse => Alert::Error {
                message: "Category in use".to_owned(),
                details: self.to_string(),
            },
            ErrorCode::BalanceOutOfRange => Alert::Error {
                message: "Balance out of range".to_owned(),
                details: self.to_string(),
            },
            ErrorCode::UnsupportedTransactionType
            | ErrorCode::ValidationFailed
            | ErrorCode::InvalidRequestBody => Alert::Error {
                message: "Invalid input".to_owned(),
                details: self.to_string(),
            },
        };

        (status_code, alert.into_html()).into_response()
    }

    /// Convert the error into a full error page.
    ///
    /// Used by the handlers that render whole pages, e.g. the edit page of a deleted user.
    pub fn into_page_response(self) -> Response {
        match self {
            Error::EntityNotFound { .. } => NotFoundPage {
                description: &self.to_string(),
            }
            .into_response(),
            error => {
                tracing::error!("An unexpected error occurred while rendering a page: {error}");
                InternalServerError::default().into_response()
            }
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidRequestBody(rejection.body_text())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let code = self.code();
        let status_code = self.status_code();

        let message = match code {
            // Internal details are only meant for the server logs.
            ErrorCode::InternalError => {
                tracing::error!("An unexpected error occurred: {self}");
                "An unexpected error occurred, check the server logs for more details.".to_owned()
            }
            _ => self.to_string(),
        };

        (status_code, Json(ErrorResponse { code, message })).into_response()
    }
}
