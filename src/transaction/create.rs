//! Transaction creation page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    app_state::lock_connection,
    category::{Category, get_all_categories},
    transaction::{
        NewTransaction, TransactionFormData,
        form::{TransactionFormAction, TransactionFormChoices, transaction_form_page},
        service::create_transaction,
    },
    user::{User, get_all_users},
};

/// The state needed for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Load the users and categories offered by the transaction form.
pub(super) fn load_form_choices(
    db_connection: &Mutex<Connection>,
) -> Result<(Vec<User>, Vec<Category>), Error> {
    let connection = lock_connection(db_connection)?;

    Ok((get_all_users(&connection)?, get_all_categories(&connection)?))
}

/// Render the transaction creation page.
pub async fn get_new_transaction_page(State(state): State<CreateTransactionState>) -> Response {
    let (users, categories) = match load_form_choices(&state.db_connection) {
        Ok(choices) => choices,
        Err(error) => return error.into_page_response(),
    };

    transaction_form_page(
        "Create Transaction",
        endpoints::NEW_TRANSACTION_VIEW,
        TransactionFormAction::Create {
            endpoint: endpoints::TRANSACTIONS_VIEW,
        },
        &TransactionFormChoices {
            users: &users,
            categories: &categories,
        },
        &TransactionFormData::default(),
    )
    .into_response()
}

/// Handle transaction creation form submission.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionFormData>,
) -> Response {
    let result = NewTransaction::try_from(&form).and_then(|new_transaction| {
        let connection = lock_connection(&state.db_connection)?;
        create_transaction(&new_transaction, &connection)
    });

    match result {
        Ok(_) => (
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => error.into_alert_response(),
    }
}
