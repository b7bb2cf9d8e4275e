//! Transaction editing page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, endpoints,
    app_state::lock_connection,
    transaction::{
        NewTransaction, TransactionFormData, TransactionId,
        create::load_form_choices,
        db::get_transaction,
        form::{TransactionFormAction, TransactionFormChoices, transaction_form_page},
        service::update_transaction,
    },
};

/// The state needed for the edit transaction page and the update endpoint.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the transaction editing page.
pub async fn get_edit_transaction_page(
    Path(transaction_id): Path<TransactionId>,
    State(state): State<EditTransactionState>,
) -> Response {
    let transaction = match lock_connection(&state.db_connection)
        .and_then(|connection| get_transaction(transaction_id, &connection))
    {
        Ok(transaction) => transaction,
        Err(error) => return error.into_page_response(),
    };
    let (users, categories) = match load_form_choices(&state.db_connection) {
        Ok(choices) => choices,
        Err(error) => return error.into_page_response(),
    };

    let edit_endpoint = endpoints::format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction_id);
    let update_endpoint = endpoints::format_endpoint(endpoints::TRANSACTION_VIEW, transaction_id);

    transaction_form_page(
        "Edit Transaction",
        &edit_endpoint,
        TransactionFormAction::Update {
            endpoint: &update_endpoint,
        },
        &TransactionFormChoices {
            users: &users,
            categories: &categories,
        },
        &TransactionFormData::from(&transaction),
    )
    .into_response()
}

/// Handle transaction update form submission.
pub async fn update_transaction_endpoint(
    Path(transaction_id): Path<TransactionId>,
    State(state): State<EditTransactionState>,
    Form(form): Form<TransactionFormData>,
) -> Response {
    let result = NewTransaction::try_from(&form).and_then(|new_transaction| {
        let connection = lock_connection(&state.db_connection)?;
        update_transaction(transaction_id, &new_transaction, &connection)
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
