//! User editing page and endpoint.

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
    user::{
        NewUser, UserFormData, UserId,
        db::get_user,
        form::{UserFormAction, user_form_page},
        service::update_user,
    },
};

/// The state needed for the edit user page and the update endpoint.
#[derive(Debug, Clone)]
pub struct EditUserState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditUserState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the user editing page, pre-filled with the stored user.
pub async fn get_edit_user_page(
    Path(user_id): Path<UserId>,
    State(state): State<EditUserState>,
) -> Response {
    let user = match lock_connection(&state.db_connection)
        .and_then(|connection| get_user(user_id, &connection))
    {
        Ok(user) => user,
        Err(error) => return error.into_page_response(),
    };

    let edit_endpoint = endpoints::format_endpoint(endpoints::EDIT_USER_VIEW, user_id);
    let update_endpoint = endpoints::format_endpoint(endpoints::USER_VIEW, user_id);

    user_form_page(
        "Edit User",
        &edit_endpoint,
        UserFormAction::Update {
            endpoint: &update_endpoint,
        },
        &UserFormData::from(&user),
    )
    .into_response()
}

/// Handle user update form submission.
pub async fn update_user_endpoint(
    Path(user_id): Path<UserId>,
    State(state): State<EditUserState>,
    Form(form): Form<UserFormData>,
) -> Response {
    let details = match NewUser::try_from(&form) {
        Ok(details) => details,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match lock_connection(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_alert_response(),
    };

    match update_user(user_id, &details, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::USERS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => error.into_alert_response(),
    }
}
