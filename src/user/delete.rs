//! User deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState,
    alert::Alert,
    app_state::lock_connection,
    user::{UserId, service::delete_user},
};

/// The state needed for deleting a user.
#[derive(Debug, Clone)]
pub struct DeleteUserEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteUserEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle user deletion. Returns success alert or error.
pub async fn delete_user_endpoint(
    Path(user_id): Path<UserId>,
    State(state): State<DeleteUserEndpointState>,
) -> Response {
    let result = lock_connection(&state.db_connection)
        .and_then(|connection| delete_user(user_id, &connection));

    match result {
        Ok(()) => Alert::SuccessSimple {
            message: "User deleted successfully".to_owned(),
        }
        .into_response(),
        Err(error) => error.into_alert_response(),
    }
}
