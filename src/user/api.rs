//! JSON endpoints for users.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    api_json::ApiJson,
    app_state::lock_connection,
    user::{
        NewUser, UserId,
        db::{get_all_users, get_user},
        dto::UserDto,
        service::{create_user, delete_user, update_user},
    },
};

/// The state needed by the user API.
#[derive(Debug, Clone)]
pub struct UserApiState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UserApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// List every user.
pub async fn list_users_api(
    State(state): State<UserApiState>,
) -> Result<Json<Vec<UserDto>>, Error> {
    let connection = lock_connection(&state.db_connection)?;
    let users = get_all_users(&connection)?;

    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

/// Create a user and respond with 201 and the stored user.
pub async fn create_user_api(
    State(state): State<UserApiState>,
    ApiJson(dto): ApiJson<UserDto>,
) -> Result<(StatusCode, Json<UserDto>), Error> {
    let new_user = NewUser::try_from(dto)?;
    let connection = lock_connection(&state.db_connection)?;
    let user = create_user(&new_user, &connection)?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Get a single user.
pub async fn get_user_api(
    Path(user_id): Path<UserId>,
    State(state): State<UserApiState>,
) -> Result<Json<UserDto>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_user(user_id, &connection).map(|user| Json(user.into()))
}

/// Replace the name and email of a user.
pub async fn update_user_api(
    Path(user_id): Path<UserId>,
    State(state): State<UserApiState>,
    ApiJson(dto): ApiJson<UserDto>,
) -> Result<Json<UserDto>, Error> {
    let details = NewUser::try_from(dto)?;
    let connection = lock_connection(&state.db_connection)?;

    update_user(user_id, &details, &connection).map(|user| Json(user.into()))
}

/// Delete a user and the user's transactions.
pub async fn delete_user_api(
    Path(user_id): Path<UserId>,
    State(state): State<UserApiState>,
) -> Result<StatusCode, Error> {
    let connection = lock_connection(&state.db_connection)?;
    delete_user(user_id, &connection)?;

    Ok(StatusCode::OK)
}
