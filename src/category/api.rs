//! JSON endpoints for categories.

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
    category::{
        CategoryId, CategoryName,
        db::{get_all_categories, get_category},
        dto::CategoryDto,
        service::{create_category, delete_category, rename_category},
    },
};

/// The state needed by the category API.
#[derive(Debug, Clone)]
pub struct CategoryApiState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// List every category.
pub async fn list_categories_api(
    State(state): State<CategoryApiState>,
) -> Result<Json<Vec<CategoryDto>>, Error> {
    let connection = lock_connection(&state.db_connection)?;
    let categories = get_all_categories(&connection)?;

    Ok(Json(categories.into_iter().map(CategoryDto::from).collect()))
}

/// Create a category and respond with 201 and the stored category.
pub async fn create_category_api(
    State(state): State<CategoryApiState>,
    ApiJson(dto): ApiJson<CategoryDto>,
) -> Result<(StatusCode, Json<CategoryDto>), Error> {
    let name = CategoryName::try_from(dto)?;
    let connection = lock_connection(&state.db_connection)?;
    let category = create_category(&name, &connection)?;

    Ok((StatusCode::CREATED, Json(category.into())))
}

/// Get a single category.
pub async fn get_category_api(
    Path(category_id): Path<CategoryId>,
    State(state): State<CategoryApiState>,
) -> Result<Json<CategoryDto>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_category(category_id, &connection).map(|category| Json(category.into()))
}

/// Rename a category.
pub async fn update_category_api(
    Path(category_id): Path<CategoryId>,
    State(state): State<CategoryApiState>,
    ApiJson(dto): ApiJson<CategoryDto>,
) -> Result<Json<CategoryDto>, Error> {
    let name = CategoryName::try_from(dto)?;
    let connection = lock_connection(&state.db_connection)?;

    rename_category(category_id, &name, &connection).map(|category| Json(category.into()))
}

/// Delete a category that no transaction uses.
pub async fn delete_category_api(
    Path(category_id): Path<CategoryId>,
    State(state): State<CategoryApiState>,
) -> Result<StatusCode, Error> {
    let connection = lock_connection(&state.db_connection)?;
    delete_category(category_id, &connection)?;

    Ok(StatusCode::OK)
}
