//! Category editing page and endpoint.

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
    category::{
        CategoryFormData, CategoryId, CategoryName, db::get_category, form::category_form_page,
        service::rename_category,
    },
};

/// The state needed for the edit category page and the update endpoint.
#[derive(Debug, Clone)]
pub struct EditCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the category editing page.
pub async fn get_edit_category_page(
    Path(category_id): Path<CategoryId>,
    State(state): State<EditCategoryState>,
) -> Response {
    let category = match lock_connection(&state.db_connection)
        .and_then(|connection| get_category(category_id, &connection))
    {
        Ok(category) => category,
        Err(error) => return error.into_page_response(),
    };

    let edit_endpoint = endpoints::format_endpoint(endpoints::EDIT_CATEGORY_VIEW, category_id);
    let update_endpoint = endpoints::format_endpoint(endpoints::CATEGORY_VIEW, category_id);

    category_form_page(
        "Edit Category",
        &edit_endpoint,
        &update_endpoint,
        true,
        category.name.as_ref(),
    )
    .into_response()
}

/// Handle category update form submission.
pub async fn update_category_endpoint(
    Path(category_id): Path<CategoryId>,
    State(state): State<EditCategoryState>,
    Form(form): Form<CategoryFormData>,
) -> Response {
    let result = CategoryName::new(&form.name).and_then(|name| {
        let connection = lock_connection(&state.db_connection)?;
        rename_category(category_id, &name, &connection)
    });

    match result {
        Ok(_) => (
            HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => error.into_alert_response(),
    }
}
