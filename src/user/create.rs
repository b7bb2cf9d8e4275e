//! User creation page and endpoint.

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
    AppState, endpoints,
    app_state::lock_connection,
    user::{
        NewUser, UserFormData,
        form::{UserFormAction, user_form_page},
        service::create_user,
    },
};

/// The state needed for creating a user.
#[derive(Debug, Clone)]
pub struct CreateUserEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateUserEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the user creation page.
pub async fn get_new_user_page() -> Response {
    user_form_page(
        "Create User",
        endpoints::NEW_USER_VIEW,
        UserFormAction::Create {
            endpoint: endpoints::USERS_VIEW,
        },
        &UserFormData::default(),
    )
    .into_response()
}

/// Handle user creation form submission.
pub async fn create_user_endpoint(
    State(state): State<CreateUserEndpointState>,
    Form(form): Form<UserFormData>,
) -> Response {
    let new_user = match NewUser::try_from(&form) {
        Ok(new_user) => new_user,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match lock_connection(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_alert_response(),
    };

    match create_user(&new_user, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::USERS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => error.into_alert_response(),
    }
}


#[cfg(test)]
mod create_user_endpoint_tests {
    use axum::{Form, extract::State, http::StatusCode, response::IntoResponse};
    use rust_decimal::Decimal;

    use crate::{
        app_state::lock_connection,
        endpoints,
        test_utils::{
            assert_hx_redirect, assert_valid_html, get_test_state, parse_html_fragment,
            select_text,
        },
        user::{UserFormData, create::CreateUserEndpointState, create_user_endpoint, get_all_users},
    };

    fn get_state() -> CreateUserEndpointState {
        CreateUserEndpointState {
            db_connection: get_test_state().db_connection,
        }
    }

    fn form(full_name: &str, email: &str) -> Form<UserFormData> {
        Form(UserFormData {
            full_name: full_name.to_owned(),
            email: email.to_owned(),
        })
    }

    #[tokio::test]
    async fn can_create_user() {
        let state = get_state();

        let response = create_user_endpoint(State(state.clone()), form("Ada", "ada@example.com"))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::USERS_VIEW);
        let users = get_all_users(&lock_connection(&state.db_connection).unwrap()).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].full_name.as_ref(), "Ada");
        assert_eq!(users[0].balance, Decimal::ZERO);
    }

    #[tokio::test]
    async fn blank_name_renders_error_alert() {
        let state = get_state();

        let response = create_user_endpoint(State(state), form("  ", "ada@example.com"))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        assert_eq!(
            select_text(&html, "p"),
            vec!["Invalid input", "fullName must not be blank"]
        );
    }

    #[tokio::test]
    async fn duplicate_email_renders_error_alert() {
        let state = get_state();
        create_user_endpoint(State(state.clone()), form("Ada", "ada@example.com")).await;

        let response = create_user_endpoint(State(state), form("Bob", "ada@example.com"))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = parse_html_fragment(response).await;
        assert_eq!(
            select_text(&html, "p"),
            vec![
                "Duplicate email",
                "Wasn't able to create new user. User with email='ada@example.com' already exists"
            ]
        );
    }
}
