//! Users listing page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, endpoints,
    app_state::lock_connection,
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, edit_delete_action_links, format_currency,
    },
    navigation::NavBar,
    user::{User, db::get_all_users},
};

/// The state needed for the users listing page.
#[derive(Debug, Clone)]
pub struct UsersPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UsersPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the users listing page with each user's balance.
pub async fn get_users_page(State(state): State<UsersPageState>) -> Response {
    match lock_connection(&state.db_connection).and_then(|connection| get_all_users(&connection)) {
        Ok(users) => users_view(&users).into_response(),
        Err(error) => error.into_page_response(),
    }
}

fn users_view(users: &[User]) -> Markup {
    let new_user_route = endpoints::NEW_USER_VIEW;
    let nav_bar = NavBar::new(endpoints::USERS_VIEW).into_html();

    let table_row = |user: &User| {
        let edit_url = endpoints::format_endpoint(endpoints::EDIT_USER_VIEW, user.id);
        let delete_url = endpoints::format_endpoint(endpoints::USER_VIEW, user.id);
        let confirm_message = format!(
            "Are you sure you want to delete '{}'? All of their transactions will be deleted too.",
            user.full_name
        );

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE) { (user.full_name) }
                td class=(TABLE_CELL_STYLE) { (user.email) }
                td class={ (TABLE_CELL_STYLE) " text-right" } { (format_currency(user.balance)) }
                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex gap-4"
                    {
                        (edit_delete_action_links(
                            &edit_url,
                            &delete_url,
                            &confirm_message,
                            "closest tr",
                            "delete",
                        ))
                    }
                }
            }
        )
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Users" }

                    a href=(new_user_route) class=(LINK_STYLE) { "Create User" }
                }

                table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Email" }
                            th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Balance" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                        }
                    }

                    tbody
                    {
                        @for user in users {
                            (table_row(user))
                        }

                        @if users.is_empty() {
                            tr
                            {
                                td colspan="4" class="px-6 py-4 text-center"
                                {
                                    "No users yet. "
                                    a href=(new_user_route) class=(LINK_STYLE)
                                    {
                                        "Create the first user"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Users", &content)
}
