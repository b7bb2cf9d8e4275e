//! Categories listing page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    category::{Category, db::get_all_categories},
    endpoints,
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, edit_delete_action_links,
    },
    navigation::NavBar,
    transaction::count_transactions_per_category,
};

/// The state needed for the categories listing page.
#[derive(Debug, Clone)]
pub struct CategoriesPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoriesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

struct CategoryRow {
    category: Category,
    transaction_count: u64,
}

/// Render the categories listing page with transaction counts.
pub async fn get_categories_page(State(state): State<CategoriesPageState>) -> Response {
    match load_rows(&state.db_connection) {
        Ok(rows) => categories_view(&rows).into_response(),
        Err(error) => error.into_page_response(),
    }
}

fn load_rows(db_connection: &Mutex<Connection>) -> Result<Vec<CategoryRow>, Error> {
    let connection = lock_connection(db_connection)?;
    let categories = get_all_categories(&connection)?;
    let transactions_per_category = count_transactions_per_category(&connection)?;

    Ok(categories
        .into_iter()
        .map(|category| CategoryRow {
            transaction_count: transactions_per_category
                .get(&category.id)
                .copied()
                .unwrap_or(0),
            category,
        })
        .collect())
}

fn categories_view(rows: &[CategoryRow]) -> Markup {
    let new_category_route = endpoints::NEW_CATEGORY_VIEW;
    let nav_bar = NavBar::new(endpoints::CATEGORIES_VIEW).into_html();

    let table_row = |row: &CategoryRow| {
        let edit_url = endpoints::format_endpoint(endpoints::EDIT_CATEGORY_VIEW, row.category.id);
        let delete_url = endpoints::format_endpoint(endpoints::CATEGORY_VIEW, row.category.id);
        let confirm_message = format!(
            "Are you sure you want to delete '{}'?",
            row.category.name
        );

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE) { (row.category.name) }
                td class=(TABLE_CELL_STYLE) { (row.transaction_count) }
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
                    h1 class="text-xl font-bold" { "Categories" }

                    a href=(new_category_route) class=(LINK_STYLE) { "Create Category" }
                }

                table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Transactions" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                        }
                    }

                    tbody
                    {
                        @for row in rows {
                            (table_row(row))
                        }

                        @if rows.is_empty() {
                            tr
                            {
                                td colspan="3" class="px-6 py-4 text-center"
                                {
                                    "No categories created yet. "
                                    a href=(new_category_route) class=(LINK_STYLE)
                                    {
                                        "Create your first category"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Categories", &content)
}
