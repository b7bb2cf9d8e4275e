//! Transactions listing page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::{OffsetDateTime, macros::format_description};

use crate::{
    AppState,
    app_state::lock_connection,
    endpoints,
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, edit_delete_action_links, format_currency,
    },
    navigation::NavBar,
    transaction::db::{TransactionRow, get_transaction_rows},
};

/// The state needed for the transactions listing page.
#[derive(Debug, Clone)]
pub struct TransactionsPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the transactions listing page, most recent first.
pub async fn get_transactions_page(State(state): State<TransactionsPageState>) -> Response {
    let rows = lock_connection(&state.db_connection)
        .and_then(|connection| get_transaction_rows(&connection));

    match rows {
        Ok(rows) => transactions_view(&rows).into_response(),
        Err(error) => error.into_page_response(),
    }
}

fn format_time(time: OffsetDateTime) -> String {
    time.format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
        .unwrap_or_else(|error| {
            tracing::error!("Could not format transaction time {time}: {error}");
            String::new()
        })
}

fn transactions_view(rows: &[TransactionRow]) -> Markup {
    let new_transaction_route = endpoints::NEW_TRANSACTION_VIEW;
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let table_row = |row: &TransactionRow| {
        let transaction = &row.transaction;
        let edit_url = endpoints::format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id);
        let delete_url = endpoints::format_endpoint(endpoints::TRANSACTION_VIEW, transaction.id);
        let formatted_time = format_time(transaction.time);
        let amount_style = if transaction.signed_amount().is_sign_negative() {
            "text-red-600 dark:text-red-400"
        } else {
            "text-green-600 dark:text-green-400"
        };

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE) { time datetime=(formatted_time) { (formatted_time) } }
                td class=(TABLE_CELL_STYLE) { (row.user_name) }
                td class=(TABLE_CELL_STYLE) { (row.category_name) }
                td class=(TABLE_CELL_STYLE) { (transaction.transaction_type) }
                td class={ (TABLE_CELL_STYLE) " " (amount_style) }
                {
                    (format_currency(transaction.signed_amount()))
                }
                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex gap-4"
                    {
                        (edit_delete_action_links(
                            &edit_url,
                            &delete_url,
                            "Are you sure you want to delete this transaction?",
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
                    h1 class="text-xl font-bold" { "Transactions" }

                    a href=(new_transaction_route) class=(LINK_STYLE) { "Create Transaction" }
                }

                table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Time (UTC)" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "User" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
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
                                td colspan="6" class="px-6 py-4 text-center"
                                {
                                    "No transactions recorded yet. "
                                    a href=(new_transaction_route) class=(LINK_STYLE)
                                    {
                                        "Record your first transaction"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Transactions", &content)
}
