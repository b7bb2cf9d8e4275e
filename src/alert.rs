//! Alert messages for reporting the outcome of form submissions and deletions.
//!
//! Alerts are rendered as an out-of-band swap that replaces the page's alert container,
//! so they show up regardless of the element the request was targeting.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// A dismissable success or error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    /// A success message on its own.
    SuccessSimple { message: String },
    /// An error message with details on what went wrong or how to fix it.
    Error { message: String, details: String },
}

impl Alert {
    /// Render the alert as an out-of-band replacement for the alert container.
    pub fn into_html(self) -> Markup {
        let (is_error, message, details) = match self {
            Alert::SuccessSimple { message } => (false, message, None),
            Alert::Error { message, details } => (true, message, Some(details)),
        };

        let style = if is_error {
            "p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 dark:bg-gray-800 dark:text-red-400"
        } else {
            "p-4 mb-4 text-sm text-green-800 rounded-lg bg-green-50 dark:bg-gray-800 dark:text-green-400"
        };

        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div class=(style) role="alert"
                {
                    div class="flex items-start justify-between gap-4"
                    {
                        div
                        {
                            p class="font-medium" { (message) }

                            @if let Some(details) = details.filter(|details| !details.is_empty()) {
                                p class="mt-1" { (details) }
                            }
                        }

                        button
                            type="button"
                            aria-label="Dismiss"
                            class="font-bold"
                            onclick="this.closest('[role=alert]').remove()"
                        {
                            "×"
                        }
                    }
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}
