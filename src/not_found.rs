//! The page to display when a route or entity does not exist.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// A 404 page with a customisable description.
pub struct NotFoundPage<'a> {
    pub description: &'a str,
}

impl Default for NotFoundPage<'_> {
    fn default() -> Self {
        Self {
            description: "Sorry, we couldn't find that page.",
        }
    }
}

impl IntoResponse for NotFoundPage<'_> {
    fn into_response(self) -> Response {
        let page = error_view(
            "Not Found",
            "404",
            self.description,
            "Check the address or head back to the homepage.",
        );

        (StatusCode::NOT_FOUND, Html(page.into_string())).into_response()
    }
}

/// The fallback handler for unknown routes.
pub async fn get_404_not_found() -> Response {
    NotFoundPage::default().into_response()
}
