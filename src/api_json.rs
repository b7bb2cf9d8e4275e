//! A JSON extractor whose rejections use the application's error body.

use axum::extract::FromRequest;

use crate::Error;

/// Like [axum::Json], but a body that is not valid JSON for `T` is rejected with
/// [Error::InvalidRequestBody] instead of axum's plain text rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);
