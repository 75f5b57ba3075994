//! A JSON body extractor that reports rejections with the app's [Error] type.

use axum::{extract::FromRequest, extract::rejection::JsonRejection};

use crate::Error;

/// Works like [axum::Json], but a body that is not valid JSON or does not
/// match `T` is rejected with [Error::InvalidRequestBody] (400) instead of
/// axum's plain text rejections.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ValidatedJson<T>(pub T);

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("rejected request body: {rejection}");
        Error::InvalidRequestBody(rejection.body_text())
    }
}
