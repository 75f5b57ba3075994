//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The message sent with every request that fails validation.
pub const VALIDATION_ERROR_MESSAGE: &str = "Validation error";
/// The message sent when a transaction does not exist or belongs to another session.
pub const TRANSACTION_NOT_FOUND_MESSAGE: &str = "Transaction not found";
/// The message sent when a read request has no session cookie.
pub const MISSING_SESSION_MESSAGE: &str = "Unauthorized.";

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request body was missing, was not JSON, or did not match the
    /// expected schema (missing fields, wrong types, unknown transaction type).
    ///
    /// The string holds a description of the problem that is safe to show
    /// to the client.
    #[error("invalid request body: {0}")]
    InvalidRequestBody(String),

    /// A transaction was submitted with an empty title.
    #[error("title cannot be empty")]
    EmptyTitle,

    /// A transaction was submitted with a negative amount.
    ///
    /// The direction of a transaction is given by its type, so amounts must
    /// be magnitudes.
    #[error("amount must not be negative, got {0}")]
    NegativeAmount(f64),

    /// The transaction ID in the request path is not a valid UUID.
    #[error("\"{0}\" is not a valid transaction ID")]
    InvalidTransactionId(String),

    /// A request that needs a session was made without the session cookie.
    #[error("no session cookie in the request")]
    MissingSession,

    /// The requested transaction was not found.
    ///
    /// This is also returned when the transaction exists but was created by
    /// a different session, so clients cannot probe for other sessions' IDs.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested transaction could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidRequestBody(_)
            | Error::EmptyTitle
            | Error::NegativeAmount(_)
            | Error::InvalidTransactionId(_) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "message": VALIDATION_ERROR_MESSAGE,
                    "detail": self.to_string(),
                })),
            )
                .into_response(),
            Error::MissingSession => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": MISSING_SESSION_MESSAGE })),
            )
                .into_response(),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": TRANSACTION_NOT_FOUND_MESSAGE })),
            )
                .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                internal_server_error()
            }
        }
    }
}

/// The response sent for any error the client cannot fix.
pub(crate) fn internal_server_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "Internal server error" })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
    use serde_json::{Value, json};

    use crate::Error;

    async fn render(error: Error) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn not_found_uses_fixed_message() {
        let (status, body) = render(Error::NotFound).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "Transaction not found" }));
    }

    #[tokio::test]
    async fn validation_errors_are_bad_requests_with_detail() {
        let (status, body) = render(Error::NegativeAmount(-5.0)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Validation error");
        assert_eq!(body["detail"], "amount must not be negative, got -5");
    }

    #[tokio::test]
    async fn missing_session_is_unauthorized() {
        let (status, body) = render(Error::MissingSession).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "message": "Unauthorized." }));
    }

    #[tokio::test]
    async fn internal_errors_do_not_leak_details() {
        let (status, body) = render(Error::DatabaseLockError).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": "Internal server error" }));
    }

    #[test]
    fn no_rows_converts_to_not_found() {
        assert_eq!(
            Error::from(rusqlite::Error::QueryReturnedNoRows),
            Error::NotFound
        );
    }
}
