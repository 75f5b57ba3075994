//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
};
use axum_extra::extract::CookieJar;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::{
    AppState, Error,
    json::ValidatedJson,
    session::resolve_session,
    transaction::{Transaction, TransactionType, core::create_transaction, state::lock_connection},
};

/// The message sent back when a transaction has been saved.
pub const TRANSACTION_CREATED_MESSAGE: &str = "Transaction created successfully";

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// How long a newly issued session cookie stays valid.
    pub session_cookie_duration: Duration,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            session_cookie_duration: state.session_cookie_duration,
        }
    }
}

/// The JSON body for creating a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTransactionBody {
    /// Text describing the transaction.
    pub title: String,
    /// How much money the transaction was for, always zero or more.
    pub amount: f64,
    /// Whether the money came in or went out.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

/// A message confirming the request succeeded.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    /// The confirmation text.
    pub message: String,
}

/// A route handler for creating a new transaction.
///
/// Starts a new session if the client did not send a session cookie. The
/// session cookie is only sent back once the transaction has been saved.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    jar: CookieJar,
    ValidatedJson(body): ValidatedJson<CreateTransactionBody>,
) -> Result<(StatusCode, CookieJar, Json<MessageResponse>), Error> {
    let (jar, session_id) = resolve_session(jar, state.session_cookie_duration);

    let transaction = Transaction::build(
        &body.title,
        body.amount,
        body.transaction_type,
        session_id,
    )?;

    let connection = lock_connection(&state.db_connection)?;
    let transaction = create_transaction(transaction, &connection).inspect_err(|error| {
        tracing::error!("could not create transaction: {error}");
    })?;
    tracing::debug!("created transaction {}", transaction.id);

    Ok((
        StatusCode::CREATED,
        jar,
        Json(MessageResponse {
            message: TRANSACTION_CREATED_MESSAGE.to_owned(),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode, response::IntoResponse};
    use axum_extra::extract::{CookieJar, cookie::Cookie};
    use rusqlite::Connection;

    use crate::{
        Error,
        db::initialize,
        json::ValidatedJson,
        session::{COOKIE_SESSION_ID, SESSION_COOKIE_DURATION, SessionId},
        transaction::{
            TransactionType, count_transactions,
            create_endpoint::{CreateTransactionBody, CreateTransactionState},
            create_transaction_endpoint, get_transactions_for_session,
        },
    };

    fn get_test_state() -> CreateTransactionState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        CreateTransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
            session_cookie_duration: SESSION_COOKIE_DURATION,
        }
    }

    fn body(title: &str, amount: f64, transaction_type: TransactionType) -> CreateTransactionBody {
        CreateTransactionBody {
            title: title.to_owned(),
            amount,
            transaction_type,
        }
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let state = get_test_state();

        let (status, jar, _) = create_transaction_endpoint(
            State(state.clone()),
            CookieJar::new(),
            ValidatedJson(body("test transaction", 12.3, TransactionType::Credit)),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        let session_id =
            SessionId::from_token(jar.get(COOKIE_SESSION_ID).unwrap().value()).unwrap();
        let connection = state.db_connection.lock().unwrap();
        let transactions = get_transactions_for_session(&session_id, &connection).unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].title, "test transaction");
        assert_eq!(transactions[0].amount, 12.3);
    }

    #[tokio::test]
    async fn debit_is_saved_as_negative_amount() {
        let state = get_test_state();
        let jar = CookieJar::new().add(Cookie::new(COOKIE_SESSION_ID, "known-session"));

        create_transaction_endpoint(
            State(state.clone()),
            jar,
            ValidatedJson(body("Rent", 2000.0, TransactionType::Debit)),
        )
        .await
        .unwrap();

        let session_id = SessionId::from_token("known-session").unwrap();
        let connection = state.db_connection.lock().unwrap();
        let transactions = get_transactions_for_session(&session_id, &connection).unwrap();
        assert_eq!(transactions[0].amount, -2000.0);
    }

    #[tokio::test]
    async fn invalid_transaction_is_not_saved_and_issues_no_cookie() {
        let state = get_test_state();

        let result = create_transaction_endpoint(
            State(state.clone()),
            CookieJar::new(),
            ValidatedJson(body("", 10.0, TransactionType::Credit)),
        )
        .await;

        let error = result.unwrap_err();
        assert_eq!(error, Error::EmptyTitle);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().get("set-cookie").is_none());
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_transactions(&connection).unwrap(), 0);
    }

    #[tokio::test]
    async fn negative_amount_is_rejected() {
        let state = get_test_state();

        let result = create_transaction_endpoint(
            State(state.clone()),
            CookieJar::new(),
            ValidatedJson(body("Refund", -5.0, TransactionType::Credit)),
        )
        .await;

        assert_eq!(result.unwrap_err(), Error::NegativeAmount(-5.0));
    }
}
