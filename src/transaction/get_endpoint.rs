//! Defines the endpoint for fetching a single transaction.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::parse_transaction_id,
    session::SessionId,
    transaction::{
        Transaction,
        core::get_transaction,
        state::{TransactionState, lock_connection},
    },
};

/// The JSON body for a single transaction.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TransactionResponse {
    /// The requested transaction.
    pub transaction: Transaction,
}

/// A route handler for getting one of the session's transactions by its ID.
///
/// Responds with 404 both when the ID does not exist and when it belongs to
/// another session.
pub async fn get_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(session_id): Extension<SessionId>,
    Path(transaction_id): Path<String>,
) -> Result<Json<TransactionResponse>, Error> {
    let transaction_id = parse_transaction_id(&transaction_id)?;

    let connection = lock_connection(&state.db_connection)?;
    let transaction = get_transaction(transaction_id, &session_id, &connection)?;

    Ok(Json(TransactionResponse { transaction }))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Extension,
        extract::{Path, State},
    };
    use rusqlite::Connection;
    use uuid::Uuid;

    use crate::{
        Error,
        db::initialize,
        session::SessionId,
        transaction::{
            Transaction, TransactionType, create_transaction, get_transaction_endpoint,
            state::TransactionState,
        },
    };

    fn get_test_state() -> TransactionState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        TransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    fn insert(state: &TransactionState, session_id: &SessionId) -> Transaction {
        let connection = state.db_connection.lock().unwrap();
        let new_transaction =
            Transaction::build("Groceries", 42.0, TransactionType::Debit, session_id.clone())
                .unwrap();

        create_transaction(new_transaction, &connection).unwrap()
    }

    #[tokio::test]
    async fn returns_owned_transaction() {
        let state = get_test_state();
        let session_id = SessionId::generate();
        let want = insert(&state, &session_id);

        let response = get_transaction_endpoint(
            State(state),
            Extension(session_id),
            Path(want.id.to_string()),
        )
        .await
        .unwrap();

        assert_eq!(response.0.transaction, want);
    }

    #[tokio::test]
    async fn other_sessions_transaction_is_not_found() {
        let state = get_test_state();
        let transaction = insert(&state, &SessionId::generate());

        let result = get_transaction_endpoint(
            State(state),
            Extension(SessionId::generate()),
            Path(transaction.id.to_string()),
        )
        .await;

        assert_eq!(result.unwrap_err(), Error::NotFound);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let state = get_test_state();

        let result = get_transaction_endpoint(
            State(state),
            Extension(SessionId::generate()),
            Path(Uuid::new_v4().to_string()),
        )
        .await;

        assert_eq!(result.unwrap_err(), Error::NotFound);
    }

    #[tokio::test]
    async fn malformed_id_is_rejected() {
        let state = get_test_state();

        let result = get_transaction_endpoint(
            State(state),
            Extension(SessionId::generate()),
            Path("not-a-uuid".to_owned()),
        )
        .await;

        assert_eq!(
            result.unwrap_err(),
            Error::InvalidTransactionId("not-a-uuid".to_owned())
        );
    }
}
