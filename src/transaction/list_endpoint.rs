//! Defines the endpoint for listing the session's transactions.

use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    session::SessionId,
    transaction::{
        Transaction,
        core::get_transactions_for_session,
        state::{TransactionState, lock_connection},
    },
};

/// The JSON body for a list of transactions.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TransactionsResponse {
    /// The session's transactions, newest first.
    pub transactions: Vec<Transaction>,
}

/// A route handler for listing every transaction created by the session, newest first.
pub async fn get_transactions_endpoint(
    State(state): State<TransactionState>,
    Extension(session_id): Extension<SessionId>,
) -> Result<Json<TransactionsResponse>, Error> {
    let connection = lock_connection(&state.db_connection)?;
    let transactions = get_transactions_for_session(&session_id, &connection)?;

    Ok(Json(TransactionsResponse { transactions }))
}
