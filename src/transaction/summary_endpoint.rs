//! Defines the endpoint for the net balance of the session's transactions.

use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    session::SessionId,
    transaction::{
        Summary,
        core::get_summary,
        state::{TransactionState, lock_connection},
    },
};

/// The JSON body for the session's balance.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SummaryResponse {
    /// The net balance.
    pub summary: Summary,
}

/// A route handler for the sum of the session's credits and debits.
pub async fn get_summary_endpoint(
    State(state): State<TransactionState>,
    Extension(session_id): Extension<SessionId>,
) -> Result<Json<SummaryResponse>, Error> {
    let connection = lock_connection(&state.db_connection)?;
    let summary = get_summary(&session_id, &connection)?;

    Ok(Json(SummaryResponse { summary }))
}
