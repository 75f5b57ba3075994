//! Application router configuration with session-protected and open route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;

use crate::{
    AppState, endpoints,
    logging::logging_middleware,
    session::session_guard,
    transaction::{
        create_transaction_endpoint, get_summary_endpoint, get_transaction_endpoint,
        get_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    // Creating a transaction starts a session, so it must not require one.
    let open_routes =
        Router::new().route(endpoints::TRANSACTIONS, post(create_transaction_endpoint));

    let session_routes = Router::new()
        .route(endpoints::TRANSACTIONS, get(get_transactions_endpoint))
        .route(endpoints::TRANSACTIONS_SUMMARY, get(get_summary_endpoint))
        .route(endpoints::TRANSACTION, get(get_transaction_endpoint))
        .route_layer(middleware::from_fn(session_guard));

    session_routes
        .merge(open_routes)
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

async fn get_404_not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Not found" }))).into_response()
}
