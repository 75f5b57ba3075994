//! A small personal finance ledger served over HTTP.
//!
//! Clients record credits and debits against an anonymous session, list
//! them, fetch a single transaction and ask for the running balance. The
//! session is nothing more than a random token stored in the `session_id`
//! cookie: whoever holds the cookie owns the transactions created with it.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod config;
mod database_id;
mod db;
pub mod endpoints;
mod error;
mod json;
mod logging;
mod routing;
mod session;
mod transaction;

pub use app_state::AppState;
pub use config::{Config, DatabaseClient, RuntimeMode, mode_from_env};
pub use database_id::TransactionId;
pub use db::initialize as initialize_db;
pub use error::Error;
pub use logging::logging_middleware;
pub use routing::build_router;
pub use session::{COOKIE_SESSION_ID, SESSION_COOKIE_DURATION, SessionId};
pub use transaction::{NewTransaction, Summary, Transaction, TransactionType};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
