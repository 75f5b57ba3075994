use std::{net::SocketAddr, process::ExitCode};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use session_ledger::{
    AppState, Config, DatabaseClient, RuntimeMode, build_router, graceful_shutdown, mode_from_env,
};

#[tokio::main]
async fn main() -> ExitCode {
    let mode = mode_from_env();
    // A missing dotenv file is fine, the variables may come from the environment instead.
    dotenv::from_filename(mode.dotenv_file()).ok();

    let config = Config::parse();
    setup_logging(config.mode);
    tracing::info!("starting in {} mode", config.mode);

    let conn = match open_database(&config) {
        Ok(conn) => conn,
        Err(error) => {
            tracing::error!("could not open database {}: {error}", config.database_url);
            return ExitCode::FAILURE;
        }
    };

    let state = match AppState::new(conn) {
        Ok(state) => state,
        Err(error) => {
            tracing::error!("could not initialize database: {error}");
            return ExitCode::FAILURE;
        }
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state));

    tracing::info!("HTTP server listening on {}", addr);
    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("server error: {error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn open_database(config: &Config) -> Result<Connection, rusqlite::Error> {
    match config.database_client {
        DatabaseClient::Sqlite => Connection::open(&config.database_url),
    }
}

fn setup_logging(mode: RuntimeMode) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(mode.default_log_directive()));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
