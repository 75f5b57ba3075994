//! Middleware for logging requests and responses.

use axum::{extract::Request, middleware::Next, response::Response};
use tokio::time::Instant;

/// Log the method and URI of each request, and the status of its response.
///
/// Both are logged at the `info` level. Server errors are also logged at the
/// `warn` level so they stand out when the log level is raised.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    tracing::info!("[{method}] {uri}");

    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed = start.elapsed();

    let status = response.status();
    if status.is_server_error() {
        tracing::warn!("[{method}] {uri} failed with {status} after {elapsed:?}");
    } else {
        tracing::info!("[{method}] {uri} -> {status} in {elapsed:?}");
    }

    response
}
