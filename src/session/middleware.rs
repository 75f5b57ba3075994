//! Middleware that requires requests to carry a session cookie.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use crate::session::cookie::get_session_from_cookies;

/// Middleware function that checks for a session cookie.
/// The [crate::SessionId] is placed into the request and the request executed normally if the
/// cookie is present, otherwise a 401 response is returned.
///
/// **Note**: Route handlers can use the function argument `Extension(session_id): Extension<SessionId>` to receive the session.
pub async fn session_guard(jar: CookieJar, mut request: Request, next: Next) -> Response {
    let session_id = match get_session_from_cookies(&jar) {
        Ok(session_id) => session_id,
        Err(error) => {
            tracing::debug!(
                "rejecting {} {}: {error}",
                request.method(),
                request.uri().path()
            );
            return error.into_response();
        }
    };

    request.extensions_mut().insert(session_id);
    next.run(request).await
}
