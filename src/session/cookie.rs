//! Defines functions for reading and issuing the session cookie.

use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use time::Duration;

use crate::{Error, session::SessionId};

/// The name of the cookie holding the session token.
pub const COOKIE_SESSION_ID: &str = "session_id";
/// How long a newly issued session cookie is kept by the client.
pub const SESSION_COOKIE_DURATION: Duration = Duration::days(7);

/// Add a session cookie holding `session_id` to the cookie jar.
///
/// The cookie applies to every path and expires after `duration`.
///
/// Returns the cookie jar with the cookie added.
pub fn set_session_cookie(jar: CookieJar, session_id: &SessionId, duration: Duration) -> CookieJar {
    jar.add(
        Cookie::build((COOKIE_SESSION_ID, session_id.as_str().to_owned()))
            .path("/")
            .max_age(duration)
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// Get the session presented by the client.
///
/// # Errors
///
/// Returns [Error::MissingSession] if there is no session cookie or it is blank.
pub fn get_session_from_cookies(jar: &CookieJar) -> Result<SessionId, Error> {
    jar.get(COOKIE_SESSION_ID)
        .and_then(|cookie| SessionId::from_token(cookie.value_trimmed()))
        .ok_or(Error::MissingSession)
}

/// Reuse the client's session, or start a new one if the client does not have one.
///
/// A new session is sent back to the client as a cookie that lasts for
/// `duration`. The returned jar must be included in the response for that
/// to happen. An existing session cookie is left untouched.
pub fn resolve_session(jar: CookieJar, duration: Duration) -> (CookieJar, SessionId) {
    match get_session_from_cookies(&jar) {
        Ok(session_id) => (jar, session_id),
        Err(_) => {
            let session_id = SessionId::generate();
            tracing::debug!("issuing new session {session_id}");

            (set_session_cookie(jar, &session_id, duration), session_id)
        }
    }
}
