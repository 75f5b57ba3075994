//! Anonymous sessions identified by a random token kept in a cookie.
//!
//! There is no server-side session store. Whoever presents a session token
//! can read and add to the transactions created with it.

mod cookie;
mod middleware;
mod session_id;

pub use cookie::{COOKIE_SESSION_ID, SESSION_COOKIE_DURATION, resolve_session};
pub use middleware::session_guard;
pub use session_id::SessionId;

#[cfg(test)]
pub use cookie::{get_session_from_cookies, set_session_cookie};
