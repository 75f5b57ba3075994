//! Defines the session token handed out to anonymous clients.

use std::fmt::Display;

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An opaque token that correlates anonymous requests with the transactions
/// they created.
///
/// Route handlers receive the caller's session through the request
/// extensions, e.g. `Extension(session_id): Extension<SessionId>`, and never
/// touch the cookie directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Create a new, random session token.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap a token presented by a client.
    ///
    /// Returns `None` for a blank token, which is treated the same as no token.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();

        if token.is_empty() {
            None
        } else {
            Some(Self(token.to_owned()))
        }
    }

    /// The token as it is stored in the cookie and the database.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ToSql for SessionId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.as_str()))
    }
}

impl FromSql for SessionId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        String::column_result(value).map(Self)
    }
}
