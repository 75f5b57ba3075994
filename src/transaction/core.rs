//! Defines the core data models and database queries for transactions.

use rusqlite::{Connection, Row, types::Type};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use uuid::Uuid;

use crate::{Error, database_id::TransactionId, session::SessionId};

// ============================================================================
// MODELS
// ============================================================================

/// Money that was either earned (credit) or spent (debit) by a session.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A text label for what the transaction was for.
    pub title: String,
    /// The signed amount of money: positive for credits, negative for debits.
    pub amount: f64,
    /// The session that created the transaction.
    pub session_id: SessionId,
    /// When the transaction was recorded, set by the database.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Transaction {
    /// Start a new transaction for `session_id`.
    ///
    /// Shortcut for [NewTransaction::new] for discoverability.
    ///
    /// # Errors
    /// See [NewTransaction::new].
    pub fn build(
        title: &str,
        amount: f64,
        transaction_type: TransactionType,
        session_id: SessionId,
    ) -> Result<NewTransaction, Error> {
        NewTransaction::new(title, amount, transaction_type, session_id)
    }
}

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in, stored as a positive amount.
    Credit,
    /// Money going out, stored as a negative amount.
    Debit,
}

impl TransactionType {
    /// Apply the direction of the transaction to an amount of money.
    pub fn signed_amount(self, amount: f64) -> f64 {
        match self {
            TransactionType::Credit => amount,
            TransactionType::Debit => -amount,
        }
    }
}

/// A validated transaction that has not been saved yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    title: String,
    amount: f64,
    session_id: SessionId,
}

impl NewTransaction {
    /// Create a transaction of `amount` in the direction given by `transaction_type`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyTitle] if `title` is empty or only whitespace,
    /// - or [Error::NegativeAmount] if `amount` is less than zero.
    pub fn new(
        title: &str,
        amount: f64,
        transaction_type: TransactionType,
        session_id: SessionId,
    ) -> Result<Self, Error> {
        if title.trim().is_empty() {
            return Err(Error::EmptyTitle);
        }

        if amount < 0.0 {
            return Err(Error::NegativeAmount(amount));
        }

        Ok(Self {
            title: title.to_owned(),
            amount: transaction_type.signed_amount(amount),
            session_id,
        })
    }

    /// The amount that will be stored, with the sign applied.
    pub fn amount(&self) -> f64 {
        self.amount
    }
}

/// The net balance of a session's transactions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// The sum of the signed amounts. Zero when there are no transactions.
    pub amount: f64,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Save a new transaction under a freshly generated ID.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let id = Uuid::new_v4();

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (id, title, amount, session_id)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, title, amount, session_id, created_at",
        )?
        .query_row(
            (
                id.to_string(),
                transaction.title,
                transaction.amount,
                transaction.session_id,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve all transactions created by `session_id`, newest first.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_transactions_for_session(
    session_id: &SessionId,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, title, amount, session_id, created_at FROM \"transaction\"
             WHERE session_id = :session_id
             ORDER BY created_at DESC, rowid DESC",
        )?
        .query_map(&[(":session_id", session_id)], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Retrieve the transaction `id` if it was created by `session_id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a transaction of this session,
///   including transactions that belong to another session,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(
    id: TransactionId,
    session_id: &SessionId,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, title, amount, session_id, created_at FROM \"transaction\"
             WHERE id = ?1 AND session_id = ?2",
        )?
        .query_one((id.to_string(), session_id), map_transaction_row)?;

    Ok(transaction)
}

/// Sum the signed amounts of the transactions created by `session_id`.
///
/// A session without transactions has a balance of zero.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_summary(session_id: &SessionId, connection: &Connection) -> Result<Summary, Error> {
    let amount = connection.query_row(
        "SELECT COALESCE(SUM(amount), 0.0) FROM \"transaction\" WHERE session_id = :session_id",
        &[(":session_id", session_id)],
        |row| row.get(0),
    )?;

    Ok(Summary { amount })
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    // created_at keeps milliseconds so that listings have a stable order.
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id TEXT PRIMARY KEY NOT NULL,
                title TEXT NOT NULL,
                amount REAL NOT NULL,
                session_id TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_session_created
         ON \"transaction\"(session_id, created_at);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let raw_id: String = row.get(0)?;
    let id = Uuid::parse_str(&raw_id)
        .map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(error))
        })?;
    let title = row.get(1)?;
    let amount = row.get(2)?;
    let session_id = row.get(3)?;
    let raw_created_at: String = row.get(4)?;
    let created_at = OffsetDateTime::parse(&raw_created_at, &Rfc3339)
        .map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(error))
        })?;

    Ok(Transaction {
        id,
        title,
        amount,
        session_id,
        created_at,
    })
}

// ============================================================================
// TESTS
// ============================================================================
