//! Transaction management for the ledger.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `NewTransaction` for creating transactions
//! - Database functions for storing, querying and summing transactions
//! - Route handlers for the transaction endpoints

mod core;
mod create_endpoint;
mod get_endpoint;
mod list_endpoint;
mod state;
mod summary_endpoint;

pub use core::{NewTransaction, Summary, Transaction, TransactionType, create_transaction_table};
pub use create_endpoint::create_transaction_endpoint;
pub use get_endpoint::get_transaction_endpoint;
pub use list_endpoint::get_transactions_endpoint;
pub use summary_endpoint::get_summary_endpoint;

#[cfg(test)]
pub use core::{
    count_transactions, create_transaction, get_summary, get_transaction,
    get_transactions_for_session,
};
#[cfg(test)]
pub use create_endpoint::TRANSACTION_CREATED_MESSAGE;
#[cfg(test)]
pub use get_endpoint::TransactionResponse;
#[cfg(test)]
pub use list_endpoint::TransactionsResponse;
#[cfg(test)]
pub use summary_endpoint::SummaryResponse;
