//! Database ID type definition.

use uuid::{Uuid, fmt::Hyphenated};

/// The ID of a transaction, a random (v4) UUID assigned when the transaction is created.
pub type TransactionId = Uuid;

/// Parse a transaction ID from its hyphenated text form, e.g. from a request path.
///
/// # Errors
/// Returns an [crate::Error::InvalidTransactionId] if `text` is not a UUID in
/// the 8-4-4-4-12 hyphenated form. The simple, braced and URN forms are rejected.
pub fn parse_transaction_id(text: &str) -> Result<TransactionId, crate::Error> {
    let invalid = || crate::Error::InvalidTransactionId(text.to_owned());

    // Of the forms `Uuid::parse_str` accepts, only the hyphenated one is 36 bytes long.
    if text.len() != Hyphenated::LENGTH {
        return Err(invalid());
    }

    Uuid::parse_str(text).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use crate::Error;

    use super::parse_transaction_id;

    #[test]
    fn parses_hyphenated_uuid() {
        let id = parse_transaction_id("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();

        assert_eq!(id.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }

    #[test]
    fn parses_uppercase_hyphenated_uuid() {
        let id = parse_transaction_id("67E55044-10B1-426F-9247-BB680E5FE0C8").unwrap();

        assert_eq!(id.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }

    #[test]
    fn rejects_non_hyphenated_forms() {
        for text in [
            "67e5504410b1426f9247bb680e5fe0c8",
            "{67e55044-10b1-426f-9247-bb680e5fe0c8}",
            "urn:uuid:67e55044-10b1-426f-9247-bb680e5fe0c8",
        ] {
            assert_eq!(
                parse_transaction_id(text),
                Err(Error::InvalidTransactionId(text.to_owned()))
            );
        }
    }

    #[test]
    fn rejects_malformed_id() {
        assert_eq!(
            parse_transaction_id("42"),
            Err(Error::InvalidTransactionId("42".to_owned()))
        );
    }
}
