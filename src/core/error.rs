// Validation and decoding errors

use std::fmt;

/// Which structural check a model value failed
///
/// `is_valid()` collapses these into a boolean; `validate()` returns the first
/// failing check for callers that want diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Address field (by JSON name) is empty
    EmptyAddressField(&'static str),
    /// Transaction id is the nil UUID
    NilTransactionId,
    /// Sender address failed; carries the empty field
    InvalidSenderAddress(&'static str),
    /// Recipient address failed; carries the empty field
    InvalidRecipientAddress(&'static str),
    /// Transaction value is zero, negative or NaN
    NonPositiveValue,
    /// Previous block hash is all zeroes
    ZeroPreviousHash,
    ZeroTimestamp,
    ZeroNBits,
    EmptyNonce,
    /// Block has no transactions
    NoTransactions,
    /// A transaction inside the block is invalid
    InvalidTransaction {
        index: usize,
        reason: Box<ValidationError>,
    },
    /// Stored merkle root does not commit to the block's transactions
    MerkleRootMismatch,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ValidationError::EmptyAddressField(field) => write!(f, "Address field '{}' is empty", field),
            ValidationError::NilTransactionId => write!(f, "Transaction id is nil"),
            ValidationError::InvalidSenderAddress(field) => {
                write!(f, "Sender address field '{}' is empty", field)
            }
            ValidationError::InvalidRecipientAddress(field) => {
                write!(f, "Recipient address field '{}' is empty", field)
            }
            ValidationError::NonPositiveValue => write!(f, "Transaction value must be greater than zero"),
            ValidationError::ZeroPreviousHash => write!(f, "Previous block hash is zero"),
            ValidationError::ZeroTimestamp => write!(f, "Timestamp is zero"),
            ValidationError::ZeroNBits => write!(f, "nBits is zero"),
            ValidationError::EmptyNonce => write!(f, "Nonce is empty"),
            ValidationError::NoTransactions => write!(f, "Block has no transactions"),
            ValidationError::InvalidTransaction { index, reason } => {
                write!(f, "Transaction {} is invalid: {}", index, reason)
            }
            ValidationError::MerkleRootMismatch => write!(f, "Invalid merkle root"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Raised when a stored or transmitted payload cannot be turned back into a model value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Payload is not valid JSON for the target shape
    Json(String),
    /// Canonical binary payload is truncated, malformed or has trailing bytes
    Binary(String),
    /// Column value was NULL or not a byte blob
    NotBytes,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DecodeError::Json(msg) => write!(f, "Invalid JSON payload: {}", msg),
            DecodeError::Binary(msg) => write!(f, "Invalid binary payload: {}", msg),
            DecodeError::NotBytes => write!(f, "Type assertion to bytes failed"),
        }
    }
}

impl std::error::Error for DecodeError {}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Json(err.to_string())
    }
}

impl From<std::io::Error> for DecodeError {
    fn from(err: std::io::Error) -> Self {
        DecodeError::Binary(err.to_string())
    }
}
