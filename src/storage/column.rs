// Model values stored as opaque JSON blobs in a single column

use crate::core::{Address, DecodeError, Transaction};

/// A column value as handed back by a database driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawColumn<'a> {
    Null,
    Integer(i64),
    Real(f64),
    Text(&'a str),
    Bytes(&'a [u8]),
}

/// Types persisted as the JSON encoding of themselves
pub trait ColumnValue: Sized {
    /// Encode for writing into a column
    fn to_column(&self) -> Result<Vec<u8>, DecodeError>;

    /// Decode a column read back from the store; only byte blobs are accepted
    fn from_column(raw: RawColumn<'_>) -> Result<Self, DecodeError>;
}

fn column_bytes<'a>(raw: RawColumn<'a>) -> Result<&'a [u8], DecodeError> {
    match raw {
        RawColumn::Bytes(data) => Ok(data),
        other => {
            log::debug!("Rejecting non-blob column value {:?}", other);
            Err(DecodeError::NotBytes)
        }
    }
}

impl ColumnValue for Address {
    fn to_column(&self) -> Result<Vec<u8>, DecodeError> {
        self.to_json()
    }

    fn from_column(raw: RawColumn<'_>) -> Result<Self, DecodeError> {
        Address::from_json(column_bytes(raw)?)
    }
}

impl ColumnValue for Transaction {
    fn to_column(&self) -> Result<Vec<u8>, DecodeError> {
        self.to_json()
    }

    fn from_column(raw: RawColumn<'_>) -> Result<Self, DecodeError> {
        Transaction::from_json(column_bytes(raw)?)
    }
}
