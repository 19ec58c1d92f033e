// Transaction data structures

use crate::core::{sha256, Address, DecodeError, Hash256, IdGenerator, Serializable, ValidationError};
use crate::core::serialize::read_array;
use serde::{Deserialize, Serialize};
use std::io::Read;
use uuid::Uuid;

/// Transfer of `value` from one address to another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Globally unique identifier, never the nil UUID for a valid transaction
    pub id: Uuid,
    pub recipient_address: Address,
    pub sender_address: Address,
    /// Amount transferred, must be strictly positive
    pub value: f64,
}

impl Transaction {
    /// Create a transaction with a caller-supplied id
    pub fn new(id: Uuid, recipient_address: Address, sender_address: Address, value: f64) -> Self {
        Self {
            id,
            recipient_address,
            sender_address,
            value,
        }
    }

    /// Create a transaction with a fresh id from `ids`
    pub fn with_generator<G: IdGenerator + ?Sized>(
        ids: &mut G,
        recipient_address: Address,
        sender_address: Address,
        value: f64,
    ) -> Self {
        Self::new(ids.next_id(), recipient_address, sender_address, value)
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Check id, both addresses and value, stopping at the first failure
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_nil() {
            return Err(ValidationError::NilTransactionId);
        }

        match self.sender_address.validate() {
            Ok(()) => {}
            Err(ValidationError::EmptyAddressField(field)) => {
                return Err(ValidationError::InvalidSenderAddress(field));
            }
            Err(e) => return Err(e),
        }

        match self.recipient_address.validate() {
            Ok(()) => {}
            Err(ValidationError::EmptyAddressField(field)) => {
                return Err(ValidationError::InvalidRecipientAddress(field));
            }
            Err(e) => return Err(e),
        }

        // Written so that NaN fails too
        if !(self.value > 0.0) {
            return Err(ValidationError::NonPositiveValue);
        }

        Ok(())
    }

    /// SHA-256 of the canonical encoding
    pub fn txid(&self) -> Hash256 {
        sha256(&self.to_bytes())
    }

    /// Encode as JSON; NaN and infinite values have no JSON form
    pub fn to_json(&self) -> Result<Vec<u8>, DecodeError> {
        self.check_finite()?;
        Ok(serde_json::to_vec(self)?)
    }

    pub(crate) fn check_finite(&self) -> Result<(), DecodeError> {
        if self.value.is_finite() {
            Ok(())
        } else {
            Err(DecodeError::Json(format!("Transaction {} has non-finite value {}", self.id, self.value)))
        }
    }

    /// Decode from JSON bytes
    pub fn from_json(data: &[u8]) -> Result<Self, DecodeError> {
        Ok(serde_json::from_slice(data)?)
    }
}

impl Serializable for Transaction {
    fn encode(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.id.as_bytes());
        self.recipient_address.encode(buf);
        self.sender_address.encode(buf);
        buf.extend_from_slice(&self.value.to_bits().to_le_bytes());
    }

    fn decode<R: Read + ?Sized>(reader: &mut R) -> Result<Self, DecodeError> {
        let id = Uuid::from_bytes(read_array::<16, _>(reader)?);
        let recipient_address = Address::decode(reader)?;
        let sender_address = Address::decode(reader)?;
        let value = f64::from_bits(u64::from_le_bytes(read_array::<8, _>(reader)?));

        Ok(Self {
            id,
            recipient_address,
            sender_address,
            value,
        })
    }
}
