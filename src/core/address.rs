// Postal address attached to both ends of a transaction

use crate::core::{DecodeError, Serializable, ValidationError};
use crate::core::serialize::{read_var_str, write_var_str};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Postal address value object
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub name: String,
    pub street: String,
    pub house_number: String,
    pub town: String,
}

impl Address {
    /// Create a new address
    pub fn new(
        name: impl Into<String>,
        street: impl Into<String>,
        house_number: impl Into<String>,
        town: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            street: street.into(),
            house_number: house_number.into(),
            town: town.into(),
        }
    }

    /// True iff every field is non-empty
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Report the first empty field, in JSON key order
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("name", &self.name),
            ("street", &self.street),
            ("houseNumber", &self.house_number),
            ("town", &self.town),
        ];
        match fields.iter().find(|(_, value)| value.is_empty()) {
            Some((field, _)) => Err(ValidationError::EmptyAddressField(*field)),
            None => Ok(()),
        }
    }

    /// Encode as JSON
    pub fn to_json(&self) -> Result<Vec<u8>, DecodeError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode from JSON bytes
    pub fn from_json(data: &[u8]) -> Result<Self, DecodeError> {
        Ok(serde_json::from_slice(data)?)
    }
}

impl Serializable for Address {
    fn encode(&self, buf: &mut Vec<u8>) {
        write_var_str(buf, &self.name);
        write_var_str(buf, &self.street);
        write_var_str(buf, &self.house_number);
        write_var_str(buf, &self.town);
    }

    fn decode<R: Read + ?Sized>(reader: &mut R) -> Result<Self, DecodeError> {
        Ok(Self {
            name: read_var_str(reader)?,
            street: read_var_str(reader)?,
            house_number: read_var_str(reader)?,
            town: read_var_str(reader)?,
        })
    }
}
