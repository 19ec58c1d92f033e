// Canonical binary encoding for the ledger models
//
// Every digest in this crate is taken over this encoding, so it is part of the
// wire contract: integers little-endian, strings and byte strings prefixed
// with a VarInt length, sequences prefixed with a VarInt count.

use std::io::{self, Cursor, Read};
use crate::core::DecodeError;

/// Types with a canonical byte encoding
pub trait Serializable: Sized {
    /// Append the canonical encoding to `buf`
    fn encode(&self, buf: &mut Vec<u8>);

    /// Read one value from the front of `reader`
    fn decode<R: Read + ?Sized>(reader: &mut R) -> Result<Self, DecodeError>;

    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode(&mut buf);
        buf
    }

    /// Decode a whole payload; leftover bytes are an error
    fn from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        let mut cursor = Cursor::new(data);
        let value = Self::decode(&mut cursor)?;
        let consumed = cursor.position() as usize;
        if consumed != data.len() {
            return Err(DecodeError::Binary(format!(
                "{} trailing bytes after value",
                data.len() - consumed
            )));
        }
        Ok(value)
    }
}

/// Write a variable-length integer (VarInt)
/// Same compact format Bitcoin uses for lengths and counts
pub fn write_varint(buf: &mut Vec<u8>, value: u64) {
    match value {
        0..=0xfc => {
            buf.push(value as u8);
        }
        0xfd..=0xffff => {
            buf.push(0xfd);
            buf.extend_from_slice(&(value as u16).to_le_bytes());
        }
        0x10000..=0xffffffff => {
            buf.push(0xfe);
            buf.extend_from_slice(&(value as u32).to_le_bytes());
        }
        _ => {
            buf.push(0xff);
            buf.extend_from_slice(&value.to_le_bytes());
        }
    }
}

/// Read a variable-length integer (VarInt)
pub fn read_varint<R: Read + ?Sized>(reader: &mut R) -> io::Result<u64> {
    let mut first_byte = [0u8; 1];
    reader.read_exact(&mut first_byte)?;

    match first_byte[0] {
        0..=0xfc => Ok(first_byte[0] as u64),
        0xfd => {
            let mut bytes = [0u8; 2];
            reader.read_exact(&mut bytes)?;
            Ok(u16::from_le_bytes(bytes) as u64)
        }
        0xfe => {
            let mut bytes = [0u8; 4];
            reader.read_exact(&mut bytes)?;
            Ok(u32::from_le_bytes(bytes) as u64)
        }
        0xff => {
            let mut bytes = [0u8; 8];
            reader.read_exact(&mut bytes)?;
            Ok(u64::from_le_bytes(bytes))
        }
    }
}

/// Write bytes with length prefix (VarInt length + data)
pub fn write_var_bytes(buf: &mut Vec<u8>, data: &[u8]) {
    write_varint(buf, data.len() as u64);
    buf.extend_from_slice(data);
}

/// Read bytes with length prefix
pub fn read_var_bytes<R: Read + ?Sized>(reader: &mut R) -> io::Result<Vec<u8>> {
    let len = read_varint(reader)?;
    // Read through `take` so a forged length cannot force a huge allocation
    let mut data = Vec::new();
    (&mut *reader).take(len).read_to_end(&mut data)?;
    if data.len() as u64 != len {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("expected {} bytes, got {}", len, data.len()),
        ));
    }
    Ok(data)
}

pub fn write_var_str(buf: &mut Vec<u8>, s: &str) {
    write_var_bytes(buf, s.as_bytes());
}

pub fn read_var_str<R: Read + ?Sized>(reader: &mut R) -> Result<String, DecodeError> {
    let bytes = read_var_bytes(reader)?;
    String::from_utf8(bytes).map_err(|e| DecodeError::Binary(format!("Invalid UTF-8: {}", e)))
}

/// Write a count-prefixed sequence
pub fn write_seq<T: Serializable>(buf: &mut Vec<u8>, items: &[T]) {
    write_varint(buf, items.len() as u64);
    for item in items {
        item.encode(buf);
    }
}

/// Read a count-prefixed sequence
pub fn read_seq<T: Serializable, R: Read + ?Sized>(reader: &mut R) -> Result<Vec<T>, DecodeError> {
    let count = read_varint(reader)?;
    let mut items = Vec::with_capacity(count.min(1024) as usize);
    for _ in 0..count {
        items.push(T::decode(reader)?);
    }
    Ok(items)
}

pub fn read_array<const N: usize, R: Read + ?Sized>(reader: &mut R) -> io::Result<[u8; N]> {
    let mut bytes = [0u8; N];
    reader.read_exact(&mut bytes)?;
    Ok(bytes)
}
