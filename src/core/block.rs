// Block data structures

use crate::core::{sha256, DecodeError, Hash256, Serializable, Transaction, ValidationError};
use crate::core::serialize::{read_array, read_seq, read_var_str, write_seq, write_var_str};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::time::{SystemTime, UNIX_EPOCH};

/// Block header
///
/// Canonical layout: prev hash (32) | merkle root (32) | timestamp (i64 LE) |
/// nBits (1) | nonce (VarInt length + UTF-8).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Hash of the previous block
    #[serde(rename = "previousHash")]
    pub prev_block_hash: Hash256,
    /// Commitment to the block's transactions, derived by `Block::update_merkle_root`
    #[serde(rename = "merkleRoot", default)]
    pub merkle_root: Hash256,
    /// Nanoseconds since the Unix epoch
    pub timestamp: i64,
    /// Difficulty target (compact format)
    #[serde(rename = "nBits")]
    pub n_bits: u8,
    /// Token varied between hash attempts
    pub nonce: String,
}

impl BlockHeader {
    /// Create a new block header with an unset merkle root
    pub fn new(prev_block_hash: Hash256, timestamp: i64, n_bits: u8, nonce: impl Into<String>) -> Self {
        Self {
            prev_block_hash,
            merkle_root: Hash256::zero(),
            timestamp,
            n_bits,
            nonce: nonce.into(),
        }
    }

    /// Digest of the header as stored, merkle root included
    pub fn digest(&self) -> Hash256 {
        sha256(&self.to_bytes())
    }
}

impl Serializable for BlockHeader {
    fn encode(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.prev_block_hash.as_bytes());
        buf.extend_from_slice(self.merkle_root.as_bytes());
        buf.extend_from_slice(&self.timestamp.to_le_bytes());
        buf.push(self.n_bits);
        write_var_str(buf, &self.nonce);
    }

    fn decode<R: Read + ?Sized>(reader: &mut R) -> Result<Self, DecodeError> {
        let prev_block_hash = Hash256::new(read_array::<32, _>(reader)?);
        let merkle_root = Hash256::new(read_array::<32, _>(reader)?);
        let timestamp = i64::from_le_bytes(read_array::<8, _>(reader)?);
        let [n_bits] = read_array::<1, _>(reader)?;
        let nonce = read_var_str(reader)?;

        Ok(Self {
            prev_block_hash,
            merkle_root,
            timestamp,
            n_bits,
            nonce,
        })
    }
}

/// Block - contains header and transactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Block header, flattened into the block's JSON object
    #[serde(flatten)]
    pub header: BlockHeader,
    /// Transactions in this block
    #[serde(rename = "Transactions")]
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Create a new block
    pub fn new(header: BlockHeader, transactions: Vec<Transaction>) -> Self {
        Self {
            header,
            transactions,
        }
    }

    /// SHA-256 over the canonical encoding of the transaction sequence
    ///
    /// Stands in for a merkle tree: any change to any transaction, or to
    /// their order, changes the root.
    pub fn compute_merkle_root(transactions: &[Transaction]) -> Hash256 {
        let mut buf = Vec::new();
        write_seq(&mut buf, transactions);
        sha256(&buf)
    }

    /// Recompute the merkle root and store it in the header
    pub fn update_merkle_root(&mut self) -> Hash256 {
        let root = Self::compute_merkle_root(&self.transactions);
        self.header.merkle_root = root;
        root
    }

    /// Store a fresh merkle root, then digest the header
    pub fn get_hash(&mut self) -> Hash256 {
        self.update_merkle_root();
        self.header.digest()
    }

    /// Same digest as `get_hash` without touching the stored merkle root
    pub fn hash(&self) -> Hash256 {
        let header = BlockHeader {
            merkle_root: Self::compute_merkle_root(&self.transactions),
            ..self.header.clone()
        };
        header.digest()
    }

    pub fn prev_block_hash(&self) -> &Hash256 {
        &self.header.prev_block_hash
    }

    pub fn merkle_root(&self) -> &Hash256 {
        &self.header.merkle_root
    }

    pub fn timestamp(&self) -> i64 {
        self.header.timestamp
    }

    pub fn n_bits(&self) -> u8 {
        self.header.n_bits
    }

    pub fn nonce(&self) -> &str {
        &self.header.nonce
    }

    /// Replace the nonce before another hash attempt
    pub fn set_nonce(&mut self, nonce: impl Into<String>) {
        self.header.nonce = nonce.into();
    }

    /// Structural completeness of header and transaction list
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Header fields and a non-empty transaction list.
    /// Neither the merkle root nor individual transactions are checked here,
    /// see `BlockValidator` for that.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.header.prev_block_hash.is_zero() {
            return Err(ValidationError::ZeroPreviousHash);
        }
        if self.header.timestamp == 0 {
            return Err(ValidationError::ZeroTimestamp);
        }
        if self.header.n_bits == 0 {
            return Err(ValidationError::ZeroNBits);
        }
        if self.header.nonce.is_empty() {
            return Err(ValidationError::EmptyNonce);
        }
        if self.transactions.is_empty() {
            return Err(ValidationError::NoTransactions);
        }
        Ok(())
    }

    /// Encode as JSON; fails on a non-finite transaction value
    pub fn to_json(&self) -> Result<Vec<u8>, DecodeError> {
        for tx in &self.transactions {
            tx.check_finite()?;
        }
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode from JSON bytes
    pub fn from_json(data: &[u8]) -> Result<Self, DecodeError> {
        Ok(serde_json::from_slice(data)?)
    }
}

impl Serializable for Block {
    fn encode(&self, buf: &mut Vec<u8>) {
        self.header.encode(buf);
        write_seq(buf, &self.transactions);
    }

    fn decode<R: Read + ?Sized>(reader: &mut R) -> Result<Self, DecodeError> {
        let header = BlockHeader::decode(reader)?;
        let transactions = read_seq(reader)?;

        Ok(Self {
            header,
            transactions,
        })
    }
}

/// Current time in nanoseconds since the Unix epoch
pub fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| timestamp_from_nanos(d.as_nanos()))
        .unwrap_or_default()
}

/// Saturates at `i64::MAX` instead of wrapping
fn timestamp_from_nanos(nanos: u128) -> i64 {
    i64::try_from(nanos).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SampleFactory;

    fn sample_block() -> Block {
        SampleFactory::new(3).block_at(3, 1_700_000_000_000_000_000)
    }

    #[test]
    fn test_get_hash_sets_merkle_root() {
        let mut block = sample_block();
        block.header.merkle_root = Hash256::zero();

        let _ = block.get_hash();
        assert!(!block.merkle_root().is_zero());
        assert_eq!(*block.merkle_root(), Block::compute_merkle_root(&block.transactions));
    }

    #[test]
    fn test_get_hash_idempotent() {
        let mut block = sample_block();
        let first = block.get_hash();
        let second = block.get_hash();
        assert_eq!(first, second);
    }

    #[test]
    fn test_nonce_changes_hash() {
        let mut block = sample_block();
        let first = block.get_hash();

        block.set_nonce("another-token");
        let second = block.get_hash();
        assert_ne!(first, second);
    }

    #[test]
    fn test_hash_does_not_mutate() {
        let block = sample_block();
        let before = block.clone();

        let pure = block.hash();
        assert_eq!(block, before);

        let mut sealed = block.clone();
        assert_eq!(sealed.get_hash(), pure);
    }

    #[test]
    fn test_stale_merkle_root_ignored_by_hash() {
        let mut block = sample_block();
        block.header.merkle_root = Hash256::new([9u8; 32]);
        let stale_digest = block.header.digest();

        assert_ne!(block.hash(), stale_digest);
        assert_eq!(block.hash(), block.clone().get_hash());
    }

    #[test]
    fn test_merkle_root_depends_on_order() {
        let block = sample_block();
        let mut reversed = block.transactions.clone();
        reversed.reverse();

        assert_ne!(
            Block::compute_merkle_root(&block.transactions),
            Block::compute_merkle_root(&reversed)
        );
    }

    #[test]
    fn test_merkle_root_empty() {
        // Count prefix only
        assert_eq!(Block::compute_merkle_root(&[]), sha256(&[0u8]));
    }

    #[test]
    fn test_valid_block() {
        let block = sample_block();
        assert!(block.is_valid());
    }

    #[test]
    fn test_zero_previous_hash() {
        let mut block = sample_block();
        block.header.prev_block_hash = Hash256::zero();
        assert!(!block.is_valid());
        assert_eq!(block.validate(), Err(ValidationError::ZeroPreviousHash));
    }

    #[test]
    fn test_invalid_header_fields() {
        let mut block = sample_block();
        block.header.timestamp = 0;
        assert_eq!(block.validate(), Err(ValidationError::ZeroTimestamp));

        let mut block = sample_block();
        block.header.n_bits = 0;
        assert_eq!(block.validate(), Err(ValidationError::ZeroNBits));

        let mut block = sample_block();
        block.set_nonce("");
        assert_eq!(block.validate(), Err(ValidationError::EmptyNonce));
    }

    #[test]
    fn test_no_transactions() {
        let mut block = sample_block();
        block.transactions.clear();
        assert!(!block.is_valid());
        assert_eq!(block.validate(), Err(ValidationError::NoTransactions));
    }

    #[test]
    fn test_invalid_transaction_not_checked() {
        let mut block = sample_block();
        block.transactions[0].value = -1.0;
        assert!(block.is_valid());
    }

    #[test]
    fn test_header_encoding_layout() {
        let header = BlockHeader::new(Hash256::new([1u8; 32]), 2, 3, "ab");
        let bytes = header.to_bytes();

        assert_eq!(bytes.len(), 32 + 32 + 8 + 1 + 1 + 2);
        assert_eq!(&bytes[..32], &[1u8; 32]);
        assert_eq!(&bytes[32..64], &[0u8; 32]);
        assert_eq!(&bytes[64..72], &2i64.to_le_bytes());
        assert_eq!(bytes[72], 3);
        assert_eq!(&bytes[73..], &[2, b'a', b'b']);
        assert_eq!(BlockHeader::from_bytes(&bytes).unwrap(), header);
    }

    #[test]
    fn test_block_binary_decode() {
        let mut block = sample_block();
        block.update_merkle_root();

        let bytes = block.to_bytes();
        assert_eq!(Block::from_bytes(&bytes).unwrap(), block);
        assert!(matches!(Block::from_bytes(&bytes[..40]), Err(DecodeError::Binary(_))));
    }

    #[test]
    fn test_block_json() {
        let mut block = sample_block();
        block.update_merkle_root();

        let json: serde_json::Value = serde_json::from_slice(&block.to_json().unwrap()).unwrap();
        assert_eq!(json["previousHash"], block.prev_block_hash().to_hex());
        assert_eq!(json["merkleRoot"], block.merkle_root().to_hex());
        assert_eq!(json["nBits"], 1);
        assert_eq!(json["nonce"], block.nonce());
        assert_eq!(json["Transactions"].as_array().unwrap().len(), 3);

        let back = Block::from_json(&block.to_json().unwrap()).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn test_json_without_merkle_root() {
        let mut block = sample_block();
        block.update_merkle_root();
        let expected = block.hash();

        let mut json: serde_json::Value = serde_json::from_slice(&block.to_json().unwrap()).unwrap();
        json.as_object_mut().unwrap().remove("merkleRoot");
        let data = serde_json::to_vec(&json).unwrap();

        let mut decoded = Block::from_json(&data).unwrap();
        assert!(decoded.merkle_root().is_zero());
        assert_eq!(decoded.get_hash(), expected);
        assert_eq!(decoded, block);
    }

    #[test]
    fn test_json_rejects_non_finite_value() {
        let mut block = sample_block();
        block.transactions[1].value = f64::INFINITY;
        assert!(matches!(block.to_json(), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_current_timestamp_nonzero() {
        assert!(current_timestamp() > 0);
    }

    #[test]
    fn test_timestamp_saturates() {
        assert_eq!(timestamp_from_nanos(42), 42);
        assert_eq!(timestamp_from_nanos(i64::MAX as u128), i64::MAX);
        assert_eq!(timestamp_from_nanos(i64::MAX as u128 + 1), i64::MAX);
        assert_eq!(timestamp_from_nanos(u128::MAX), i64::MAX);
    }
}
