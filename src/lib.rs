// Ledger data model: addresses, transactions and blocks
// with structural validation and block hashing

pub mod core;
pub mod consensus;
pub mod storage;
pub mod cli;

// Re-exports for convenience
pub use crate::core::{
    Address, Block, BlockHeader, DecodeError, Hash256, IdGenerator, RandomIdGenerator,
    SampleFactory, SeededIdGenerator, Serializable, Transaction, ValidationError,
};
pub use crate::consensus::{BlockValidator, ValidationConfig};
pub use crate::storage::{ColumnValue, RawColumn};
pub use crate::cli::{Cli, CliHandler};
