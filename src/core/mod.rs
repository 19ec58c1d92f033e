// Core ledger data structures

mod types;
mod error;
mod address;
mod transaction;
mod block;
mod serialize;
mod hash;
mod id;
mod sample;

pub use types::*;
pub use error::*;
pub use address::*;
pub use transaction::*;
pub use block::*;
pub use serialize::*;
pub use hash::*;
pub use id::*;
pub use sample::*;
