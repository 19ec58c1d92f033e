// Deterministic sample data for tests and the `sample` command

use crate::core::{current_timestamp, sha256, Address, Block, BlockHeader, SeededIdGenerator, Transaction};
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const NAMES: [&str; 6] = ["Foo", "Bar", "Baz", "Qux", "Quux", "Corge"];

/// Length of generated nonce tokens
pub const NONCE_LEN: usize = 32;

/// Builds well-formed addresses, transactions and blocks from a seed
///
/// The same seed always yields the same sequence of values, so fixtures stay
/// reproducible.
pub struct SampleFactory {
    rng: StdRng,
    ids: SeededIdGenerator,
}

impl SampleFactory {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let ids = SeededIdGenerator::new(rng.r#gen());
        Self { rng, ids }
    }

    pub fn address(&mut self) -> Address {
        let name = NAMES[self.rng.gen_range(0..NAMES.len())];
        Address::new(
            name,
            format!("{}Street", name),
            self.rng.gen_range(1..200).to_string(),
            format!("{}Town", name),
        )
    }

    /// Valid transaction worth between 1.5 and 998.5
    pub fn transaction(&mut self) -> Transaction {
        let recipient = self.address();
        let sender = self.address();
        let value = self.rng.gen_range(1..999) as f64 + 0.5;
        Transaction::with_generator(&mut self.ids, recipient, sender, value)
    }

    /// Alphanumeric nonce token
    pub fn nonce(&mut self) -> String {
        (&mut self.rng)
            .sample_iter(&Alphanumeric)
            .take(NONCE_LEN)
            .map(char::from)
            .collect()
    }

    /// Valid block stamped with the current time; merkle root left unset
    pub fn block(&mut self, tx_count: usize) -> Block {
        self.block_at(tx_count, current_timestamp())
    }

    /// Valid block with a fixed timestamp; merkle root left unset
    pub fn block_at(&mut self, tx_count: usize, timestamp: i64) -> Block {
        let prev_block_hash = sha256(b"I am the previous block's header\n");
        let nonce = self.nonce();
        let transactions = (0..tx_count).map(|_| self.transaction()).collect();

        Block::new(BlockHeader::new(prev_block_hash, timestamp, 1, nonce), transactions)
    }
}
