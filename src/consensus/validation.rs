// Block validation beyond the structural checks

use crate::core::{Block, ValidationError};

/// Which optional checks `BlockValidator` runs on top of `Block::validate`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Require every transaction to be valid
    pub verify_transactions: bool,
    /// Require the stored merkle root to match the transactions
    pub verify_merkle_root: bool,
}

impl ValidationConfig {
    /// Structural checks only, same verdict as `Block::is_valid`
    pub fn structural() -> Self {
        Self::default()
    }

    /// Every optional check enabled
    pub fn strict() -> Self {
        Self {
            verify_transactions: true,
            verify_merkle_root: true,
        }
    }
}

/// Block validator
#[derive(Debug, Clone, Default)]
pub struct BlockValidator {
    config: ValidationConfig,
}

impl BlockValidator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a complete block
    pub fn validate_block(&self, block: &Block) -> Result<(), ValidationError> {
        let result = self.check(block);
        match &result {
            Ok(()) => log::debug!("Block {} passed validation", block.hash()),
            Err(e) => log::debug!("Block {} rejected: {}", block.hash(), e),
        }
        result
    }

    pub fn is_valid(&self, block: &Block) -> bool {
        self.validate_block(block).is_ok()
    }

    fn check(&self, block: &Block) -> Result<(), ValidationError> {
        block.validate()?;

        if self.config.verify_transactions {
            for (index, tx) in block.transactions.iter().enumerate() {
                tx.validate().map_err(|reason| ValidationError::InvalidTransaction {
                    index,
                    reason: Box::new(reason),
                })?;
            }
        }

        if self.config.verify_merkle_root {
            let calculated = Block::compute_merkle_root(&block.transactions);
            if calculated != *block.merkle_root() {
                return Err(ValidationError::MerkleRootMismatch);
            }
        }

        Ok(())
    }
}
