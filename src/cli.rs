// CLI commands

use clap::{Parser, Subcommand, ValueEnum};
use crate::core::{Address, Block, SampleFactory, Transaction};
use crate::consensus::{BlockValidator, ValidationConfig};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "block-models")]
#[command(about = "Hash and validate ledger addresses, transactions and blocks", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the merkle root and digest of a block
    Hash {
        /// Block JSON file
        file: PathBuf,
    },

    /// Check a JSON document
    Validate {
        /// JSON file to check
        file: PathBuf,
        /// What the file contains
        #[arg(short, long, value_enum, default_value = "block")]
        kind: Kind,
        /// Also check every transaction and the stored merkle root
        #[arg(long)]
        strict: bool,
    },

    /// Print a reproducible sample block as JSON
    Sample {
        /// RNG seed
        #[arg(short, long, default_value = "1")]
        seed: u64,
        /// Number of transactions
        #[arg(short, long, default_value = "3")]
        transactions: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    Address,
    Transaction,
    Block,
}

/// What a command printed and whether it succeeded
#[derive(Debug, PartialEq, Eq)]
pub struct Outcome {
    pub lines: Vec<String>,
    pub success: bool,
}

impl Outcome {
    fn ok(lines: Vec<String>) -> Self {
        Self { lines, success: true }
    }
}

/// CLI handler
#[derive(Default)]
pub struct CliHandler;

impl CliHandler {
    pub fn new() -> Self {
        Self
    }

    /// Handle CLI command
    pub fn handle(&self, cli: Cli) -> Result<Outcome, String> {
        match cli.command {
            Commands::Hash { file } => self.hash(&read_file(&file)?),
            Commands::Validate { file, kind, strict } => self.validate(&read_file(&file)?, kind, strict),
            Commands::Sample { seed, transactions } => self.sample(seed, transactions),
        }
    }

    fn hash(&self, data: &[u8]) -> Result<Outcome, String> {
        let mut block = Block::from_json(data).map_err(|e| e.to_string())?;
        let digest = block.get_hash();

        Ok(Outcome::ok(vec![
            format!("Merkle root: {}", block.merkle_root()),
            format!("Hash: {}", digest),
        ]))
    }

    fn validate(&self, data: &[u8], kind: Kind, strict: bool) -> Result<Outcome, String> {
        let verdict = match kind {
            Kind::Address => Address::from_json(data).map_err(|e| e.to_string())?.validate(),
            Kind::Transaction => Transaction::from_json(data).map_err(|e| e.to_string())?.validate(),
            Kind::Block => {
                let block = Block::from_json(data).map_err(|e| e.to_string())?;
                let config = if strict {
                    ValidationConfig::strict()
                } else {
                    ValidationConfig::structural()
                };
                BlockValidator::new(config).validate_block(&block)
            }
        };

        Ok(match verdict {
            Ok(()) => Outcome::ok(vec!["valid".to_string()]),
            Err(e) => Outcome {
                lines: vec![format!("invalid: {}", e)],
                success: false,
            },
        })
    }

    fn sample(&self, seed: u64, transactions: usize) -> Result<Outcome, String> {
        let mut block = SampleFactory::new(seed).block(transactions);
        let digest = block.get_hash();
        log::info!("Sample block {} with {} transactions", digest, transactions);

        let json = serde_json::to_string_pretty(&block).map_err(|e| e.to_string())?;
        Ok(Outcome::ok(vec![json]))
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, String> {
    log::debug!("Reading {}", path.display());
    std::fs::read(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> Vec<u8> {
        let outcome = CliHandler::new().sample(5, 2).unwrap();
        outcome.lines[0].clone().into_bytes()
    }

    #[test]
    fn test_parse_validate_args() {
        let cli = Cli::try_parse_from(["block-models", "validate", "tx.json", "--kind", "transaction"]).unwrap();
        match cli.command {
            Commands::Validate { file, kind, strict } => {
                assert_eq!(file, PathBuf::from("tx.json"));
                assert_eq!(kind, Kind::Transaction);
                assert!(!strict);
            }
            _ => panic!("expected validate"),
        }
    }

    #[test]
    fn test_sample_is_valid_block() {
        let handler = CliHandler::new();
        let data = sample_json();

        let outcome = handler.validate(&data, Kind::Block, true).unwrap();
        assert_eq!(outcome, Outcome::ok(vec!["valid".to_string()]));
    }

    #[test]
    fn test_hash_reports_digest() {
        let handler = CliHandler::new();
        let data = sample_json();
        let block = Block::from_json(&data).unwrap();

        let outcome = handler.hash(&data).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.lines[1], format!("Hash: {}", block.hash()));
    }

    #[test]
    fn test_hash_without_merkle_root() {
        let handler = CliHandler::new();
        let sealed = sample_json();
        let block = Block::from_json(&sealed).unwrap();

        let mut json: serde_json::Value = serde_json::from_slice(&sealed).unwrap();
        json.as_object_mut().unwrap().remove("merkleRoot");
        let data = serde_json::to_vec(&json).unwrap();

        let outcome = handler.hash(&data).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.lines[0], format!("Merkle root: {}", block.merkle_root()));
        assert_eq!(outcome.lines[1], format!("Hash: {}", block.hash()));
    }

    #[test]
    fn test_validate_invalid_address() {
        let handler = CliHandler::new();
        let data = br#"{"name":"Foo","street":"","houseNumber":"1","town":"FooTown"}"#;

        let outcome = handler.validate(data, Kind::Address, false).unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.lines, vec!["invalid: Address field 'street' is empty".to_string()]);
    }

    #[test]
    fn test_validate_malformed_json() {
        let handler = CliHandler::new();
        assert!(handler.validate(b"{oops", Kind::Address, false).is_err());
    }
}
