//! Single-node hash-linked ledger secured by a brute-force proof of work.
//!
//! Callers queue transactions on a [`chain::Ledger`], search for a proof with
//! [`pow::find_proof`] (or [`mine::find_proof_parallel`]), then seal the pool
//! into a new block with [`chain::Ledger::seal`].

pub mod amount;
pub mod chain;
pub mod config;
pub mod constants;
pub mod error;
pub mod hash;
pub mod mine;
pub mod pool;
pub mod pow;

pub use chain::{validate_chain, Ledger};
pub use config::LedgerConfig;
pub use error::{LedgerError, Result};
pub use pool::TransactionPool;
pub use pow::{find_proof, is_valid_proof, Difficulty};

use constants::{GENESIS_INDEX, GENESIS_PREV_HASH, GENESIS_PROOF};
use serde::{Deserialize, Serialize};

/// A transfer between two identifiers. Shape only: the amount is not checked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    #[serde(with = "amount")]
    pub amount: f64,
}

impl Transaction {
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, amount: f64) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    /// Unix time in milliseconds.
    pub timestamp: u64,
    pub transactions: Vec<Transaction>,
    pub proof_of_work: u64,
    pub prev_block_hash: String,
}

impl Block {
    /// The first block of every chain: no transactions, placeholder proof, sentinel prev hash.
    pub fn genesis(timestamp: u64) -> Self {
        Self {
            index: GENESIS_INDEX,
            timestamp,
            transactions: vec![],
            proof_of_work: GENESIS_PROOF,
            prev_block_hash: GENESIS_PREV_HASH.to_string(),
        }
    }

    /// Canonical hash, recomputed on every call.
    pub fn hash(&self) -> String {
        hash::block_hash(self)
    }
}
