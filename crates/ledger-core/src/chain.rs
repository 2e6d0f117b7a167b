//! The ledger: an append-only chain of sealed blocks plus the live transaction pool.

use crate::{
    config::LedgerConfig,
    constants::{GENESIS_INDEX, GENESIS_PREV_HASH},
    error::{LedgerError, Result},
    hash::block_hash,
    mine::find_proof_parallel,
    pool::TransactionPool,
    pow::{find_proof, is_valid_proof, Difficulty},
    Block, Transaction,
};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Single-writer ledger. The chain is never empty: the genesis block is
/// created by every constructor.
#[derive(Clone, Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pool: TransactionPool,
    config: LedgerConfig,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        let genesis = Block::genesis(now_millis());
        info!(
            "ledger created with genesis {} (difficulty {})",
            genesis.hash(),
            config.difficulty
        );
        Self {
            chain: vec![genesis],
            pool: TransactionPool::new(),
            config,
        }
    }

    /// Rebuild a ledger from previously exported blocks. The blocks must pass
    /// [`validate_chain`]; the pool starts empty.
    pub fn from_blocks(blocks: Vec<Block>, config: LedgerConfig) -> Result<Self> {
        validate_chain(&blocks, config.difficulty)?;
        info!("ledger restored with {} blocks", blocks.len());
        Ok(Self {
            chain: blocks,
            pool: TransactionPool::new(),
            config,
        })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    /// Number of sealed blocks, which is also the index of the last block.
    pub fn height(&self) -> u64 {
        self.chain.len() as u64
    }

    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("ledger chain always holds the genesis block")
    }

    pub fn pool(&self) -> &TransactionPool {
        &self.pool
    }

    /// Canonical hash of any block.
    pub fn hash(block: &Block) -> String {
        block_hash(block)
    }

    /// Queue a transaction and return the index of the block that will hold it.
    pub fn submit_transaction(&mut self, tx: Transaction) -> u64 {
        debug!("tx {} -> {} ({}) queued", tx.sender, tx.recipient, tx.amount);
        self.pool.push(tx);
        self.height() + 1
    }

    /// Search for the proof that extends the current last block.
    pub fn next_proof(&self) -> u64 {
        let last = self.last_block();
        let prev_hash = last.hash();
        if self.config.parallel {
            find_proof_parallel(last.proof_of_work, &prev_hash, self.config.difficulty)
        } else {
            find_proof(last.proof_of_work, &prev_hash, self.config.difficulty)
        }
    }

    /// Seal the pool into a new block carrying `proof_of_work`.
    ///
    /// `prev_block_hash`, when given, must equal the hash of the current last
    /// block. The proof must satisfy the difficulty predicate against that
    /// block. On error neither the chain nor the pool is touched.
    pub fn seal(&mut self, proof_of_work: u64, prev_block_hash: Option<String>) -> Result<&Block> {
        let last = self.last_block();
        let index = last.index + 1;
        let last_hash = last.hash();

        let prev_block_hash = match prev_block_hash {
            Some(given) if given != last_hash => {
                warn!("rejected block {index}: prev hash {given} does not match {last_hash}");
                return Err(LedgerError::StructuralViolation {
                    index,
                    reason: format!(
                        "prev_block_hash {given} does not match hash of block {} ({last_hash})",
                        last.index
                    ),
                });
            }
            Some(given) => given,
            None => last_hash,
        };

        if !is_valid_proof(
            proof_of_work,
            last.proof_of_work,
            &prev_block_hash,
            self.config.difficulty,
        ) {
            warn!("rejected block {index}: proof {proof_of_work} is not valid");
            return Err(LedgerError::InvalidProof {
                index,
                proof: proof_of_work,
            });
        }

        // Local clocks may step backwards; sealed timestamps never do.
        let timestamp = now_millis().max(last.timestamp);
        let block = Block {
            index,
            timestamp,
            transactions: self.pool.take(),
            proof_of_work,
            prev_block_hash,
        };
        info!(
            "sealed block {} with {} txs and proof {}",
            block.index,
            block.transactions.len(),
            block.proof_of_work
        );
        self.chain.push(block);
        Ok(self.last_block())
    }

    /// Find the next proof and seal the pool with it.
    pub fn mine(&mut self) -> Result<&Block> {
        let proof = self.next_proof();
        self.seal(proof, None)
    }
}

/// Check that `blocks` form a well-linked chain starting at genesis.
///
/// Timestamps are not compared; only the index sequence, the hash links and
/// the proofs are.
pub fn validate_chain(blocks: &[Block], difficulty: Difficulty) -> Result<()> {
    let genesis = blocks.first().ok_or_else(|| LedgerError::StructuralViolation {
        index: 0,
        reason: "chain is empty".to_string(),
    })?;
    if genesis.index != GENESIS_INDEX {
        return Err(LedgerError::StructuralViolation {
            index: genesis.index,
            reason: format!("genesis index must be {GENESIS_INDEX}"),
        });
    }
    if genesis.prev_block_hash != GENESIS_PREV_HASH {
        return Err(LedgerError::StructuralViolation {
            index: genesis.index,
            reason: format!("genesis prev_block_hash must be {GENESIS_PREV_HASH:?}"),
        });
    }

    for pair in blocks.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if Some(next.index) != prev.index.checked_add(1) {
            return Err(LedgerError::StructuralViolation {
                index: next.index,
                reason: format!("index does not follow {}", prev.index),
            });
        }
        let prev_hash = prev.hash();
        if next.prev_block_hash != prev_hash {
            return Err(LedgerError::StructuralViolation {
                index: next.index,
                reason: format!(
                    "prev_block_hash {} does not match hash of block {} ({prev_hash})",
                    next.prev_block_hash, prev.index
                ),
            });
        }
        if !is_valid_proof(next.proof_of_work, prev.proof_of_work, &prev_hash, difficulty) {
            return Err(LedgerError::InvalidProof {
                index: next.index,
                proof: next.proof_of_work,
            });
        }
    }
    Ok(())
}
