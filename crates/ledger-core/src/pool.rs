//! Pending transactions waiting for the next sealed block.

use crate::Transaction;

/// FIFO pool of not-yet-committed transactions.
///
/// No deduplication and no content validation: every submission is kept in
/// arrival order until the next seal takes the whole pool.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionPool {
    pending: Vec<Transaction>,
}

impl TransactionPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tx: Transaction) {
        self.pending.push(tx);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    /// Hands over the current contents by value and leaves a fresh, empty pool.
    pub fn take(&mut self) -> Vec<Transaction> {
        std::mem::take(&mut self.pending)
    }
}
