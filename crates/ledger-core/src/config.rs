use crate::pow::Difficulty;
use serde::{Deserialize, Serialize};

/// Tunables for a [`crate::chain::Ledger`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Leading zero hex characters required of every proof digest.
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Search proofs on the rayon thread pool instead of the calling thread.
    #[serde(default)]
    pub parallel: bool,
}

impl LedgerConfig {
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
