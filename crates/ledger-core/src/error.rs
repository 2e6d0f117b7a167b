use thiserror::Error;

/// Errors raised by the ledger before it mutates any state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// A block would break the index sequence or the hash link to its predecessor.
    #[error("structural violation at block {index}: {reason}")]
    StructuralViolation { index: u64, reason: String },

    /// A proof does not satisfy the difficulty predicate against the previous block.
    #[error("invalid proof of work {proof} for block {index}")]
    InvalidProof { index: u64, proof: u64 },

    #[error("difficulty {0} exceeds the {max} hex characters of a sha256 digest", max = crate::constants::MAX_DIFFICULTY)]
    InvalidDifficulty(u32),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
