//! Proof-of-work puzzle: search and validation.
//!
//! A proof is valid when `sha256(prev_hash ++ last_proof ++ proof)`, rendered
//! as hex, starts with `difficulty` zero characters. Both operations are pure.

use crate::{
    constants::{DEFAULT_DIFFICULTY, MAX_DIFFICULTY},
    error::LedgerError,
    hash::{sha256, Hash},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Number of leading zero hex characters a proof digest must have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Difficulty(u32);

impl Difficulty {
    pub fn new(zeros: u32) -> Result<Self, LedgerError> {
        if zeros > MAX_DIFFICULTY {
            return Err(LedgerError::InvalidDifficulty(zeros));
        }
        Ok(Self(zeros))
    }

    pub fn zeros(self) -> u32 {
        self.0
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self(DEFAULT_DIFFICULTY)
    }
}

impl TryFrom<u32> for Difficulty {
    type Error = LedgerError;

    fn try_from(zeros: u32) -> Result<Self, Self::Error> {
        Self::new(zeros)
    }
}

impl From<Difficulty> for u32 {
    fn from(d: Difficulty) -> Self {
        d.0
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Digest of the puzzle input `prev_hash ++ last_proof ++ proof`.
pub fn proof_digest(proof: u64, last_proof: u64, prev_hash: &str) -> Hash {
    let guess = format!("{prev_hash}{last_proof}{proof}");
    sha256(guess.as_bytes())
}

/// Leading zero hex characters of a digest (two per zero byte).
pub fn count_leading_zero_nibbles(hash: &[u8]) -> u32 {
    let mut total = 0u32;
    for b in hash {
        if *b == 0 {
            total += 2;
        } else {
            if *b >> 4 == 0 {
                total += 1;
            }
            break;
        }
    }
    total
}

pub fn is_valid_proof(
    proof: u64,
    last_proof: u64,
    prev_hash: &str,
    difficulty: Difficulty,
) -> bool {
    count_leading_zero_nibbles(&proof_digest(proof, last_proof, prev_hash)) >= difficulty.zeros()
}

/// Brute-force search from 0 upward; returns the smallest valid proof.
///
/// Blocks the calling thread until a proof is found. There is no cancellation.
pub fn find_proof(last_proof: u64, prev_hash: &str, difficulty: Difficulty) -> u64 {
    let mut proof = 0u64;
    while !is_valid_proof(proof, last_proof, prev_hash, difficulty) {
        proof = proof.wrapping_add(1);
    }
    info!(
        "found proof {} after {} attempts (difficulty {})",
        proof,
        proof.saturating_add(1),
        difficulty
    );
    proof
}
