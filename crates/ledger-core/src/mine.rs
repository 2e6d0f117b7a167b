use crate::pow::{is_valid_proof, Difficulty};
use rayon::prelude::*;
use tracing::info;

/// Searches proofs in parallel until one satisfies `difficulty` against the previous block.
///
/// Rayon splits the proof space across its thread pool and every worker stops
/// once a match is known. `find_first` keeps the answer identical to the
/// sequential [`crate::pow::find_proof`].
pub fn find_proof_parallel(last_proof: u64, prev_hash: &str, difficulty: Difficulty) -> u64 {
    let found = (0u64..u64::MAX)
        .into_par_iter()
        .find_first(|proof| is_valid_proof(*proof, last_proof, prev_hash, difficulty))
        .expect("proof space exhausted (practically impossible)");

    info!(
        "found proof {} in parallel on {} threads (difficulty {})",
        found,
        rayon::current_num_threads(),
        difficulty
    );
    found
}
