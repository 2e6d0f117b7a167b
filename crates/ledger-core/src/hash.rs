//! Canonical block serialization and SHA-256 helpers.
//!
//! Blocks are encoded as compact JSON with every object's keys sorted, so the
//! bytes depend only on field names and values and never on the order the
//! fields are declared in. The same encoding is used when a chain is exported,
//! which keeps stored hashes reproducible.

use crate::{constants::HASH_SIZE, Block};
use sha2::{Digest, Sha256};

pub type Hash = [u8; HASH_SIZE];

/// Raw SHA-256 digest of `bytes`.
pub fn sha256(bytes: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    let mut out = [0u8; HASH_SIZE];
    out.copy_from_slice(&digest[..]);
    out
}

/// Lowercase hex SHA-256 digest of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(sha256(bytes))
}

/// Byte-exact canonical encoding of a block.
pub fn canonical_bytes(block: &Block) -> Vec<u8> {
    // serde_json's default map is a BTreeMap, so going through `Value` sorts
    // keys at every nesting level.
    let value = serde_json::to_value(block).expect("block fields always serialize to json");
    serde_json::to_vec(&value).expect("json value always serializes")
}

pub fn block_hash(block: &Block) -> String {
    sha256_hex(&canonical_bytes(block))
}
