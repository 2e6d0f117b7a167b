pub const HASH_SIZE: usize = 32;
pub const HASH_HEX_SIZE: usize = HASH_SIZE * 2;
pub const DEFAULT_DIFFICULTY: u32 = 3;
pub const MAX_DIFFICULTY: u32 = HASH_HEX_SIZE as u32;
pub const GENESIS_INDEX: u64 = 1;
pub const GENESIS_PREV_HASH: &str = "0";
pub const GENESIS_PROOF: u64 = 0;
