//! Engine and miner parameters
//!
//! Fixed sizes and accepted input ranges shared by every component.

/// Output width of every primitive hash, and therefore of the seed (bytes)
pub const SEED_SIZE: usize = 32;

/// Width of the big-endian block counter appended to the seed during expansion
pub const COUNTER_SIZE: usize = 8;

/// Smallest accepted digest length in hex characters
pub const MIN_HEX_LENGTH: usize = 2;

/// Largest accepted digest length in hex characters
pub const MAX_HEX_LENGTH: usize = 256;

/// Largest number of stream bytes a single derivation consumes
pub const MAX_DIGEST_BYTES: usize = MAX_HEX_LENGTH / 2;

/// Serialized block header size: timestamp, length, two hashes, nonce
pub const HEADER_SIZE: usize = 4 + 4 + SEED_SIZE + SEED_SIZE + 4;

/// Lowest mining difficulty
pub const MIN_DIFFICULTY: u8 = 1;

/// Highest mining difficulty
pub const MAX_DIFFICULTY: u8 = 10;

/// Payload of the genesis block, NUL terminator included
pub const GENESIS_MESSAGE: &[u8] =
    b"The Times 03/Jan/2009 Chancellor on brink of second bailout for banks\0";
