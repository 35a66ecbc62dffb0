//! Error types for derivation and mining

use thiserror::Error;

/// Errors produced by the engine and the miner
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A precondition was violated; no hashing work was done
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    /// The caller's cancellation flag was observed mid-computation
    #[error("computation aborted")]
    ComputationAborted,

    /// A full nonce sweep failed and the clock did not move forward
    #[error("nonce space exhausted without advancing the clock")]
    NonceSpaceExhausted,
}

/// Specific precondition that rejected a request
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("code must not be empty")]
    EmptyCode,

    #[error("iterations must be at least 1")]
    ZeroIterations,

    #[error("hex length {0} is odd")]
    OddHexLength(usize),

    #[error("hex length {0} is outside 2..=256")]
    HexLengthOutOfRange(usize),

    #[error("difficulty {0} is outside 1..=10")]
    DifficultyOutOfRange(u8),

    #[error("a chain needs at least one block")]
    ZeroBlocks,

    #[error("block message must not be empty")]
    EmptyMessage,

    #[error("block message of {0} bytes does not fit a 32-bit length field")]
    MessageTooLong(usize),
}

/// Unrecognised primitive hash name
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown primitive hash '{0}' (expected sha256 or blake3)")]
pub struct UnknownAlgorithm(pub String);

pub type Result<T> = core::result::Result<T, Error>;
