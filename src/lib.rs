//! stretchhash
//!
//! Salted key stretching with a caller-selectable hex output length, and a
//! small proof-of-work block chain miner.
//!
//! # Overview
//!
//! A digest is derived from `(code, salt, iterations, hex_length)`:
//! the inputs are stretched through `iterations` rounds of a primitive hash,
//! the resulting seed is expanded in counter mode, and the first
//! `hex_length / 2` bytes are rendered as uppercase hex. Requesting a longer
//! digest for the same inputs only appends characters.
//!
//! # Example
//!
//! ```rust
//! use stretchhash::algorithm::derive_digest;
//!
//! let d10 = derive_digest("salt.ish", "giam", 1010, 10).unwrap();
//! let d20 = derive_digest("salt.ish", "giam", 1010, 20).unwrap();
//! assert!(d20.as_str().starts_with(d10.as_str()));
//! ```

// Re-export the core algorithm
pub use stretchhash_core as algorithm;

pub mod config;
pub mod salt;

// Convenience re-exports
pub use algorithm::{
    Algorithm, DerivationRequest, Difficulty, Digest, Engine, Error, MinedBlock, Miner,
    derive_digest,
};
