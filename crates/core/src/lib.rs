//! # stretchhash core
//!
//! A password-stretching digest with a caller-selectable output length, plus
//! the small proof-of-work block chain that ships next to it.
//!
//! ## Pipeline
//!
//! ```text
//! code, salt, iterations ──► stretch ──► seed (32 B)
//!                                          │
//!                       H(seed || be64(0)) H(seed || be64(1)) ...
//!                                          │
//!                     first hex_length / 2 bytes ──► uppercase hex
//! ```
//!
//! - **Stretch**: `H(code || salt)` followed by `iterations` salted rounds
//! - **Expand**: counter-mode blocks, generated lazily, so a shorter digest
//!   is always a prefix of a longer one for the same inputs
//! - **Format**: uppercase hex, exactly `hex_length` characters (even, 2..=256)
//!
//! The primitive is SHA-256 by default; BLAKE3 is available through
//! [`Engine<Blake3Hash>`](Engine) or [`Algorithm::Blake3`].
//!
//! ## Example
//!
//! ```rust
//! use stretchhash_core::{DerivationRequest, Engine, Error, InvalidInput, derive_digest};
//!
//! let digest = derive_digest("11111111", "a", 1, 2).unwrap();
//! assert_eq!(digest.as_str(), "C1");
//!
//! // Reusable engine over an explicit request
//! let engine: Engine = Engine::new();
//! let request = DerivationRequest::new("salt.ish", "giam", 111, 20);
//! assert_eq!(engine.derive(&request).unwrap().len(), 20);
//!
//! // Rejections happen before any hashing
//! assert_eq!(
//!     derive_digest("", "giam", 111, 20),
//!     Err(Error::InvalidInput(InvalidInput::EmptyCode))
//! );
//! ```
//!
//! ## Mining
//!
//! ```rust
//! use stretchhash_core::{Difficulty, FixedClock, Miner};
//!
//! let miner = Miner::new(Difficulty::new(1).unwrap()).with_clock(FixedClock(1_700_000_000));
//! let genesis = miner.mine_genesis().unwrap();
//! assert!(miner.difficulty().is_met_by(&genesis.hash));
//! ```

pub mod chain;
pub mod engine;
pub mod error;
pub mod expand;
pub mod format;
mod params;
pub mod primitives;
pub mod stretch;

pub mod ffi;

pub use chain::{BlockHeader, Clock, Difficulty, FixedClock, MinedBlock, Miner, SystemClock};
pub use engine::{
    DerivationRequest, Digest, Engine, derive_batch_with, derive_digest, derive_with,
    derive_with_cancellable,
};
pub use error::{Error, InvalidInput, Result, UnknownAlgorithm};
pub use expand::{ExpansionBlock, StreamExpander, expand};
pub use format::format_digest;
pub use params::*;
pub use primitives::{Algorithm, Blake3Hash, HashOutput, PrimitiveHash, Sha256Hash};
pub use stretch::{Seed, stretch, stretch_cancellable};
