//! Primitive hash adapters
//!
//! The engine treats the primitive as an opaque `bytes -> [u8; 32]` function.
//! Inputs are fed as a list of parts so callers never have to concatenate
//! `state || salt` or `seed || counter` into a temporary buffer.

use core::fmt;
use core::str::FromStr;

use blake3::Hasher as Blake3;
use sha2::{Digest, Sha256};

use crate::error::UnknownAlgorithm;
use crate::params::SEED_SIZE;

/// Output of one primitive invocation
pub type HashOutput = [u8; SEED_SIZE];

/// A fixed-output cryptographic hash used as the engine's building block
pub trait PrimitiveHash {
    /// Stable lowercase name, as accepted by [`Algorithm::from_str`]
    const NAME: &'static str;

    /// Hash the concatenation of `parts`
    fn hash_parts(parts: &[&[u8]]) -> HashOutput;

    /// Hash a single contiguous input
    #[inline(always)]
    fn hash(data: &[u8]) -> HashOutput {
        Self::hash_parts(&[data])
    }
}

/// SHA-256, the default primitive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256Hash;

impl PrimitiveHash for Sha256Hash {
    const NAME: &'static str = "sha256";

    #[inline(always)]
    fn hash_parts(parts: &[&[u8]]) -> HashOutput {
        let mut hasher = Sha256::new();
        for part in parts.iter().copied() {
            hasher.update(part);
        }
        let mut out = [0u8; SEED_SIZE];
        out.copy_from_slice(&hasher.finalize());
        out
    }
}

/// BLAKE3 in its default 256-bit hash mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blake3Hash;

impl PrimitiveHash for Blake3Hash {
    const NAME: &'static str = "blake3";

    #[inline(always)]
    fn hash_parts(parts: &[&[u8]]) -> HashOutput {
        let mut hasher = Blake3::new();
        for part in parts.iter().copied() {
            hasher.update(part);
        }
        hasher.finalize().into()
    }
}

/// Runtime selection of the primitive hash
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Algorithm {
    #[default]
    Sha256,
    Blake3,
}

impl Algorithm {
    /// Every supported primitive, default first
    pub const ALL: [Algorithm; 2] = [Algorithm::Sha256, Algorithm::Blake3];

    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Sha256 => Sha256Hash::NAME,
            Algorithm::Blake3 => Blake3Hash::NAME,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(Algorithm::Sha256),
            "blake3" => Ok(Algorithm::Blake3),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}
