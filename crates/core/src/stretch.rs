//! Seed stretching
//!
//! ```text
//! state_0 = H(code || salt)
//! state_i = H(state_{i-1} || salt)      for i in 1..=iterations
//! seed    = state_{iterations}
//! ```
//!
//! One initial hash plus `iterations` salted rounds. The salt is re-mixed on
//! every round so the chain cannot settle into a salt-independent cycle.

use core::fmt;
use core::num::NonZeroU64;
use core::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Error, Result};
use crate::params::SEED_SIZE;
use crate::primitives::PrimitiveHash;

/// Fixed-width intermediate value the output stream is expanded from
#[derive(Clone, PartialEq, Eq)]
pub struct Seed([u8; SEED_SIZE]);

impl Seed {
    pub const fn from_bytes(bytes: [u8; SEED_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SEED_SIZE] {
        &self.0
    }
}

// Seeds are password-derived; keep them out of logs and panic messages.
impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(..)")
    }
}

/// Stretch `code` and `salt` into a seed using `iterations` salted rounds of `P`
pub fn stretch<P: PrimitiveHash>(code: &[u8], salt: &[u8], iterations: NonZeroU64) -> Seed {
    let mut state = P::hash_parts(&[code, salt]);
    for _ in 0..iterations.get() {
        state = P::hash_parts(&[&state, salt]);
    }
    Seed(state)
}

/// Same as [`stretch`], polling `cancel` before every round
///
/// Returns [`Error::ComputationAborted`] as soon as the flag is seen set;
/// the partial state is dropped with the stack frame.
pub fn stretch_cancellable<P: PrimitiveHash>(
    code: &[u8],
    salt: &[u8],
    iterations: NonZeroU64,
    cancel: &AtomicBool,
) -> Result<Seed> {
    if cancel.load(Ordering::Relaxed) {
        return Err(Error::ComputationAborted);
    }
    let mut state = P::hash_parts(&[code, salt]);
    for _ in 0..iterations.get() {
        if cancel.load(Ordering::Relaxed) {
            return Err(Error::ComputationAborted);
        }
        state = P::hash_parts(&[&state, salt]);
    }
    Ok(Seed(state))
}
