//! Counter-mode stream expansion (XOF) over a seed
//!
//! Block `j` of the stream is `H(seed || be64(j))`. Blocks are produced on
//! demand, so asking for `n` bytes costs `ceil(n / 32)` primitive calls and
//! any shorter output is a prefix of any longer one.

use core::marker::PhantomData;

use crate::params::{COUNTER_SIZE, SEED_SIZE};
use crate::primitives::{HashOutput, PrimitiveHash};
use crate::stretch::Seed;

/// One counter-mode block of the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionBlock {
    pub index: u64,
    pub bytes: HashOutput,
}

/// Lazy iterator over the expansion blocks of a seed
pub struct StreamExpander<'a, P> {
    seed: &'a Seed,
    next_index: Option<u64>,
    _primitive: PhantomData<fn() -> P>,
}

impl<'a, P: PrimitiveHash> StreamExpander<'a, P> {
    pub fn new(seed: &'a Seed) -> Self {
        Self {
            seed,
            next_index: Some(0),
            _primitive: PhantomData,
        }
    }
}

impl<P: PrimitiveHash> Iterator for StreamExpander<'_, P> {
    type Item = ExpansionBlock;

    fn next(&mut self) -> Option<ExpansionBlock> {
        let index = self.next_index?;
        let counter: [u8; COUNTER_SIZE] = index.to_be_bytes();
        let bytes = P::hash_parts(&[self.seed.as_bytes(), &counter]);
        self.next_index = index.checked_add(1);
        Some(ExpansionBlock { index, bytes })
    }
}

/// Number of blocks needed to cover `byte_count` bytes
#[inline(always)]
pub const fn blocks_needed(byte_count: usize) -> usize {
    byte_count.div_ceil(SEED_SIZE)
}

/// Fill `out` with the first `out.len()` bytes of the stream
pub fn expand_into<P: PrimitiveHash>(seed: &Seed, out: &mut [u8]) {
    // `chunks_mut` is polled first, so no block past the last chunk is hashed.
    for (chunk, block) in out
        .chunks_mut(SEED_SIZE)
        .zip(StreamExpander::<P>::new(seed))
    {
        chunk.copy_from_slice(&block.bytes[..chunk.len()]);
    }
}

/// Return the first `byte_count` bytes of the stream
pub fn expand<P: PrimitiveHash>(seed: &Seed, byte_count: usize) -> Vec<u8> {
    let mut out = vec![0u8; byte_count];
    expand_into::<P>(seed, &mut out);
    out
}
