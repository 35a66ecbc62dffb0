//! Proof-of-work block chain
//!
//! Each block header commits to its payload (`data_hash`) and to the full
//! previous header (`previous_header_hash`). Mining searches the 32-bit nonce
//! space, lowest nonce first, for a header whose SHA-256 is strictly below
//! the difficulty target.
//!
//! Header layout (little-endian, 76 bytes):
//!
//! ```text
//! timestamp (4) || data_length (4) || data_hash (32) || previous_header_hash (32) || nonce (4)
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{Error, InvalidInput, Result};
use crate::params::{GENESIS_MESSAGE, HEADER_SIZE, MAX_DIFFICULTY, MIN_DIFFICULTY, SEED_SIZE};
use crate::primitives::{HashOutput, PrimitiveHash, Sha256Hash};

/// Byte offset of the nonce inside a serialized header
const NONCE_OFFSET: usize = HEADER_SIZE - 4;

/// Nonces hashed between two cancellation checks
const NONCE_CHUNK: u32 = 1 << 16;

/// Mining difficulty, 1 (easiest) to 10
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Difficulty(u8);

impl Difficulty {
    pub fn new(level: u8) -> Result<Self> {
        if (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&level) {
            Ok(Self(level))
        } else {
            Err(InvalidInput::DifficultyOutOfRange(level).into())
        }
    }

    pub const fn level(self) -> u8 {
        self.0
    }

    /// 32-byte upper bound a header hash must stay strictly below
    ///
    /// All zero except one byte; each level either shrinks that byte
    /// (0xFF, 0x0F, 0x01) or moves it one position to the right.
    pub fn target(self) -> HashOutput {
        let (index, value) = match self.0 {
            1 => (1, 0xFF),
            2 => (1, 0x0F),
            3 => (1, 0x01),
            4 => (2, 0xFF),
            5 => (2, 0x0F),
            6 => (2, 0x01),
            7 => (3, 0xFF),
            8 => (3, 0x0F),
            9 => (3, 0x01),
            _ => (4, 0xFF),
        };
        let mut target = [0u8; SEED_SIZE];
        target[index] = value;
        target
    }

    /// Whether `hash` is below the target, comparing big-endian
    #[inline(always)]
    pub fn is_met_by(self, hash: &HashOutput) -> bool {
        *hash < self.target()
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = Error;

    fn try_from(level: u8) -> Result<Self> {
        Self::new(level)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Block header as it is hashed and chained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    /// UNIX seconds at the start of the mining sweep that found the nonce
    pub timestamp: u32,
    pub data_length: u32,
    pub data_hash: HashOutput,
    /// Hash of the previous header, all zeros for the genesis block
    pub previous_header_hash: HashOutput,
    pub nonce: u32,
}

impl BlockHeader {
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..4].copy_from_slice(&self.timestamp.to_le_bytes());
        out[4..8].copy_from_slice(&self.data_length.to_le_bytes());
        out[8..40].copy_from_slice(&self.data_hash);
        out[40..72].copy_from_slice(&self.previous_header_hash);
        out[NONCE_OFFSET..].copy_from_slice(&self.nonce.to_le_bytes());
        out
    }

    pub fn hash(&self) -> HashOutput {
        Sha256Hash::hash(&self.to_bytes())
    }

    pub fn is_genesis(&self) -> bool {
        self.previous_header_hash == [0u8; SEED_SIZE]
    }
}

/// Header length field for a payload of `len` bytes
pub(crate) fn data_length(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| InvalidInput::MessageTooLong(len).into())
}

/// A header together with the hash that satisfied the difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinedBlock {
    pub header: BlockHeader,
    pub hash: HashOutput,
}

impl MinedBlock {
    /// Lowercase hex of the header hash
    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash)
    }

    /// Lowercase hex of the payload hash
    pub fn data_hash_hex(&self) -> String {
        hex::encode(self.header.data_hash)
    }
}

/// Source of block timestamps
pub trait Clock: Send + Sync {
    fn unix_time(&self) -> u32;
}

/// Wall clock, UNIX seconds truncated to 32 bits
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_time(&self) -> u32 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs() as u32)
            .unwrap_or(0)
    }
}

/// Clock frozen at one instant, for reproducible mining
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u32);

impl Clock for FixedClock {
    fn unix_time(&self) -> u32 {
        self.0
    }
}

/// Block miner for one difficulty
pub struct Miner<C = SystemClock> {
    difficulty: Difficulty,
    target: HashOutput,
    clock: C,
    cancel: Option<Arc<AtomicBool>>,
}

impl Miner<SystemClock> {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            target: difficulty.target(),
            clock: SystemClock,
            cancel: None,
        }
    }
}

impl<C: Clock> Miner<C> {
    /// Replace the timestamp source
    pub fn with_clock<D: Clock>(self, clock: D) -> Miner<D> {
        Miner {
            difficulty: self.difficulty,
            target: self.target,
            clock,
            cancel: self.cancel,
        }
    }

    /// Abort with [`Error::ComputationAborted`] once `flag` is set
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Mine the genesis block
    pub fn mine_genesis(&self) -> Result<MinedBlock> {
        self.add_block(None, GENESIS_MESSAGE)
    }

    /// Mine a genesis block followed by `blocks - 1` blocks carrying `message`
    ///
    /// Returns the whole chain, genesis first.
    pub fn mine_chain(&self, blocks: u32, message: &[u8]) -> Result<Vec<MinedBlock>> {
        if blocks == 0 {
            return Err(InvalidInput::ZeroBlocks.into());
        }
        if message.is_empty() {
            return Err(InvalidInput::EmptyMessage.into());
        }
        data_length(message.len())?;

        let mut chain = Vec::with_capacity(blocks as usize);
        let mut previous = self.mine_genesis()?;
        for _ in 1..blocks {
            let block = self.add_block(Some(&previous), message)?;
            chain.push(std::mem::replace(&mut previous, block));
        }
        chain.push(previous);
        Ok(chain)
    }

    /// Build a block over `data` linked to `previous` and mine it
    pub fn add_block(&self, previous: Option<&MinedBlock>, data: &[u8]) -> Result<MinedBlock> {
        let mut header = BlockHeader {
            timestamp: 0,
            data_length: data_length(data.len())?,
            data_hash: Sha256Hash::hash(data),
            previous_header_hash: previous.map_or([0u8; SEED_SIZE], |block| block.hash),
            nonce: 0,
        };
        debug!(
            kind = if previous.is_some() { "block" } else { "genesis" },
            data_hash = %hex::encode(header.data_hash),
            previous_hash = %hex::encode(header.previous_header_hash),
            "adding block"
        );

        let hash = self.mine_header(&mut header)?;
        info!(
            timestamp = header.timestamp,
            nonce = header.nonce,
            "created block"
        );
        Ok(MinedBlock { header, hash })
    }

    /// Stamp `header` and search for a qualifying nonce
    ///
    /// An exhausted sweep restarts with a fresh timestamp. If the clock has
    /// not moved, the search ends with [`Error::NonceSpaceExhausted`].
    pub fn mine_header(&self, header: &mut BlockHeader) -> Result<HashOutput> {
        let mut last_timestamp = None;
        loop {
            self.check_cancel()?;
            let timestamp = self.clock.unix_time();
            if last_timestamp == Some(timestamp) {
                return Err(Error::NonceSpaceExhausted);
            }
            last_timestamp = Some(timestamp);
            header.timestamp = timestamp;

            if let Some((nonce, hash)) = self.search_nonces(header)? {
                header.nonce = nonce;
                return Ok(hash);
            }
            debug!(timestamp, "nonce space exhausted, restamping");
        }
    }

    /// Chunked parallel sweep; `find_first` keeps the lowest qualifying nonce
    #[cfg(feature = "parallel")]
    fn search_nonces(&self, header: &BlockHeader) -> Result<Option<(u32, HashOutput)>> {
        let template = header.to_bytes();
        let mut start = 0u32;
        while start < u32::MAX {
            self.check_cancel()?;
            let end = start.saturating_add(NONCE_CHUNK);
            let found = (start..end)
                .into_par_iter()
                .map(|nonce| {
                    let mut bytes = template;
                    bytes[NONCE_OFFSET..].copy_from_slice(&nonce.to_le_bytes());
                    (nonce, Sha256Hash::hash(&bytes))
                })
                .find_first(|(_, hash)| *hash < self.target);
            if found.is_some() {
                return Ok(found);
            }
            start = end;
        }
        Ok(None)
    }

    /// Sequential sweep over `0..u32::MAX`
    #[cfg(not(feature = "parallel"))]
    fn search_nonces(&self, header: &BlockHeader) -> Result<Option<(u32, HashOutput)>> {
        let mut bytes = header.to_bytes();
        for nonce in 0..u32::MAX {
            if nonce % NONCE_CHUNK == 0 {
                self.check_cancel()?;
            }
            bytes[NONCE_OFFSET..].copy_from_slice(&nonce.to_le_bytes());
            let hash = Sha256Hash::hash(&bytes);
            if hash < self.target {
                return Ok(Some((nonce, hash)));
            }
        }
        Ok(None)
    }

    fn check_cancel(&self) -> Result<()> {
        let cancelled = self
            .cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed));
        if cancelled {
            Err(Error::ComputationAborted)
        } else {
            Ok(())
        }
    }
}
