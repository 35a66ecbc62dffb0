//! Engine facade: validate, stretch, expand, format
//!
//! Every call is a pure function of its request. No state survives between
//! calls, so an [`Engine`] can be shared freely across threads.

use core::fmt;
use core::marker::PhantomData;
use core::num::NonZeroU64;
use core::sync::atomic::AtomicBool;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use crate::error::{InvalidInput, Result};
use crate::expand::expand_into;
use crate::format::{format_digest, validate_hex_length};
use crate::params::MAX_DIGEST_BYTES;
use crate::primitives::{Algorithm, Blake3Hash, PrimitiveHash, Sha256Hash};
use crate::stretch::{Seed, stretch, stretch_cancellable};

/// Parameters of one derivation
#[derive(Clone, PartialEq, Eq)]
pub struct DerivationRequest {
    pub code: Vec<u8>,
    pub salt: Vec<u8>,
    pub iterations: u64,
    /// Requested digest length in hex characters
    pub hex_length: usize,
}

impl DerivationRequest {
    pub fn new(
        code: impl Into<Vec<u8>>,
        salt: impl Into<Vec<u8>>,
        iterations: u64,
        hex_length: usize,
    ) -> Self {
        Self {
            code: code.into(),
            salt: salt.into(),
            iterations,
            hex_length,
        }
    }

    /// Check every precondition, returning the iteration count on success
    pub fn validate(&self) -> Result<NonZeroU64> {
        if self.code.is_empty() {
            return Err(InvalidInput::EmptyCode.into());
        }
        let iterations = NonZeroU64::new(self.iterations).ok_or(InvalidInput::ZeroIterations)?;
        validate_hex_length(self.hex_length)?;
        Ok(iterations)
    }
}

impl fmt::Debug for DerivationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivationRequest")
            .field("code", &format_args!("<{} bytes>", self.code.len()))
            .field("salt", &String::from_utf8_lossy(&self.salt))
            .field("iterations", &self.iterations)
            .field("hex_length", &self.hex_length)
            .finish()
    }
}

/// Uppercase hex digest of exactly the requested length
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest(String);

impl Digest {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Digest> for String {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl PartialEq<str> for Digest {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Digest {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Derivation engine over the primitive `P`
pub struct Engine<P = Sha256Hash> {
    _primitive: PhantomData<fn() -> P>,
}

impl<P: PrimitiveHash> Engine<P> {
    pub const fn new() -> Self {
        Self {
            _primitive: PhantomData,
        }
    }

    /// Derive the digest for `request`
    pub fn derive(&self, request: &DerivationRequest) -> Result<Digest> {
        let iterations = request.validate()?;
        debug!(
            primitive = P::NAME,
            iterations = iterations.get(),
            hex_length = request.hex_length,
            "deriving digest"
        );
        let seed = stretch::<P>(&request.code, &request.salt, iterations);
        self.render(&seed, request.hex_length)
    }

    /// Derive the digest for `request`, giving up once `cancel` is set
    pub fn derive_cancellable(
        &self,
        request: &DerivationRequest,
        cancel: &AtomicBool,
    ) -> Result<Digest> {
        let iterations = request.validate()?;
        debug!(
            primitive = P::NAME,
            iterations = iterations.get(),
            hex_length = request.hex_length,
            "deriving digest (cancellable)"
        );
        let seed = stretch_cancellable::<P>(&request.code, &request.salt, iterations, cancel)
            .inspect_err(|_| debug!("derivation aborted"))?;
        self.render(&seed, request.hex_length)
    }

    /// Derive many independent requests on the rayon pool, preserving order
    #[cfg(feature = "parallel")]
    pub fn derive_batch(&self, requests: &[DerivationRequest]) -> Vec<Result<Digest>> {
        requests.par_iter().map(|request| self.derive(request)).collect()
    }

    /// Derive many independent requests in order (sequential fallback)
    #[cfg(not(feature = "parallel"))]
    pub fn derive_batch(&self, requests: &[DerivationRequest]) -> Vec<Result<Digest>> {
        requests.iter().map(|request| self.derive(request)).collect()
    }

    fn render(&self, seed: &Seed, hex_length: usize) -> Result<Digest> {
        let mut buf = [0u8; MAX_DIGEST_BYTES];
        let bytes = &mut buf[..hex_length / 2];
        expand_into::<P>(seed, bytes);
        format_digest(bytes, hex_length).map(Digest)
    }
}

impl<P: PrimitiveHash> Default for Engine<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Clone for Engine<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for Engine<P> {}

impl<P: PrimitiveHash> fmt::Debug for Engine<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine").field("primitive", &P::NAME).finish()
    }
}

/// Derive a digest from text inputs with the default SHA-256 primitive
///
/// ```rust
/// use stretchhash_core::derive_digest;
///
/// let short = derive_digest("salt.ish", "giam", 1_000, 8).unwrap();
/// let long = derive_digest("salt.ish", "giam", 1_000, 20).unwrap();
/// assert_eq!(short.len(), 8);
/// assert!(long.as_str().starts_with(short.as_str()));
/// ```
pub fn derive_digest(code: &str, salt: &str, iterations: u64, hex_length: usize) -> Result<Digest> {
    Engine::<Sha256Hash>::new().derive(&DerivationRequest::new(code, salt, iterations, hex_length))
}

/// Derive with a primitive chosen at runtime
pub fn derive_with(algorithm: Algorithm, request: &DerivationRequest) -> Result<Digest> {
    match algorithm {
        Algorithm::Sha256 => Engine::<Sha256Hash>::new().derive(request),
        Algorithm::Blake3 => Engine::<Blake3Hash>::new().derive(request),
    }
}

/// Cancellable derivation with a primitive chosen at runtime
pub fn derive_with_cancellable(
    algorithm: Algorithm,
    request: &DerivationRequest,
    cancel: &AtomicBool,
) -> Result<Digest> {
    match algorithm {
        Algorithm::Sha256 => Engine::<Sha256Hash>::new().derive_cancellable(request, cancel),
        Algorithm::Blake3 => Engine::<Blake3Hash>::new().derive_cancellable(request, cancel),
    }
}

/// Batch derivation with a primitive chosen at runtime
pub fn derive_batch_with(algorithm: Algorithm, requests: &[DerivationRequest]) -> Vec<Result<Digest>> {
    match algorithm {
        Algorithm::Sha256 => Engine::<Sha256Hash>::new().derive_batch(requests),
        Algorithm::Blake3 => Engine::<Blake3Hash>::new().derive_batch(requests),
    }
}
