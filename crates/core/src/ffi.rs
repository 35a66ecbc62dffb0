//! C FFI bindings for mobile platforms

use core::slice;
use std::time::Instant;

use crate::engine::{DerivationRequest, Engine};
use crate::error::{Error, InvalidInput};
use crate::primitives::Sha256Hash;
use crate::stretch::stretch;

/// Digest written successfully
pub const STRETCHHASH_OK: i32 = 0;
/// A required pointer was null
pub const STRETCHHASH_ERR_NULL: i32 = -1;
/// `code` was empty
pub const STRETCHHASH_ERR_EMPTY_CODE: i32 = -2;
/// `iterations` was zero
pub const STRETCHHASH_ERR_ITERATIONS: i32 = -3;
/// `hex_length` was odd or outside 2..=256
pub const STRETCHHASH_ERR_HEX_LENGTH: i32 = -4;
/// `output_len` cannot hold the digest and its NUL terminator
pub const STRETCHHASH_ERR_BUFFER: i32 = -5;
/// Any other failure
pub const STRETCHHASH_ERR_OTHER: i32 = -6;

fn status(err: Error) -> i32 {
    match err {
        Error::InvalidInput(InvalidInput::EmptyCode) => STRETCHHASH_ERR_EMPTY_CODE,
        Error::InvalidInput(InvalidInput::ZeroIterations) => STRETCHHASH_ERR_ITERATIONS,
        Error::InvalidInput(InvalidInput::OddHexLength(_))
        | Error::InvalidInput(InvalidInput::HexLengthOutOfRange(_)) => STRETCHHASH_ERR_HEX_LENGTH,
        _ => STRETCHHASH_ERR_OTHER,
    }
}

/// View a (pointer, length) pair as a slice; a null pointer is only
/// accepted together with a zero length.
///
/// # Safety
/// A non-null `ptr` must be valid for reads of `len` bytes.
unsafe fn input_slice<'a>(ptr: *const u8, len: usize) -> Option<&'a [u8]> {
    if ptr.is_null() {
        return (len == 0).then_some(&[][..]);
    }
    Some(unsafe { slice::from_raw_parts(ptr, len) })
}

/// Derive a digest with the SHA-256 engine
/// - code / code_len: secret input bytes (UTF-8 text in practice)
/// - salt / salt_len: salt bytes, may be null when salt_len is 0
/// - iterations: stretching rounds, at least 1
/// - hex_length: digest length in hex characters, even, 2..=256
/// - output / output_len: receives the digest as NUL-terminated ASCII,
///   needs at least hex_length + 1 bytes
///
/// Returns `STRETCHHASH_OK` or one of the negative `STRETCHHASH_ERR_*` codes.
/// Nothing is written to `output` on failure.
#[unsafe(no_mangle)]
pub extern "C" fn stretchhash_derive(
    code: *const u8,
    code_len: usize,
    salt: *const u8,
    salt_len: usize,
    iterations: u64,
    hex_length: usize,
    output: *mut u8,
    output_len: usize,
) -> i32 {
    if output.is_null() {
        return STRETCHHASH_ERR_NULL;
    }
    let (Some(code), Some(salt)) = (unsafe { input_slice(code, code_len) }, unsafe {
        input_slice(salt, salt_len)
    }) else {
        return STRETCHHASH_ERR_NULL;
    };

    let request = DerivationRequest::new(code, salt, iterations, hex_length);
    if let Err(err) = request.validate() {
        return status(err);
    }
    if output_len <= hex_length {
        return STRETCHHASH_ERR_BUFFER;
    }

    match Engine::<Sha256Hash>::new().derive(&request) {
        Ok(digest) => {
            let out = unsafe { slice::from_raw_parts_mut(output, output_len) };
            out[..hex_length].copy_from_slice(digest.as_str().as_bytes());
            out[hex_length] = 0;
            STRETCHHASH_OK
        }
        Err(err) => status(err),
    }
}

/// Benchmark: stretch a fixed input for `iterations` rounds and return total microseconds
#[unsafe(no_mangle)]
pub extern "C" fn stretchhash_benchmark(iterations: u64) -> u64 {
    let Some(rounds) = core::num::NonZeroU64::new(iterations) else {
        return 0;
    };

    let start = Instant::now();
    let _ = stretch::<Sha256Hash>(b"benchmark code for mobile", b"benchmark salt", rounds);
    start.elapsed().as_micros() as u64
}

/// Get stretching rounds per second from a benchmark run
#[unsafe(no_mangle)]
pub extern "C" fn stretchhash_rounds_per_second(iterations: u64, microseconds: u64) -> f64 {
    if microseconds == 0 {
        return 0.0;
    }
    (iterations as f64) / (microseconds as f64 / 1_000_000.0)
}
