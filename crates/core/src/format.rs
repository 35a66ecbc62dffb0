//! Digest formatting

use crate::error::{InvalidInput, Result};
use crate::params::{MAX_HEX_LENGTH, MIN_HEX_LENGTH};

/// Check that `hex_length` is even and within `MIN_HEX_LENGTH..=MAX_HEX_LENGTH`
pub fn validate_hex_length(hex_length: usize) -> Result<()> {
    if hex_length % 2 != 0 {
        return Err(InvalidInput::OddHexLength(hex_length).into());
    }
    if !(MIN_HEX_LENGTH..=MAX_HEX_LENGTH).contains(&hex_length) {
        return Err(InvalidInput::HexLengthOutOfRange(hex_length).into());
    }
    Ok(())
}

/// Render the first `hex_length / 2` bytes of `bytes` as uppercase hex
///
/// Odd lengths are rejected rather than rounded, as are a zero length and a
/// `hex_length` that `bytes` is too short to cover.
pub fn format_digest(bytes: &[u8], hex_length: usize) -> Result<String> {
    if hex_length % 2 != 0 {
        return Err(InvalidInput::OddHexLength(hex_length).into());
    }
    let byte_count = hex_length / 2;
    if byte_count == 0 || byte_count > bytes.len() {
        return Err(InvalidInput::HexLengthOutOfRange(hex_length).into());
    }
    Ok(hex::encode_upper(&bytes[..byte_count]))
}
