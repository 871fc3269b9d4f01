//! Hex helpers used by the integer, scalar and CLI layers

use crate::error::{Error, Result};

/// Decode a big-endian hex string into bytes
///
/// Accepts an optional `0x`/`0X` prefix and `_` digit separators. Odd-length
/// input is treated as if it had a leading zero.
pub fn parse_hex(input: &str) -> Result<Vec<u8>> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let mut cleaned: String = digits.chars().filter(|&c| c != '_').collect();
    if cleaned.is_empty() {
        return Err(Error::InvalidHex(input.to_string()));
    }
    if cleaned.len() % 2 == 1 {
        cleaned.insert(0, '0');
    }
    hex::decode(&cleaned).map_err(|e| Error::InvalidHex(format!("{}: {}", input, e)))
}

/// Reverse the byte order of a hex string, e.g. "abcdef" => "efcdab"
///
/// Converts between the little-endian wire form of X25519 test vectors and
/// the big-endian form printed by `to_hex`.
pub fn hex_flip_endian(input: &str) -> Result<String> {
    if input.len() % 2 == 1 {
        return Err(Error::InvalidHex(format!("{}: odd length", input)));
    }
    let mut bytes =
        hex::decode(input).map_err(|e| Error::InvalidHex(format!("{}: {}", input, e)))?;
    bytes.reverse();
    Ok(hex::encode(bytes))
}
