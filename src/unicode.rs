//! UTF-16LE encode/decode helpers shared by every NTLM name and payload field.

use crate::error::{NtlmError, Result};

/// Encodes `s` as little-endian UTF-16 code units. No BOM, no NUL terminator.
pub fn encode(s: &str) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(s.len() * 2);
    for unit in s.encode_utf16() {
        buffer.extend_from_slice(&unit.to_le_bytes());
    }
    buffer
}

/// Decodes a little-endian UTF-16 byte string back into a `String`.
///
/// Fails with [`NtlmError::InvalidUnicodeLength`] when `bytes` has odd length;
/// surrogate pairs are accepted via [`char::decode_utf16`]'s lossy handling
/// folded into [`String::from_utf16_lossy`]-equivalent strictness (invalid
/// sequences are replaced, matching how Windows peers tolerate the field).
pub fn decode(bytes: &[u8]) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(NtlmError::InvalidUnicodeLength);
    }

    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
        .collect();

    Ok(String::from_utf16_lossy(&units))
}
