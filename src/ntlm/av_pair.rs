//! AV_PAIR target-info list: `(u16 id, u16 length, bytes value)` records
//! terminated by `MsvAvEOL`, carried inside the CHALLENGE message.

use std::collections::BTreeMap;
use std::io::{self, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{NtlmError, Result};

pub const MSV_AV_EOL: u16 = 0;
pub const MSV_AV_NB_COMPUTER_NAME: u16 = 1;
pub const MSV_AV_NB_DOMAIN_NAME: u16 = 2;
pub const MSV_AV_DNS_COMPUTER_NAME: u16 = 3;
pub const MSV_AV_DNS_DOMAIN_NAME: u16 = 4;
pub const MSV_AV_DNS_TREE_NAME: u16 = 5;
pub const MSV_AV_FLAGS: u16 = 6;
pub const MSV_AV_TIMESTAMP: u16 = 7;
pub const MSV_AV_SINGLE_HOST: u16 = 8;
pub const MSV_AV_TARGET_NAME: u16 = 9;
pub const MSV_AV_CHANNEL_BINDINGS: u16 = 10;

/// AV_PAIR id -> value, decoded from a CHALLENGE's raw target-info bytes.
pub type AvPairMap = BTreeMap<u16, Vec<u8>>;

/// Parses `buffer` into an id -> value map, stopping at the `MsvAvEOL` sentinel.
///
/// A record whose declared length runs past the remaining bytes fails with
/// [`NtlmError::InvalidTargetInfoLength`].
pub fn parse(buffer: &[u8]) -> Result<AvPairMap> {
    let mut cursor = buffer;
    let mut pairs = AvPairMap::new();

    loop {
        let id = read_u16(&mut cursor)?;
        if id == MSV_AV_EOL {
            break;
        }
        let len = read_u16(&mut cursor)? as usize;
        if cursor.len() < len {
            return Err(NtlmError::InvalidTargetInfoLength);
        }
        let mut value = vec![0u8; len];
        cursor
            .read_exact(&mut value)
            .map_err(|_| NtlmError::InvalidTargetInfoLength)?;
        pairs.insert(id, value);
    }

    Ok(pairs)
}

fn read_u16(cursor: &mut &[u8]) -> Result<u16> {
    cursor
        .read_u16::<LittleEndian>()
        .map_err(|_: io::Error| NtlmError::InvalidTargetInfoLength)
}

/// Reads the `MsvAvTimestamp` AV_PAIR, if present, as a little-endian u64.
pub fn timestamp(pairs: &AvPairMap) -> Option<u64> {
    let value = pairs.get(&MSV_AV_TIMESTAMP)?;
    if value.len() != 8 {
        return None;
    }
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(value);
    Some(u64::from_le_bytes(bytes))
}
