//! Unmarshal the CHALLENGE message (MS-NLMP §2.2.1.2).

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{NtlmError, Result};
use crate::ntlm::av_pair::{self, AvPairMap};
use crate::ntlm::field::VariableField;
use crate::ntlm::{NegotiateFlags, NTLM_SIGNATURE};
use crate::unicode;

pub struct ChallengeMessage {
    pub flags: NegotiateFlags,
    pub server_challenge: [u8; 8],
    pub target_name: String,
    /// Raw target-info bytes exactly as received, including the EOL
    /// terminator. Echoed byte-for-byte inside the NTv2 response.
    pub target_info_raw: Vec<u8>,
    pub target_info: AvPairMap,
}

/// Parses a server CHALLENGE and rejects variants this client does not
/// support (NTLMv1-only, key exchange) or cannot negotiate back (no UNICODE).
pub fn unmarshal_challenge(message: &[u8]) -> Result<ChallengeMessage> {
    let mut cursor = message;

    let mut signature = [0u8; 8];
    read_exact(&mut cursor, &mut signature)?;
    if &signature != NTLM_SIGNATURE {
        return Err(NtlmError::InvalidSignature);
    }

    let message_type = cursor.read_u32::<LittleEndian>().map_err(|_| NtlmError::DataOutOfBounds)?;
    if message_type != 2 {
        return Err(NtlmError::InvalidChallengeType);
    }

    let mut target_name_field = VariableField::read_descriptor(&mut cursor)
        .map_err(|_| NtlmError::DataOutOfBounds)?;
    let flags_bits = cursor.read_u32::<LittleEndian>().map_err(|_| NtlmError::DataOutOfBounds)?;
    let flags = NegotiateFlags::from_bits_truncate(flags_bits);

    let mut server_challenge = [0u8; 8];
    read_exact(&mut cursor, &mut server_challenge)?;
    let mut reserved = [0u8; 8];
    read_exact(&mut cursor, &mut reserved)?;

    let mut target_info_field = VariableField::read_descriptor(&mut cursor)
        .map_err(|_| NtlmError::DataOutOfBounds)?;

    if flags.contains(NegotiateFlags::LM_KEY) {
        return Err(NtlmError::NTLMv1NotSupported);
    }
    if flags.contains(NegotiateFlags::KEY_EXCH) {
        return Err(NtlmError::KeyExchangeNotSupported);
    }
    if !flags.contains(NegotiateFlags::UNICODE) {
        return Err(NtlmError::UnicodeRequired);
    }

    let target_name = if !target_name_field.is_empty() {
        target_name_field.read_payload(message)?;
        if flags.contains(NegotiateFlags::UNICODE) {
            unicode::decode(&target_name_field.buffer)?
        } else {
            String::from_utf8_lossy(&target_name_field.buffer).into_owned()
        }
    } else {
        String::new()
    };

    let (target_info_raw, target_info) = if !target_info_field.is_empty() {
        target_info_field.read_payload(message)?;
        let parsed = av_pair::parse(&target_info_field.buffer)?;
        (target_info_field.buffer, parsed)
    } else {
        (Vec::new(), AvPairMap::new())
    };

    Ok(ChallengeMessage {
        flags,
        server_challenge,
        target_name,
        target_info_raw,
        target_info,
    })
}

fn read_exact(cursor: &mut &[u8], out: &mut [u8]) -> Result<()> {
    std::io::Read::read_exact(cursor, out).map_err(|_| NtlmError::DataOutOfBounds)
}
