//! Marshal the NEGOTIATE message (MS-NLMP §2.2.1.1).

use byteorder::{LittleEndian, WriteBytesExt};

use crate::credential::Credential;
use crate::error::{NtlmError, Result};
use crate::ntlm::field::VariableField;
use crate::ntlm::{MessageType, NegotiateFlags, NTLM_SIGNATURE};

const HEADER_SIZE: usize = 40;
const VERSION: [u8; 8] = [6, 1, 0xB1, 0x1D, 0x00, 0x00, 0x00, 0x0f]; // Major=6 Minor=1 Build=7601 Revision=15

/// The flags this client always asserts, independent of the credential.
const BASE_FLAGS: NegotiateFlags = NegotiateFlags::UNICODE
    .union(NegotiateFlags::EXTENDED_SESSION_SECURITY)
    .union(NegotiateFlags::NEGOTIATE_128)
    .union(NegotiateFlags::NEGOTIATE_56)
    .union(NegotiateFlags::TARGET_INFO);

pub struct NegotiateMessage {
    pub bytes: Vec<u8>,
}

/// Builds the 40-byte header plus the OEM-encoded `upper(domain) ||
/// upper(workstation)` payload, and returns the flags that were asserted.
pub fn marshal_negotiate(credential: &Credential) -> Result<NegotiateMessage> {
    let mut flags = BASE_FLAGS;
    if !credential.domain.is_empty() {
        flags |= NegotiateFlags::DOMAIN_SUPPLIED;
    }
    if !credential.workstation.is_empty() {
        flags |= NegotiateFlags::WORKSTATION_SUPPLIED;
    }

    let mut offset = HEADER_SIZE as u32;
    let domain = VariableField {
        buffer: credential.domain.to_uppercase().into_bytes(),
        offset,
    };
    offset += domain.len() as u32;
    let workstation = VariableField {
        buffer: credential.workstation.to_uppercase().into_bytes(),
        offset,
    };

    let mut bytes = Vec::with_capacity(HEADER_SIZE + domain.len() + workstation.len());
    bytes.extend_from_slice(NTLM_SIGNATURE);
    bytes
        .write_u32::<LittleEndian>(MessageType::Negotiate as u32)
        .expect("Vec write is infallible");
    bytes
        .write_u32::<LittleEndian>(flags.bits())
        .expect("Vec write is infallible");
    domain.write_descriptor(&mut bytes).expect("Vec write is infallible");
    workstation.write_descriptor(&mut bytes).expect("Vec write is infallible");
    bytes.extend_from_slice(&VERSION);

    if bytes.len() != HEADER_SIZE {
        return Err(NtlmError::InvalidNegotiateSize);
    }

    bytes.extend_from_slice(&domain.buffer);
    bytes.extend_from_slice(&workstation.buffer);

    Ok(NegotiateMessage { bytes })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::credential::{Credential, Secret};

    #[test]
    fn length_matches_header_plus_payload() {
        let credential =
            Credential::new("user", Secret::Password("pw".into()), "DOMAIN", "WS").unwrap();
        let message = marshal_negotiate(&credential).unwrap();
        assert_eq!(message.bytes.len(), HEADER_SIZE + "DOMAIN".len() + "WS".len());
    }

    #[test]
    fn no_domain_or_workstation_is_header_only() {
        let credential = Credential::new("user", Secret::Password("pw".into()), "", "").unwrap();
        let message = marshal_negotiate(&credential).unwrap();
        assert_eq!(message.bytes.len(), HEADER_SIZE);
    }

    #[test]
    fn payload_is_upper_cased() {
        let credential =
            Credential::new("user", Secret::Password("pw".into()), "domain", "").unwrap();
        let message = marshal_negotiate(&credential).unwrap();
        assert_eq!(&message.bytes[HEADER_SIZE..], b"DOMAIN");
    }
}
