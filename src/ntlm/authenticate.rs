//! Craft the AUTHENTICATE message (MS-NLMP §2.2.1.3).

use byteorder::{LittleEndian, WriteBytesExt};
use rand::RngCore;

use crate::credential::Credential;
use crate::error::Result;
use crate::ntlm::av_pair;
use crate::ntlm::challenge::ChallengeMessage;
use crate::ntlm::crypto::{lmv2_response, ntlmv2_hash, ntv2_response, CHALLENGE_SIZE};
use crate::ntlm::field::VariableField;
use crate::ntlm::{MessageType, NegotiateFlags, NTLM_SIGNATURE};
use crate::unicode;

const HEADER_SIZE: usize = 64;

/// Windows FILETIME epoch offset: 100ns ticks between 1601-01-01 and the Unix
/// epoch.
const FILETIME_UNIX_EPOCH_OFFSET: u64 = 116_444_736_000_000_000;

pub struct AuthenticateMessage {
    pub bytes: Vec<u8>,
}

/// Builds the AUTHENTICATE message responding to `challenge` using
/// `credential`, clearing the VERSION flag and preserving the server's raw
/// target-info bytes verbatim inside the NTv2 response.
pub fn craft_authenticate(
    credential: &Credential,
    challenge: &ChallengeMessage,
) -> Result<AuthenticateMessage> {
    let timestamp = av_pair::timestamp(&challenge.target_info).unwrap_or_else(windows_timestamp_now);

    let mut client_challenge = [0u8; CHALLENGE_SIZE];
    rand::thread_rng().fill_bytes(&mut client_challenge);

    let nt_hash = credential.nt_hash()?;
    let v2_hash = ntlmv2_hash(&nt_hash, &credential.user, &challenge.target_name);

    let nt_response = ntv2_response(
        &v2_hash,
        &challenge.server_challenge,
        &client_challenge,
        timestamp,
        &challenge.target_info_raw,
    );

    let lm_response = if challenge.target_info_raw.is_empty() {
        lmv2_response(&v2_hash, &challenge.server_challenge, &client_challenge).to_vec()
    } else {
        Vec::new()
    };

    let target_name = unicode::encode(&challenge.target_name);
    let user_name = unicode::encode(&credential.user);
    let workstation = Vec::new();

    let mut offset = HEADER_SIZE as u32;
    let lm_field = VariableField { buffer: lm_response, offset };
    offset += lm_field.len() as u32;
    let nt_field = VariableField { buffer: nt_response, offset };
    offset += nt_field.len() as u32;
    let target_field = VariableField { buffer: target_name, offset };
    offset += target_field.len() as u32;
    let user_field = VariableField { buffer: user_name, offset };
    offset += user_field.len() as u32;
    let workstation_field = VariableField { buffer: workstation, offset };

    let flags = challenge.flags & !NegotiateFlags::VERSION;

    let mut bytes = Vec::with_capacity(
        HEADER_SIZE
            + lm_field.len()
            + nt_field.len()
            + target_field.len()
            + user_field.len()
            + workstation_field.len(),
    );
    bytes.extend_from_slice(NTLM_SIGNATURE);
    bytes
        .write_u32::<LittleEndian>(MessageType::Authenticate as u32)
        .expect("Vec write is infallible");
    lm_field.write_descriptor(&mut bytes).expect("Vec write is infallible");
    nt_field.write_descriptor(&mut bytes).expect("Vec write is infallible");
    target_field.write_descriptor(&mut bytes).expect("Vec write is infallible");
    user_field.write_descriptor(&mut bytes).expect("Vec write is infallible");
    workstation_field
        .write_descriptor(&mut bytes)
        .expect("Vec write is infallible");
    bytes.extend_from_slice(&[0u8; 8]); // reserved
    bytes
        .write_u32::<LittleEndian>(flags.bits())
        .expect("Vec write is infallible");

    debug_assert_eq!(bytes.len(), HEADER_SIZE);

    bytes.extend_from_slice(&lm_field.buffer);
    bytes.extend_from_slice(&nt_field.buffer);
    bytes.extend_from_slice(&target_field.buffer);
    bytes.extend_from_slice(&user_field.buffer);
    bytes.extend_from_slice(&workstation_field.buffer);

    Ok(AuthenticateMessage { bytes })
}

fn windows_timestamp_now() -> u64 {
    let unix_nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0);
    (unix_nanos as u64) / 100 + FILETIME_UNIX_EPOCH_OFFSET
}
