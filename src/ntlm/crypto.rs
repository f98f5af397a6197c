//! The NTLM crypto kernel: NT hash, NTLMv2 hash, and the NTv2/LMv2 response
//! constructions (MS-NLMP §3.3.2).

use byteorder::{LittleEndian, WriteBytesExt};
use digest::Digest;
use hmac::{Hmac, Mac};
use md4::Md4;
use md5::Md5;

use crate::unicode;

pub const HASH_SIZE: usize = 16;
pub const CHALLENGE_SIZE: usize = 8;
pub const LM_V2_RESPONSE_SIZE: usize = HASH_SIZE + CHALLENGE_SIZE;

/// `MD4(UTF16LE(password))`, the classic "NT hash".
pub fn nt_hash(password: &str) -> [u8; HASH_SIZE] {
    let digest = Md4::digest(unicode::encode(password));
    let mut out = [0u8; HASH_SIZE];
    out.copy_from_slice(&digest);
    out
}

/// `HMAC_MD5(ntHash, UTF16LE(upper(user) || targetName))`.
///
/// Only `user` is upper-cased; `target_name` is used verbatim. This asymmetry
/// is load-bearing for interop and must not be "fixed".
pub fn ntlmv2_hash(nt_hash: &[u8], user: &str, target_name: &str) -> [u8; HASH_SIZE] {
    let mut identity = user.to_uppercase();
    identity.push_str(target_name);
    hmac_md5(nt_hash, &unicode::encode(&identity))
}

/// Builds the `temp` blob and the NTv2 proof, returning `proof || temp`.
pub fn ntv2_response(
    ntlmv2_hash: &[u8],
    server_challenge: &[u8; CHALLENGE_SIZE],
    client_challenge: &[u8; CHALLENGE_SIZE],
    timestamp: u64,
    target_info: &[u8],
) -> Vec<u8> {
    let mut temp = Vec::with_capacity(28 + target_info.len());
    temp.extend_from_slice(&[0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
    temp.write_u64::<LittleEndian>(timestamp).expect("Vec write is infallible");
    temp.extend_from_slice(client_challenge);
    temp.extend_from_slice(&[0x00; 4]);
    temp.extend_from_slice(target_info);
    temp.extend_from_slice(&[0x00; 4]);

    let mut proof_input = Vec::with_capacity(CHALLENGE_SIZE + temp.len());
    proof_input.extend_from_slice(server_challenge);
    proof_input.extend_from_slice(&temp);
    let proof = hmac_md5(ntlmv2_hash, &proof_input);

    let mut response = Vec::with_capacity(HASH_SIZE + temp.len());
    response.extend_from_slice(&proof);
    response.extend_from_slice(&temp);
    response
}

/// `HMAC_MD5(ntlmv2Hash, serverChallenge || clientChallenge) || clientChallenge`.
pub fn lmv2_response(
    ntlmv2_hash: &[u8],
    server_challenge: &[u8; CHALLENGE_SIZE],
    client_challenge: &[u8; CHALLENGE_SIZE],
) -> [u8; LM_V2_RESPONSE_SIZE] {
    let mut input = Vec::with_capacity(CHALLENGE_SIZE * 2);
    input.extend_from_slice(server_challenge);
    input.extend_from_slice(client_challenge);
    let proof = hmac_md5(ntlmv2_hash, &input);

    let mut out = [0u8; LM_V2_RESPONSE_SIZE];
    out[..HASH_SIZE].copy_from_slice(&proof);
    out[HASH_SIZE..].copy_from_slice(client_challenge);
    out
}

fn hmac_md5(key: &[u8], data: &[u8]) -> [u8; HASH_SIZE] {
    let mut mac = <Hmac<Md5>>::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(data);
    let mut out = [0u8; HASH_SIZE];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

#[cfg(test)]
mod test {
    use super::*;

    // MSDN canonical NTLM test vector.
    #[test]
    fn nt_hash_known_vector() {
        let hash = nt_hash("Password");
        assert_eq!(hex::encode_upper(hash), "8846F7EAEE8FB117AD06BDD830B7586C");
    }

    #[test]
    fn ntlmv2_hash_known_vector() {
        let hash = nt_hash("Password");
        let v2 = ntlmv2_hash(&hash, "User", "Domain");
        assert_eq!(hex::encode_upper(v2), "0C868A403BFD7A93A3001EF22EF02E3F");
    }

    #[test]
    fn ntv2_response_changes_with_any_input() {
        let hash = ntlmv2_hash(&nt_hash("Password"), "User", "Domain");
        let server_challenge = [0x01; CHALLENGE_SIZE];
        let client_challenge = [0x02; CHALLENGE_SIZE];
        let target_info = b"target-info".to_vec();
        let base = ntv2_response(&hash, &server_challenge, &client_challenge, 42, &target_info);

        let mut other_server = server_challenge;
        other_server[0] ^= 0xFF;
        assert_ne!(
            ntv2_response(&hash, &other_server, &client_challenge, 42, &target_info)[..HASH_SIZE],
            base[..HASH_SIZE]
        );

        let mut other_client = client_challenge;
        other_client[0] ^= 0xFF;
        assert_ne!(
            ntv2_response(&hash, &server_challenge, &other_client, 42, &target_info)[..HASH_SIZE],
            base[..HASH_SIZE]
        );

        assert_ne!(
            ntv2_response(&hash, &server_challenge, &client_challenge, 43, &target_info)[..HASH_SIZE],
            base[..HASH_SIZE]
        );

        let mut other_target_info = target_info.clone();
        other_target_info.push(0x00);
        assert_ne!(
            ntv2_response(&hash, &server_challenge, &client_challenge, 42, &other_target_info)
                [..HASH_SIZE],
            base[..HASH_SIZE]
        );

        let other_hash = ntlmv2_hash(&nt_hash("password2"), "User", "Domain");
        assert_ne!(
            ntv2_response(&other_hash, &server_challenge, &client_challenge, 42, &target_info)
                [..HASH_SIZE],
            base[..HASH_SIZE]
        );
    }

    #[test]
    fn lmv2_response_layout() {
        let hash = ntlmv2_hash(&nt_hash("Password"), "User", "Domain");
        let server_challenge = [0xAA; CHALLENGE_SIZE];
        let client_challenge = [0xBB; CHALLENGE_SIZE];
        let response = lmv2_response(&hash, &server_challenge, &client_challenge);
        assert_eq!(response.len(), LM_V2_RESPONSE_SIZE);
        assert_eq!(&response[HASH_SIZE..], &client_challenge);
    }
}
