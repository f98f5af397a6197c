//! Bit-exact marshal/unmarshal of the three NTLM messages and the crypto
//! kernel that backs the AUTHENTICATE response (MS-NLMP).

pub mod authenticate;
pub mod av_pair;
pub mod challenge;
mod crypto;
mod field;
mod flags;
pub mod negotiate;

pub use crypto::{lmv2_response, nt_hash, ntlmv2_hash, ntv2_response, CHALLENGE_SIZE, HASH_SIZE};
pub use flags::NegotiateFlags;

pub use authenticate::{craft_authenticate, AuthenticateMessage};
pub use challenge::{unmarshal_challenge, ChallengeMessage};
pub use negotiate::{marshal_negotiate, NegotiateMessage};

pub(crate) const NTLM_SIGNATURE: &[u8; 8] = b"NTLMSSP\0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MessageType {
    Negotiate = 1,
    Challenge = 2,
    Authenticate = 3,
}
