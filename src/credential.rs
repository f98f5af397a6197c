//! The credential bundle: immutable over a session, holds no per-request
//! mutable state (§3, §5).

use crate::error::{NtlmError, Result};
use crate::ntlm::{nt_hash, HASH_SIZE};

/// Either a plaintext password or a pre-computed NT hash supplied as hex.
#[derive(Clone, Debug)]
pub enum Secret {
    Password(String),
    /// The classic `LM:NT` colon-separated pair; only the NT half (after the
    /// first colon) is used.
    Hash(String),
}

/// Immutable credentials for one WSUS session.
#[derive(Clone, Debug)]
pub struct Credential {
    pub user: String,
    pub secret: Secret,
    pub domain: String,
    pub workstation: String,
    pub debug: bool,
}

impl Credential {
    /// Anonymous authentication is not supported: `user` and the secret's
    /// effective password/hash field must both be non-empty.
    pub fn new(
        user: impl Into<String>,
        secret: Secret,
        domain: impl Into<String>,
        workstation: impl Into<String>,
    ) -> Result<Self> {
        let user = user.into();
        let secret_is_empty = match &secret {
            Secret::Password(p) => p.is_empty(),
            Secret::Hash(h) => h.is_empty(),
        };
        if user.is_empty() || secret_is_empty {
            return Err(NtlmError::AnonymousNotSupported);
        }

        Ok(Self {
            user,
            secret,
            domain: domain.into(),
            workstation: workstation.into(),
            debug: false,
        })
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Derives the 16-byte NT hash, either by hashing the plaintext password
    /// or by decoding the hex NT half of a pre-computed hash.
    ///
    /// For [`Secret::Hash`], the format is `LM:NT`; only the field after the
    /// first colon is used. Missing or malformed hex fails with
    /// [`NtlmError::InvalidHash`].
    pub fn nt_hash(&self) -> Result<[u8; HASH_SIZE]> {
        match &self.secret {
            Secret::Password(password) => Ok(nt_hash(password)),
            Secret::Hash(value) => {
                let nt_field = value.split(':').nth(1).ok_or(NtlmError::InvalidHash)?;
                let bytes = hex::decode(nt_field).map_err(|_| NtlmError::InvalidHash)?;
                if bytes.len() != HASH_SIZE {
                    return Err(NtlmError::InvalidHash);
                }
                let mut out = [0u8; HASH_SIZE];
                out.copy_from_slice(&bytes);
                Ok(out)
            }
        }
    }
}
