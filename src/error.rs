use thiserror::Error;

/// Closed set of failures the NTLM engine and its HTTP driver can raise.
///
/// Every variant here corresponds to a single well-defined failure mode of the
/// [MS-NLMP] wire format or of the three-leg handshake; nothing here is a
/// stringly-typed catch-all.
#[derive(Debug, Error)]
pub enum NtlmError {
    #[error("CHALLENGE message does not start with the NTLMSSP signature")]
    InvalidSignature,

    #[error("CHALLENGE message type is not 2")]
    InvalidChallengeType,

    #[error("descriptor points past the end of the message")]
    DataOutOfBounds,

    #[error("AV_PAIR value is shorter than its declared length")]
    InvalidTargetInfoLength,

    #[error("UTF-16LE byte string has odd length")]
    InvalidUnicodeLength,

    #[error("marshalled NEGOTIATE message is not 40 bytes")]
    InvalidNegotiateSize,

    #[error("server requires NTLMv1 (NEGOTIATE_LM_KEY), which is not supported")]
    NTLMv1NotSupported,

    #[error("server requires NTLM key exchange, which is not supported")]
    KeyExchangeNotSupported,

    #[error("outgoing negotiation flags would not include UNICODE")]
    UnicodeRequired,

    #[error("anonymous authentication is not supported, user and secret must both be set")]
    AnonymousNotSupported,

    #[error("secret does not decode as a colon-separated LM:NT hash pair")]
    InvalidHash,

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Pass-through wrapper around whatever the inner HTTP transport reports.
///
/// The NTLM engine never inspects the contents of a transport failure; it
/// only needs to propagate it unchanged to the caller.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(#[source] pub Box<dyn std::error::Error + Send + Sync + 'static>);

impl TransportError {
    pub fn new(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Box::new(source))
    }
}

impl From<reqwest::Error> for NtlmError {
    fn from(err: reqwest::Error) -> Self {
        NtlmError::Transport(TransportError::new(err))
    }
}

pub type Result<T> = std::result::Result<T, NtlmError>;
