//! NTLMv2 authentication engine and HTTP challenge-response driver for the
//! WSUS administrative SOAP API.
//!
//! This crate covers the part of a WSUS client that is actually tricky: the
//! [MS-NLMP] message codec, the crypto kernel that produces the NTv2 proof,
//! and the three-leg HTTP handshake that carries it. The SOAP envelope
//! surface above it is out of scope; see [`soap`] for the thin seam between
//! the two.

pub mod config;
pub mod credential;
pub mod driver;
pub mod error;
pub mod ntlm;
pub mod session;
pub mod soap;
pub mod transport;
pub mod unicode;

pub use config::ClientOptions;
pub use credential::{Credential, Secret};
pub use error::{NtlmError, Result};
pub use session::Session;
