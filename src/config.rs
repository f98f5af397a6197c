//! The credential-bundle options the surrounding SOAP layer fills in, plus
//! the defaults the session glue falls back on. Host/port/path validation
//! itself is the SOAP layer's concern; this module only carries the values
//! and their defaults through to [`Session`] construction.

use std::time::Duration;

use crate::credential::{Credential, Secret};
use crate::error::Result;
use crate::session::Session;
use crate::transport::ReqwestTransport;

pub const DEFAULT_PATH: &str = "/ApiRemoting30/WebService.asmx";
pub const DEFAULT_HTTP_PORT: u16 = 8530;
pub const DEFAULT_HTTPS_PORT: u16 = 8531;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything needed to reach and authenticate against one WSUS server.
#[derive(Clone, Debug)]
pub struct ClientOptions {
    pub host: String,
    pub port: Option<u16>,
    pub path: String,
    pub secure: bool,
    pub domain: String,
    pub workstation: String,
    pub user: String,
    pub secret: String,
    /// When set, `secret` is the `LM:NT` hex hash pair rather than a plaintext password.
    pub is_hash: bool,
    pub debug: bool,
    pub timeout: Duration,
}

impl ClientOptions {
    pub fn new(host: impl Into<String>, user: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: None,
            path: DEFAULT_PATH.to_string(),
            secure: true,
            domain: String::new(),
            workstation: String::new(),
            user: user.into(),
            secret: secret.into(),
            is_hash: false,
            debug: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    fn effective_port(&self) -> u16 {
        self.port.unwrap_or(if self.secure { DEFAULT_HTTPS_PORT } else { DEFAULT_HTTP_PORT })
    }

    /// The full endpoint URL this session will address.
    pub fn endpoint(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{scheme}://{}:{}{}", self.host, self.effective_port(), self.path)
    }

    fn credential(&self) -> Result<Credential> {
        let secret = if self.is_hash {
            Secret::Hash(self.secret.clone())
        } else {
            Secret::Password(self.secret.clone())
        };
        Credential::new(self.user.clone(), secret, self.domain.clone(), self.workstation.clone())
            .map(|c| c.with_debug(self.debug))
    }

    /// Builds a [`Session`] backed by a pooled [`ReqwestTransport`].
    pub fn build(&self) -> Result<Session<ReqwestTransport>> {
        let credential = self.credential()?;
        let transport = ReqwestTransport::new(self.timeout)?;
        Ok(Session::new(credential, transport))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_endpoint_uses_https_port() {
        let options = ClientOptions::new("wsus.example.com", "user", "pw");
        assert_eq!(options.endpoint(), "https://wsus.example.com:8531/ApiRemoting30/WebService.asmx");
    }

    #[test]
    fn insecure_endpoint_uses_http_port() {
        let mut options = ClientOptions::new("wsus.example.com", "user", "pw");
        options.secure = false;
        assert_eq!(options.endpoint(), "http://wsus.example.com:8530/ApiRemoting30/WebService.asmx");
    }

    #[test]
    fn explicit_port_overrides_default() {
        let mut options = ClientOptions::new("wsus.example.com", "user", "pw");
        options.port = Some(9999);
        assert_eq!(options.endpoint(), "https://wsus.example.com:9999/ApiRemoting30/WebService.asmx");
    }
}
