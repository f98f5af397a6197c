//! The inner HTTP transport the challenge driver wraps.
//!
//! NTLM authenticates a connection, not a message, so whatever implements
//! [`HttpTransport`] must pin all three legs of one logical request to a
//! single underlying connection. [`ReqwestTransport`] does this by handing
//! every leg to the same [`reqwest::blocking::Client`], which keeps one
//! connection alive per host via its pool.

use std::time::Duration;

use http::{HeaderMap, Method, StatusCode};

use crate::error::Result;

/// An outbound HTTP request with a fully-buffered body.
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body,
        }
    }
}

/// A complete HTTP response with a fully-drained body.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// A single logical HTTP exchange. Implementations must reuse the same
/// underlying connection across repeated calls against the same transport
/// instance — the challenge driver depends on this to carry NTLM state.
pub trait HttpTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// The production transport, backed by a pooled blocking [`reqwest::blocking::Client`].
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(1)
            .build()?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .body(request.body.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = builder.send()?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes()?.to_vec();

        Ok(HttpResponse { status, headers, body })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::cell::RefCell;

    use super::*;

    /// A scripted transport for driver tests: returns one queued response per
    /// call and records every request it was handed.
    pub struct ScriptedTransport {
        responses: RefCell<Vec<HttpResponse>>,
        pub requests: RefCell<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        pub fn new(responses: Vec<HttpResponse>) -> Self {
            let mut responses = responses;
            responses.reverse();
            Self {
                responses: RefCell::new(responses),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl HttpTransport for ScriptedTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
            self.requests.borrow_mut().push(request.clone());
            Ok(self
                .responses
                .borrow_mut()
                .pop()
                .expect("test script ran out of responses"))
        }
    }
}
