//! Session glue: binds a [`Credential`] to an inner [`HttpTransport`] and
//! exposes the one operation the surrounding SOAP layer needs.

use http::{HeaderMap, Method};

use crate::credential::Credential;
use crate::driver;
use crate::error::Result;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};

/// Binds one credential bundle to one inner transport. Holds no per-request
/// mutable state; distinct sessions may be driven from separate threads
/// without coordination.
pub struct Session<T: HttpTransport> {
    credential: Credential,
    transport: T,
}

impl<T: HttpTransport> Session<T> {
    pub fn new(credential: Credential, transport: T) -> Self {
        Self { credential, transport }
    }

    /// Performs one HTTP request, authenticating transparently if the server
    /// challenges with NTLM or Negotiate.
    pub fn perform_request(
        &self,
        method: Method,
        url: impl Into<String>,
        headers: HeaderMap,
        body: Vec<u8>,
    ) -> Result<HttpResponse> {
        let mut request = HttpRequest::new(method, url, body);
        request.headers = headers;
        driver::perform(&self.transport, &self.credential, request)
    }
}

#[cfg(test)]
mod test {
    use http::StatusCode;

    use super::*;
    use crate::credential::Secret;
    use crate::transport::test_support::ScriptedTransport;
    use crate::transport::HttpResponse as Response;

    #[test]
    fn passthrough_returns_inner_response() {
        let transport = ScriptedTransport::new(vec![Response {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: b"ok".to_vec(),
        }]);
        let credential = Credential::new("user", Secret::Password("pw".into()), "", "").unwrap();
        let session = Session::new(credential, transport);

        let response = session
            .perform_request(Method::GET, "http://host/path", HeaderMap::new(), Vec::new())
            .unwrap();
        assert_eq!(response.status, StatusCode::OK);
    }
}
