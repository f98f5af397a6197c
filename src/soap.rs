//! Stand-in for the SOAP request/response surface that sits above the core.
//!
//! The real surface is hundreds of request descriptors, a reflection-style
//! generic-row decoder, and the enclosing envelope — none of that is this
//! crate's concern. This module only shows the shape of the interface the
//! core exposes to that layer: opaque request bytes in, opaque response
//! bytes out, authentication handled transparently by [`Session`].

use http::{HeaderMap, Method};

use crate::error::Result;
use crate::session::Session;
use crate::transport::HttpTransport;

/// A fully-formed SOAP call: an envelope the caller has already serialized,
/// addressed at a `SOAPAction`.
pub struct SoapRequest {
    pub soap_action: &'static str,
    pub envelope: Vec<u8>,
}

/// The raw bytes of a SOAP response, still wrapped in its envelope. Decoding
/// the envelope and the tabular row format inside it is the SOAP layer's job.
pub struct SoapResponse {
    pub status: http::StatusCode,
    pub envelope: Vec<u8>,
}

/// Sends one SOAP call through an authenticated session.
pub fn call<T: HttpTransport>(
    session: &Session<T>,
    url: impl Into<String>,
    request: SoapRequest,
) -> Result<SoapResponse> {
    let mut headers = HeaderMap::new();
    headers.insert("Content-Type", "text/xml; charset=utf-8".parse().unwrap());
    headers.insert("SOAPAction", request.soap_action.parse().unwrap());

    let response = session.perform_request(Method::POST, url, headers, request.envelope)?;
    Ok(SoapResponse { status: response.status, envelope: response.body })
}
