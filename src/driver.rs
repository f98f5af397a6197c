//! The three-leg NTLM challenge driver: wraps an [`HttpTransport`], detects an
//! NTLM/Negotiate 401, and replays the caller's request across the handshake.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use http::{HeaderValue, StatusCode};
use tracing::debug;

use crate::credential::Credential;
use crate::error::Result;
use crate::ntlm::{craft_authenticate, marshal_negotiate, unmarshal_challenge};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};

/// Drives one logical request to completion, authenticating via NTLM if
/// challenged. The caller's body is read once, up front, and replayed
/// unchanged on legs two and three.
pub fn perform(
    transport: &dyn HttpTransport,
    credential: &Credential,
    mut request: HttpRequest,
) -> Result<HttpResponse> {
    request.headers.remove(AUTHORIZATION);
    let body = request.body.clone();

    let first = transport.execute(&request)?;
    if first.status != StatusCode::UNAUTHORIZED {
        return Ok(first);
    }

    let Some(scheme) = detect_scheme(&first) else {
        return Ok(first);
    };
    if credential.debug {
        debug!(scheme = %scheme, "server advertised NTLM-style authentication, starting handshake");
    }

    let negotiate = marshal_negotiate(credential)?;
    let mut leg_two = request.clone();
    leg_two.body = body.clone();
    set_authorization(&mut leg_two, &scheme, &negotiate.bytes);
    let second = transport.execute(&leg_two)?;

    let challenge_bytes = extract_challenge(&second);
    if challenge_bytes.is_empty() {
        return Ok(second);
    }
    let challenge = unmarshal_challenge(&challenge_bytes)?;

    let authenticate = craft_authenticate(credential, &challenge)?;
    let mut leg_three = request;
    leg_three.body = body;
    set_authorization(&mut leg_three, &scheme, &authenticate.bytes);
    transport.execute(&leg_three)
}

/// Finds the first `WWW-Authenticate` value beginning with `NTLM` or
/// `Negotiate`, returning the matched scheme token verbatim.
fn detect_scheme(response: &HttpResponse) -> Option<String> {
    response
        .headers
        .get_all(WWW_AUTHENTICATE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|value| {
            if value.starts_with("NTLM") {
                Some("NTLM".to_string())
            } else if value.starts_with("Negotiate") {
                Some("Negotiate".to_string())
            } else {
                None
            }
        })
}

/// Finds the first `WWW-Authenticate` value beginning with `NTLM`,
/// `Negotiate`, or `Basic `, splits it on the first space, and base64-decodes
/// the remainder. Returns an empty vector when no such header, or header
/// without a usable payload, is present.
fn extract_challenge(response: &HttpResponse) -> Vec<u8> {
    let value = response
        .headers
        .get_all(WWW_AUTHENTICATE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| {
            value.starts_with("NTLM") || value.starts_with("Negotiate") || value.starts_with("Basic ")
        });

    let Some(value) = value else {
        return Vec::new();
    };

    let mut parts = value.splitn(2, ' ');
    let _scheme = parts.next();
    let Some(encoded) = parts.next() else {
        return Vec::new();
    };

    BASE64.decode(encoded.trim()).unwrap_or_default()
}

fn set_authorization(request: &mut HttpRequest, scheme: &str, message: &[u8]) {
    let header = format!("{scheme} {}", BASE64.encode(message));
    request
        .headers
        .insert(AUTHORIZATION, HeaderValue::from_str(&header).expect("base64 is valid header text"));
}
