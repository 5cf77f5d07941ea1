//! Verification middleware
//!
//! Buffers the request body, recomputes the body checksum from the bytes
//! actually received, runs session verification then request verification,
//! and restores the body for downstream handlers. Verification failure is
//! not rejection: both outcomes travel to the handler in a typed
//! `RequestAuth`, and each route decides its own policy.

use bytes::Bytes;
use dauth_core::{
    request_checksum, verify_request, verify_session, DauthError, RequestVerification,
    SessionVerification,
};
use http_body_util::{BodyExt, Full};
use hyper::body::Body;
use hyper::Request;

/// Verification outcomes for one request, produced once by [`verify`] and
/// read-only afterward.
#[derive(Debug)]
pub struct RequestAuth {
    session: Result<SessionVerification, DauthError>,
    request: Result<Option<RequestVerification>, DauthError>,
}

impl RequestAuth {
    /// Session-layer outcome: the certified session fields, or why the
    /// certification did not hold.
    pub fn session_verified(&self) -> Result<&SessionVerification, &DauthError> {
        self.session.as_ref()
    }

    /// Request-layer outcome. `Ok(None)` means the request carried no
    /// `Authorization` header at all.
    pub fn request_verified(&self) -> Result<Option<&RequestVerification>, &DauthError> {
        match &self.request {
            Ok(verification) => Ok(verification.as_ref()),
            Err(error) => Err(error),
        }
    }

    /// The verified identity when both layers succeeded and the request was
    /// actually signed.
    pub fn identity(&self) -> Option<&RequestVerification> {
        match (&self.session, &self.request) {
            (Ok(_), Ok(Some(verification))) => Some(verification),
            _ => None,
        }
    }
}

/// Run both verification layers over an inbound request.
///
/// Returns the request with its body restored (fully buffered) so handlers
/// can still consume it, alongside the verification outcomes.
pub async fn verify<B>(request: Request<B>) -> Result<(Request<Full<Bytes>>, RequestAuth), B::Error>
where
    B: Body,
{
    let (parts, body) = request.into_parts();
    let body = body.collect().await?.to_bytes();

    let session = verify_session(&parts.headers);
    let checksum = request_checksum(&body);

    let request = Request::from_parts(parts, Full::new(body));
    let outcome = verify_request(&request, &checksum);

    Ok((request, RequestAuth { session, request: outcome }))
}
