//! Request signing and verification
//!
//! Individual requests are signed with the session signing key over the
//! 12-field request string-to-sign. The signed fields embed the session
//! signature and the body checksum, binding each request to one certified
//! session and one exact body.

use crate::canonical::{string_to_sign, CanonicalFields, REQUEST_FIELD_ORDER};
use crate::checksum::checksums_match;
use crate::headers::{
    header_value, strip_authorization_scheme, ACCESS_KEY_HEADER, ALGORITHM_HEADER,
    AUTHORIZATION_HEADER, DOMAIN_HEADER, HOST_HEADER, REQUEST_CHECKSUM_HEADER,
    SESSION_EXPIRES_HEADER, SESSION_ID_HEADER, SESSION_SIGNATURE_HEADER,
    SESSION_SIGNING_KEY_HEADER, TIMESTAMP_HEADER,
};
use crate::keys::{decode_verifying_key, KeyPair, SecretKey, Signature};
use crate::{DauthError, Result};
use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
use ed25519_dalek::Verifier;
use http::Request;
use serde::{Deserialize, Serialize};

/// The full signed field set of a request, as extracted by the verifier.
/// Superset of the session fields plus the request-specific bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestVerification {
    pub host: String,
    pub domain: String,
    pub algorithm: String,
    pub timestamp: String,
    pub access_key: String,
    pub session_id: String,
    pub session_expires: String,
    pub session_signature: String,
    pub session_signing_key: String,
    /// Lower-cased HTTP method.
    pub resource: String,
    /// Request URL path.
    pub action: String,
    pub request_checksum: String,
}

impl RequestVerification {
    /// Assemble the signed field set from a request and the body checksum.
    ///
    /// Header values are taken verbatim; the method is lower-cased before
    /// insertion. Missing headers become empty values.
    pub fn from_request<B>(request: &Request<B>, checksum: &str) -> Self {
        let headers = request.headers();
        RequestVerification {
            host: header_value(headers, HOST_HEADER).to_string(),
            domain: header_value(headers, DOMAIN_HEADER).to_string(),
            algorithm: header_value(headers, ALGORITHM_HEADER).to_string(),
            timestamp: header_value(headers, TIMESTAMP_HEADER).to_string(),
            access_key: header_value(headers, ACCESS_KEY_HEADER).to_string(),
            session_id: header_value(headers, SESSION_ID_HEADER).to_string(),
            session_expires: header_value(headers, SESSION_EXPIRES_HEADER).to_string(),
            session_signature: header_value(headers, SESSION_SIGNATURE_HEADER).to_string(),
            session_signing_key: header_value(headers, SESSION_SIGNING_KEY_HEADER).to_string(),
            resource: request.method().as_str().to_lowercase(),
            action: request.uri().path().to_string(),
            request_checksum: checksum.to_string(),
        }
    }

    /// The request string-to-sign for these fields.
    pub fn string_to_sign(&self) -> String {
        string_to_sign(REQUEST_FIELD_ORDER, self)
    }
}

impl CanonicalFields for RequestVerification {
    fn field(&self, name: &str) -> &str {
        match name {
            "Host" => &self.host,
            "Domain" => &self.domain,
            "Algorithm" => &self.algorithm,
            "Timestamp" => &self.timestamp,
            "AccessKey" => &self.access_key,
            "SessionId" => &self.session_id,
            "SessionExpires" => &self.session_expires,
            "SessionSignature" => &self.session_signature,
            "SessionSigningKey" => &self.session_signing_key,
            "Resource" => &self.resource,
            "Action" => &self.action,
            "RequestChecksum" => &self.request_checksum,
            _ => panic!("unknown request canonical field: {}", name),
        }
    }
}

/// Sign an outgoing request with the session signing secret key.
///
/// The request must already carry the `X-Demo-App-*` headers; `checksum` is
/// the caller-computed body checksum.
pub fn sign_request<B>(
    request: &Request<B>,
    checksum: &str,
    secret_key: &SecretKey,
) -> Result<Signature> {
    let verification = RequestVerification::from_request(request, checksum);
    let pair = KeyPair::from_secret_key(secret_key)?;
    Ok(pair.sign(verification.string_to_sign().as_bytes()))
}

/// Verify the signature on an inbound request.
///
/// `checksum` is recomputed by the caller from the body bytes actually
/// received. Returns `Ok(None)` when no `Authorization` header is present:
/// an unsigned request is unauthenticated, not invalid, and policy belongs
/// to the route handler.
pub fn verify_request<B>(
    request: &Request<B>,
    checksum: &str,
) -> Result<Option<RequestVerification>> {
    let headers = request.headers();

    let authorization = header_value(headers, AUTHORIZATION_HEADER);
    if authorization.is_empty() {
        return Ok(None);
    }
    let signature_value = strip_authorization_scheme(authorization)
        .ok_or(DauthError::UnsupportedAuthorizationType)?;

    // Checksum check runs before any signature math to fail fast.
    let declared = header_value(headers, REQUEST_CHECKSUM_HEADER);
    if !checksums_match(declared, checksum) {
        return Err(DauthError::RequestChecksumMismatch);
    }

    let session_signing_key = header_value(headers, SESSION_SIGNING_KEY_HEADER);
    let verifying_key =
        decode_verifying_key(session_signing_key).ok_or(DauthError::InvalidAccessKey)?;

    let signature_bytes = B64
        .decode(signature_value)
        .map_err(|_| DauthError::InvalidAuthorizationSignature)?;
    let signature = ed25519_dalek::Signature::from_slice(&signature_bytes)
        .map_err(|_| DauthError::InvalidAuthorizationSignature)?;

    let verification = RequestVerification::from_request(request, checksum);
    verifying_key
        .verify(verification.string_to_sign().as_bytes(), &signature)
        .map_err(|_| DauthError::InvalidAuthorizationSignature)?;

    Ok(Some(verification))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::request_checksum;
    use crate::headers::authorization;
    use crate::keys::key_pair;

    fn signed_request(body: &[u8]) -> (Request<()>, String) {
        let (session_signing_key, session_secret) = key_pair();
        let checksum = request_checksum(body);

        let mut request = Request::builder()
            .method("POST")
            .uri("https://host.example.com/widgets")
            .header(HOST_HEADER, "host.example.com")
            .header(DOMAIN_HEADER, "example.com")
            .header(ALGORITHM_HEADER, crate::headers::DEMOAPP_V0_SIG_ED25519)
            .header(TIMESTAMP_HEADER, "2025-01-01T00:00:00Z")
            .header(SESSION_SIGNING_KEY_HEADER, session_signing_key.as_str())
            .header(REQUEST_CHECKSUM_HEADER, checksum.as_str())
            .body(())
            .unwrap();

        let signature = sign_request(&request, &checksum, &session_secret).unwrap();
        request
            .headers_mut()
            .insert(AUTHORIZATION_HEADER, authorization(&signature).parse().unwrap());

        (request, checksum)
    }

    #[test]
    fn test_sign_then_verify_request() {
        let (request, checksum) = signed_request(b"body");
        let verified = verify_request(&request, &checksum).unwrap().unwrap();
        assert_eq!(verified.resource, "post");
        assert_eq!(verified.action, "/widgets");
        assert_eq!(verified.request_checksum, checksum);
    }

    #[test]
    fn test_missing_authorization_is_not_an_error() {
        let request = Request::builder()
            .method("GET")
            .uri("/anything")
            .body(())
            .unwrap();
        let checksum = request_checksum(b"");
        assert_eq!(verify_request(&request, &checksum).unwrap(), None);
    }

    #[test]
    fn test_unsupported_authorization_scheme() {
        let (mut request, checksum) = signed_request(b"body");
        request
            .headers_mut()
            .insert(AUTHORIZATION_HEADER, "Bearer token".parse().unwrap());
        assert_eq!(
            verify_request(&request, &checksum).unwrap_err(),
            DauthError::UnsupportedAuthorizationType
        );
    }

    #[test]
    fn test_checksum_mismatch_fails_before_signature_checks() {
        let (mut request, checksum) = signed_request(b"body");
        // Garbage signature payload: the checksum mismatch must win.
        request
            .headers_mut()
            .insert(AUTHORIZATION_HEADER, authorization(&Signature::from("%%%".to_string())).parse().unwrap());
        let recomputed = request_checksum(b"tampered");
        assert_eq!(
            verify_request(&request, &recomputed).unwrap_err(),
            DauthError::RequestChecksumMismatch
        );
        // With the matching checksum the bad payload surfaces instead.
        assert_eq!(
            verify_request(&request, &checksum).unwrap_err(),
            DauthError::InvalidAuthorizationSignature
        );
    }

    #[test]
    fn test_undecodable_session_signing_key() {
        let (mut request, checksum) = signed_request(b"body");
        request
            .headers_mut()
            .insert(SESSION_SIGNING_KEY_HEADER, "!!".parse().unwrap());
        assert_eq!(
            verify_request(&request, &checksum).unwrap_err(),
            DauthError::InvalidAccessKey
        );
    }

    #[test]
    fn test_wrong_signer_fails_verification() {
        let (request, checksum) = signed_request(b"body");
        let (_, other_secret) = key_pair();

        let forged = sign_request(&request, &checksum, &other_secret).unwrap();
        let mut request = request;
        request
            .headers_mut()
            .insert(AUTHORIZATION_HEADER, authorization(&forged).parse().unwrap());

        assert_eq!(
            verify_request(&request, &checksum).unwrap_err(),
            DauthError::InvalidAuthorizationSignature
        );
    }
}
