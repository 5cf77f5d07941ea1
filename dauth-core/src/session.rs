//! Session certification
//!
//! A session holder generates an ephemeral signing key and certifies it with
//! the long-lived secret key by signing the session string-to-sign:
//! {Domain, AccessKey, SessionId, SessionExpires, SessionSigningKey}. The
//! resulting signature travels in `X-Demo-App-Session-Signature` and proves
//! the session key was authorized by the claimed access key.

use crate::canonical::{string_to_sign, CanonicalFields, SESSION_FIELD_ORDER};
use crate::headers::{
    header_value, ACCESS_KEY_HEADER, DOMAIN_HEADER, SESSION_EXPIRES_HEADER, SESSION_ID_HEADER,
    SESSION_SIGNATURE_HEADER, SESSION_SIGNING_KEY_HEADER,
};
use crate::keys::{decode_verifying_key, KeyPair, SecretKey, Signature};
use crate::{DauthError, Result};
use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
use chrono::{DateTime, Utc};
use ed25519_dalek::Verifier;
use http::HeaderMap;
use serde::{Deserialize, Serialize};

/// The five session fields, as extracted from headers or assembled by a
/// client. Immutable once produced; attached to request state read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionVerification {
    pub domain: String,
    pub access_key: String,
    pub session_id: String,
    pub session_expires: String,
    pub session_signing_key: String,
}

impl SessionVerification {
    /// Extract session fields from headers. Missing headers become empty
    /// values, never errors.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        SessionVerification {
            domain: header_value(headers, DOMAIN_HEADER).to_string(),
            access_key: header_value(headers, ACCESS_KEY_HEADER).to_string(),
            session_id: header_value(headers, SESSION_ID_HEADER).to_string(),
            session_expires: header_value(headers, SESSION_EXPIRES_HEADER).to_string(),
            session_signing_key: header_value(headers, SESSION_SIGNING_KEY_HEADER).to_string(),
        }
    }

    /// The session string-to-sign for these fields.
    pub fn string_to_sign(&self) -> String {
        string_to_sign(SESSION_FIELD_ORDER, self)
    }

    /// Parse the carried expiry as an RFC3339 timestamp.
    ///
    /// Expiry is signed but not enforced by verification; consumers compare
    /// this against their own clock.
    pub fn expires_at(&self) -> Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.session_expires)
            .map(|at| at.with_timezone(&Utc))
            .map_err(|_| DauthError::InvalidSessionExpires)
    }
}

impl CanonicalFields for SessionVerification {
    fn field(&self, name: &str) -> &str {
        match name {
            "Domain" => &self.domain,
            "AccessKey" => &self.access_key,
            "SessionId" => &self.session_id,
            "SessionExpires" => &self.session_expires,
            "SessionSigningKey" => &self.session_signing_key,
            _ => panic!("unknown session canonical field: {}", name),
        }
    }
}

/// Certify a session signing key with the long-lived secret key.
pub fn sign_session(fields: &SessionVerification, secret_key: &SecretKey) -> Result<Signature> {
    let pair = KeyPair::from_secret_key(secret_key)?;
    Ok(pair.sign(fields.string_to_sign().as_bytes()))
}

/// Verify the session certification carried in `headers`.
///
/// Rebuilds the session string-to-sign from the extracted fields and checks
/// the claimed `X-Demo-App-Session-Signature` against the claimed access
/// key. Returns the extracted fields on success.
pub fn verify_session(headers: &HeaderMap) -> Result<SessionVerification> {
    let verification = SessionVerification::from_headers(headers);

    let verifying_key =
        decode_verifying_key(&verification.access_key).ok_or(DauthError::InvalidAccessKey)?;

    let signature_value = header_value(headers, SESSION_SIGNATURE_HEADER);
    let signature_bytes = B64
        .decode(signature_value)
        .map_err(|_| DauthError::InvalidSessionSignature)?;
    let signature = ed25519_dalek::Signature::from_slice(&signature_bytes)
        .map_err(|_| DauthError::InvalidSessionSignature)?;

    verifying_key
        .verify(verification.string_to_sign().as_bytes(), &signature)
        .map_err(|_| DauthError::InvalidSessionSignature)?;

    Ok(verification)
}
