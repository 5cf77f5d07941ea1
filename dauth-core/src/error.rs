//! Error types for dauth

use thiserror::Error;

/// Verification and decoding failures.
///
/// All variants are returned as values; none abort the request pipeline.
/// The absence of an `Authorization` header is deliberately not represented
/// here — an unsigned request is "unauthenticated", not an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DauthError {
    #[error("Invalid Access Key")]
    InvalidAccessKey,

    #[error("Invalid Secret Key")]
    InvalidSecretKey,

    #[error("Unsupported Authorization Type")]
    UnsupportedAuthorizationType,

    #[error("Request Checksum Mismatch")]
    RequestChecksumMismatch,

    #[error("Invalid Authorization Signature")]
    InvalidAuthorizationSignature,

    #[error("Invalid Session Signature")]
    InvalidSessionSignature,

    #[error("Invalid Session Expires")]
    InvalidSessionExpires,
}
