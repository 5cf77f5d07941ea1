//! Ed25519 key management
//!
//! Long-lived access/secret credentials and ephemeral session signing keys
//! share the same shape: an Ed25519 key pair whose halves travel as
//! standard-base64 text.

use crate::{DauthError, Result};
use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Base64-encoded Ed25519 public key identifying a credential holder.
///
/// Shared with the server; carried in `X-Demo-App-Access-Key` and
/// `X-Demo-App-Session-Signing-Key`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessKey(String);

impl AccessKey {
    /// Decode into a verifying key.
    pub fn decode(&self) -> Result<VerifyingKey> {
        decode_verifying_key(&self.0).ok_or(DauthError::InvalidAccessKey)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for AccessKey {
    fn from(encoded: String) -> Self {
        AccessKey(encoded)
    }
}

impl fmt::Display for AccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Base64-encoded Ed25519 secret key. Never leaves the holder.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretKey(String);

impl SecretKey {
    /// Decode into a signing key.
    pub fn decode(&self) -> Result<SigningKey> {
        let bytes = B64
            .decode(&self.0)
            .map_err(|_| DauthError::InvalidSecretKey)?;
        let seed: [u8; 32] = bytes
            .try_into()
            .map_err(|_| DauthError::InvalidSecretKey)?;
        Ok(SigningKey::from_bytes(&seed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SecretKey {
    fn from(encoded: String) -> Self {
        SecretKey(encoded)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SecretKey").field(&"<redacted>").finish()
    }
}

/// Base64-encoded Ed25519 signature, as carried in headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(String);

impl Signature {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Signature {
    fn from(encoded: String) -> Self {
        Signature(encoded)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ed25519 key pair for signing operations.
#[derive(Clone)]
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Generate a fresh key pair from the OS random source.
    ///
    /// Entropy failure indicates a broken environment and aborts rather
    /// than returning an error.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        KeyPair { signing_key }
    }

    /// Reconstruct a key pair from its encoded secret half.
    pub fn from_secret_key(secret_key: &SecretKey) -> Result<Self> {
        Ok(KeyPair {
            signing_key: secret_key.decode()?,
        })
    }

    /// Encoded public half.
    pub fn access_key(&self) -> AccessKey {
        AccessKey(B64.encode(self.signing_key.verifying_key().to_bytes()))
    }

    /// Encoded secret half (sensitive operation).
    pub fn secret_key(&self) -> SecretKey {
        SecretKey(B64.encode(self.signing_key.to_bytes()))
    }

    /// Sign data, returning the transport-encoded signature.
    pub fn sign(&self, data: &[u8]) -> Signature {
        Signature(B64.encode(self.signing_key.sign(data).to_bytes()))
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("access_key", &self.access_key())
            .finish_non_exhaustive()
    }
}

/// Generate a fresh credential: `(AccessKey, SecretKey)`.
pub fn key_pair() -> (AccessKey, SecretKey) {
    let pair = KeyPair::generate();
    (pair.access_key(), pair.secret_key())
}

pub(crate) fn decode_verifying_key(encoded: &str) -> Option<VerifyingKey> {
    let bytes = B64.decode(encoded).ok()?;
    let bytes: [u8; 32] = bytes.try_into().ok()?;
    VerifyingKey::from_bytes(&bytes).ok()
}
