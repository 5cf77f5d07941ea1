//! Session establishment
//!
//! A working session holds an ephemeral signing key pair certified by the
//! caller's long-lived credential. The certificate and session metadata are
//! stamped on every request the session signs.

use crate::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use dauth_core::{key_pair, sign_session, AccessKey, KeyPair, SecretKey, SessionVerification, Signature};
use ulid::Ulid;

/// Long-lived access/secret credential identifying a caller.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub access_key: AccessKey,
    pub secret_key: SecretKey,
}

impl Credentials {
    pub fn new(access_key: AccessKey, secret_key: SecretKey) -> Self {
        Credentials {
            access_key,
            secret_key,
        }
    }

    /// Generate a fresh credential.
    pub fn generate() -> Self {
        let (access_key, secret_key) = key_pair();
        Credentials {
            access_key,
            secret_key,
        }
    }
}

/// A certified working session: ephemeral signing key plus the session
/// certificate produced with the long-lived secret key.
pub struct Session {
    fields: SessionVerification,
    signature: Signature,
    signing_pair: KeyPair,
}

impl Session {
    /// Establish a session with a generated ULID session id.
    pub fn establish(
        credentials: &Credentials,
        domain: &str,
        expires: DateTime<Utc>,
    ) -> Result<Self> {
        Session::establish_with_id(credentials, domain, Ulid::new().to_string(), expires)
    }

    /// Establish a session under a caller-chosen session id.
    pub fn establish_with_id(
        credentials: &Credentials,
        domain: &str,
        session_id: impl Into<String>,
        expires: DateTime<Utc>,
    ) -> Result<Self> {
        let signing_pair = KeyPair::generate();

        let fields = SessionVerification {
            domain: domain.to_string(),
            access_key: credentials.access_key.as_str().to_string(),
            session_id: session_id.into(),
            session_expires: expires.to_rfc3339_opts(SecondsFormat::Secs, true),
            session_signing_key: signing_pair.access_key().as_str().to_string(),
        };

        let signature = sign_session(&fields, &credentials.secret_key)?;

        Ok(Session {
            fields,
            signature,
            signing_pair,
        })
    }

    pub fn fields(&self) -> &SessionVerification {
        &self.fields
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn session_id(&self) -> &str {
        &self.fields.session_id
    }

    /// Secret half of the ephemeral signing key.
    pub(crate) fn signing_secret(&self) -> SecretKey {
        self.signing_pair.secret_key()
    }
}
