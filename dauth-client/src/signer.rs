//! Outgoing-request signing
//!
//! Stamps the protocol headers on an `http::Request`, computes the body
//! checksum, and signs the request with the session's ephemeral key.

use crate::{ClientError, Result, Session};
use chrono::{DateTime, SecondsFormat, Utc};
use dauth_core::{
    authorization, request_checksum, sign_request, ACCESS_KEY_HEADER, ALGORITHM_HEADER,
    AUTHORIZATION_HEADER, DEMOAPP_V0_SIG_ED25519, DOMAIN_HEADER, HOST_HEADER,
    REQUEST_CHECKSUM_HEADER, SESSION_EXPIRES_HEADER, SESSION_ID_HEADER, SESSION_SIGNATURE_HEADER,
    SESSION_SIGNING_KEY_HEADER, TIMESTAMP_HEADER,
};
use http::header::HeaderValue;
use http::Request;

/// Signs outgoing requests under one certified session.
pub struct RequestSigner {
    session: Session,
    timestamp: Option<DateTime<Utc>>,
}

impl RequestSigner {
    pub fn new(session: Session) -> Self {
        RequestSigner {
            session,
            timestamp: None,
        }
    }

    /// Pin the request timestamp instead of reading the clock (for tests
    /// and replay of recorded exchanges).
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Sign `request` in place: checksum the body, stamp every protocol
    /// header, and set `Authorization`.
    ///
    /// `Host` is taken from the request's URI authority unless the caller
    /// already set the header explicitly.
    pub fn sign<B: AsRef<[u8]>>(&self, request: &mut Request<B>) -> Result<()> {
        let checksum = request_checksum(request.body().as_ref());
        let timestamp = self
            .timestamp
            .unwrap_or_else(Utc::now)
            .to_rfc3339_opts(SecondsFormat::Secs, true);

        let uri_host = request.uri().host().map(|host| host.to_string());
        if !request.headers().contains_key(HOST_HEADER) {
            if let Some(host) = uri_host {
                insert(request, HOST_HEADER, &host)?;
            }
        }

        let fields = self.session.fields().clone();
        insert(request, DOMAIN_HEADER, &fields.domain)?;
        insert(request, ALGORITHM_HEADER, DEMOAPP_V0_SIG_ED25519)?;
        insert(request, TIMESTAMP_HEADER, &timestamp)?;
        insert(request, ACCESS_KEY_HEADER, &fields.access_key)?;
        insert(request, SESSION_ID_HEADER, &fields.session_id)?;
        insert(request, SESSION_EXPIRES_HEADER, &fields.session_expires)?;
        insert(
            request,
            SESSION_SIGNATURE_HEADER,
            self.session.signature().as_str(),
        )?;
        insert(
            request,
            SESSION_SIGNING_KEY_HEADER,
            &fields.session_signing_key,
        )?;
        insert(request, REQUEST_CHECKSUM_HEADER, &checksum)?;

        let signature = sign_request(request, &checksum, &self.session.signing_secret())?;
        insert(request, AUTHORIZATION_HEADER, &authorization(&signature))?;

        Ok(())
    }
}

fn insert<B>(request: &mut Request<B>, name: &'static str, value: &str) -> Result<()> {
    let value = HeaderValue::from_str(value)
        .map_err(|_| ClientError::InvalidHeader(format!("{}: {}", name, value)))?;
    request.headers_mut().insert(name, value);
    Ok(())
}
