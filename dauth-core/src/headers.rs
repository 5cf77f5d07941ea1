//! Wire-level constants: header names and the signing scheme identifier.
//!
//! Header names are given in the `http` crate's canonical lowercase form;
//! lookups through `HeaderMap` are case-insensitive either way.

use crate::keys::Signature;

/// Signing scheme identifier, carried in `X-Demo-App-Algorithm` and as the
/// `Authorization` scheme prefix.
pub const DEMOAPP_V0_SIG_ED25519: &str = "DEMOAPP-V0-SIG-ED25519";

pub const AUTHORIZATION_HEADER: &str = "authorization";

pub const HOST_HEADER: &str = "host";

pub const DOMAIN_HEADER: &str = "x-demo-app-domain";

pub const ALGORITHM_HEADER: &str = "x-demo-app-algorithm";

pub const TIMESTAMP_HEADER: &str = "x-demo-app-timestamp";

pub const ACCESS_KEY_HEADER: &str = "x-demo-app-access-key";

pub const SESSION_ID_HEADER: &str = "x-demo-app-session-id";

pub const SESSION_EXPIRES_HEADER: &str = "x-demo-app-session-expires";

pub const SESSION_SIGNATURE_HEADER: &str = "x-demo-app-session-signature";

pub const SESSION_SIGNING_KEY_HEADER: &str = "x-demo-app-session-signing-key";

pub const REQUEST_CHECKSUM_HEADER: &str = "x-demo-app-request-checksum";

/// Build the `Authorization` header value for a request signature.
pub fn authorization(signature: &Signature) -> String {
    format!("{} {}", DEMOAPP_V0_SIG_ED25519, signature.as_str())
}

/// Split an `Authorization` value into its signature payload, if the scheme
/// matches `DEMOAPP-V0-SIG-ED25519`.
pub fn strip_authorization_scheme(value: &str) -> Option<&str> {
    value
        .strip_prefix(DEMOAPP_V0_SIG_ED25519)
        .and_then(|rest| rest.strip_prefix(' '))
}

/// Fetch a header as a string, treating missing or non-UTF-8 values as
/// empty. A missing field is not an error at extraction time; verification
/// fails naturally because the canonical string cannot match.
pub fn header_value<'a>(headers: &'a http::HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::Signature;

    #[test]
    fn test_authorization_round_trip() {
        let signature = Signature::from("c2lnbmF0dXJl".to_string());
        let value = authorization(&signature);
        assert_eq!(value, "DEMOAPP-V0-SIG-ED25519 c2lnbmF0dXJl");
        assert_eq!(strip_authorization_scheme(&value), Some("c2lnbmF0dXJl"));
    }

    #[test]
    fn test_strip_rejects_other_schemes() {
        assert_eq!(strip_authorization_scheme("Bearer abc"), None);
        assert_eq!(strip_authorization_scheme("DEMOAPP-V0-SIG-ED25519"), None);
        assert_eq!(strip_authorization_scheme(""), None);
    }

    #[test]
    fn test_header_value_missing_is_empty() {
        let headers = http::HeaderMap::new();
        assert_eq!(header_value(&headers, DOMAIN_HEADER), "");
    }

    #[test]
    fn test_header_value_lookup_is_case_insensitive() {
        let mut headers = http::HeaderMap::new();
        headers.insert(DOMAIN_HEADER, "example.com".parse().unwrap());
        assert_eq!(header_value(&headers, "X-Demo-App-Domain"), "example.com");
    }
}
