//! Canonical string-to-sign construction
//!
//! Renders an ordered list of named fields as `Name=Value\n` lines, with a
//! trailing newline after the last field. The two orders below are the
//! protocol: signer and verifier must produce identical bytes, so the lists
//! are fixed, versioned through the `Algorithm` field, and shared read-only
//! process-wide. Reordering breaks every existing signature.

/// Field order for the session certification string-to-sign.
pub const SESSION_FIELD_ORDER: &[&str] = &[
    "Domain",
    "AccessKey",
    "SessionId",
    "SessionExpires",
    "SessionSigningKey",
];

/// Field order for the request string-to-sign.
pub const REQUEST_FIELD_ORDER: &[&str] = &[
    "Host",
    "Domain",
    "Algorithm",
    "Timestamp",
    "AccessKey",
    "SessionId",
    "SessionExpires",
    "SessionSignature",
    "SessionSigningKey",
    "Resource",
    "Action",
    "RequestChecksum",
];

/// A record exposing canonical fields by name.
///
/// Implementations must answer every name in the order list they are signed
/// under; an unknown name is a programmer error and panics.
pub trait CanonicalFields {
    fn field(&self, name: &str) -> &str;
}

/// Render the string-to-sign for `fields` under the given field order.
///
/// Values are used verbatim. Missing upstream values arrive here as empty
/// strings, producing a line like `Host=\n` that cannot match a signature
/// made over the real value.
pub fn string_to_sign(order: &[&str], fields: &dyn CanonicalFields) -> String {
    let mut out = String::new();
    for name in order {
        out.push_str(name);
        out.push('=');
        out.push_str(fields.field(name));
        out.push('\n');
    }
    out
}
