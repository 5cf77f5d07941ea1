//! dauth protocol core
//!
//! Request authentication for HTTP APIs: a long-lived Ed25519 access/secret
//! key pair certifies a short-lived session signing key, and individual
//! requests are signed with the session key over a fixed-order canonical
//! string that binds in a SHA-256 body checksum. Verification recomputes
//! both canonical strings from received headers and bytes; any divergence
//! fails closed.
//!
//! This crate is the pure protocol: no I/O, no shared state, no policy.
//! Session persistence, expiry enforcement, and authorization belong to
//! consumers of the verified identity.

pub mod canonical;
pub mod checksum;
pub mod error;
pub mod headers;
pub mod keys;
pub mod request;
pub mod session;

pub use canonical::*;
pub use checksum::*;
pub use error::*;
pub use headers::*;
pub use keys::*;
pub use request::*;
pub use session::*;

/// Result type alias for dauth operations
pub type Result<T> = std::result::Result<T, DauthError>;
