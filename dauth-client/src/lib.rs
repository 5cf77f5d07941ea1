//! dauth client SDK
//!
//! Establishes certified sessions and signs outgoing `http` requests so
//! that a dauth verifier accepts them byte-for-byte.

pub mod error;
pub mod session;
pub mod signer;

pub use error::ClientError;
pub use session::{Credentials, Session};
pub use signer::RequestSigner;

pub type Result<T> = std::result::Result<T, ClientError>;
