//! Request body checksums
//!
//! The checksum binds body content into the signed string: the client hashes
//! the bytes it sends, the verifier recomputes the hash from the bytes it
//! actually received, and the signature covers the declared value. Signature
//! validity therefore implies content integrity without signing body bytes
//! directly.

use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Base64 SHA-256 digest of the raw request body.
pub fn request_checksum(body: &[u8]) -> String {
    let digest = Sha256::digest(body);
    B64.encode(digest)
}

/// Constant-time checksum comparison.
pub fn checksums_match(declared: &str, computed: &str) -> bool {
    let declared = declared.as_bytes();
    let computed = computed.as_bytes();
    if declared.len() != computed.len() {
        return false;
    }
    declared.ct_eq(computed).into()
}
