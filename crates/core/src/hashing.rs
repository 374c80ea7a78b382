//! Identity token derivation.
//!
//! Fetch requests are authenticated with a token derived from the
//! caller identity (usually an e-mail address). The derivation scheme
//! is owned by the remote service; [`sha256_hex`] is the default used
//! by the client's `Sha256TokenSource`.

use sha2::{Digest, Sha256};

/// Compute a SHA-256 hex digest of the given bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}

/// Derive the request token for an identity.
///
/// Surrounding whitespace is ignored and the identity is lowercased so
/// that `" User@Example.com"` and `"user@example.com"` map to the same
/// token.
pub fn identity_token(identity: &str) -> String {
    sha256_hex(identity.trim().to_lowercase().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_produces_known_hash() {
        let hash = sha256_hex(b"");
        assert_eq!(
            hash,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn identity_token_is_normalized() {
        assert_eq!(
            identity_token(" User@Example.com "),
            identity_token("user@example.com")
        );
        assert_eq!(identity_token("user@example.com").len(), 64);
    }

    #[test]
    fn different_identities_produce_different_tokens() {
        assert_ne!(identity_token("a@example.com"), identity_token("b@example.com"));
    }
}
