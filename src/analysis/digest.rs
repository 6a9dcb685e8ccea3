//! SHA-256 content digest used as record identity.

use sha2::{Digest, Sha256};

/// Computes the lower-case hex SHA-256 digest of `value`.
///
/// Deterministic: the same input always produces the same 64-char output.
pub fn content_digest(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_deterministic() {
        assert_eq!(content_digest("racecar"), content_digest("racecar"));
    }

    #[test]
    fn test_digest_known_value() {
        assert_eq!(
            content_digest(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_digest_is_fixed_length_hex() {
        let digest = content_digest("a much longer input with several words");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_digest_distinguishes_values() {
        assert_ne!(content_digest("apple"), content_digest("apples"));
    }
}
