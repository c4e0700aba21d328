use sha2::{Digest, Sha256};

/// Tokens are blacklisted by digest; the raw token never reaches Redis.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_token_same_digest() {
        assert_eq!(hash_token("refresh-abc"), hash_token("refresh-abc"));
    }

    #[test]
    fn different_tokens_different_digest() {
        assert_ne!(hash_token("token-a"), hash_token("token-b"));
    }

    #[test]
    fn digest_is_sha256_hex() {
        assert_eq!(hash_token("anything").len(), 64);
    }
}
