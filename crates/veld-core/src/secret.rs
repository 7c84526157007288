//! Secret generation for generated .env values
//!
//! Secrets come from the OS CSPRNG, never a seeded generator.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::Rng;

/// Byte length of the primary application secret
pub const PAYLOAD_SECRET_BYTES: usize = 32;

/// Byte length of auxiliary secrets (preview/cron tokens)
pub const AUX_SECRET_BYTES: usize = 16;

/// Generate `byte_len` cryptographically secure random bytes, base64-encoded
pub fn generate_secret(byte_len: usize) -> String {
    let mut rng = rand::rng();
    let mut bytes = vec![0u8; byte_len];
    rng.fill(&mut bytes[..]);
    STANDARD.encode(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_encodes_requested_byte_length() {
        // base64 without padding stripping: 32 bytes -> 44 chars, 16 -> 24
        assert_eq!(generate_secret(PAYLOAD_SECRET_BYTES).len(), 44);
        assert_eq!(generate_secret(AUX_SECRET_BYTES).len(), 24);
    }

    #[test]
    fn test_secrets_are_distinct() {
        let primary = generate_secret(PAYLOAD_SECRET_BYTES);
        let auxiliary = generate_secret(AUX_SECRET_BYTES);
        assert_ne!(primary, auxiliary);

        // Same length, separate calls
        assert_ne!(
            generate_secret(PAYLOAD_SECRET_BYTES),
            generate_secret(PAYLOAD_SECRET_BYTES)
        );
    }
}
