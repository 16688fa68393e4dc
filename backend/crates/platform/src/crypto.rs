//! Cryptographic Utilities
//!
//! Random identifiers drawn from the OS CSPRNG.

use rand::{Rng, rngs::OsRng};

/// Lowercase ASCII letters and digits
pub const LOWER_ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a random string of `len` characters drawn from `charset`
///
/// Uses the OS CSPRNG. `charset` must be non-empty ASCII.
pub fn random_string(len: usize, charset: &[u8]) -> String {
    if charset.is_empty() {
        return String::new();
    }
    let mut rng = OsRng;
    (0..len)
        .map(|_| charset[rng.gen_range(0..charset.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_string_charset_and_length() {
        let s = random_string(6, LOWER_ALPHANUMERIC);
        assert_eq!(s.len(), 6);
        assert!(
            s.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        );

        assert_eq!(random_string(0, LOWER_ALPHANUMERIC), "");
        assert_eq!(random_string(4, b""), "");
    }

    #[test]
    fn test_random_string_varies() {
        // 36^16 possibilities; a collision here means the RNG is broken
        let a = random_string(16, LOWER_ALPHANUMERIC);
        let b = random_string(16, LOWER_ALPHANUMERIC);
        assert_ne!(a, b);
    }
}
