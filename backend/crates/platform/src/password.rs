//! Password Hashing and Verification
//!
//! Password handling with:
//! - Argon2id hashing (memory-hard, recommended by OWASP)
//! - Zeroization of sensitive data
//! - Constant-time comparison (inside `argon2`)
//! - Unicode NFKC normalization before length checks and hashing
//!
//! ## Policy
//! - 6 to 100 characters
//! - At least one ASCII letter and one ASCII digit

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length (in characters)
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum password length (in characters)
pub const MAX_PASSWORD_LENGTH: usize = 100;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
///
/// The display strings are returned to API clients verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("password is required")]
    Empty,

    #[error("password must be at least {min} characters long")]
    TooShort { min: usize },

    #[error("password must be no more than {max} characters long")]
    TooLong { max: usize },

    #[error("password must contain at least one letter")]
    MissingLetter,

    #[error("password must contain at least one number")]
    MissingDigit,
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid hash format
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new password, enforcing the registration policy
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let password = Self::for_verification(raw);
        password.check_policy()?;
        Ok(password)
    }

    /// Wrap a login attempt without enforcing the policy
    ///
    /// A password that would fail the policy can never match a stored hash,
    /// so login only needs the same normalization as hashing.
    pub fn for_verification(raw: String) -> Self {
        let normalized: String = raw.nfkc().collect();
        let mut raw = raw;
        raw.zeroize();
        Self(normalized)
    }

    fn check_policy(&self) -> Result<(), PasswordPolicyError> {
        if self.0.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }

        let char_count = self.0.chars().count();
        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
            });
        }

        if !self.0.chars().any(|c| c.is_ascii_alphabetic()) {
            return Err(PasswordPolicyError::MissingLetter);
        }
        if !self.0.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordPolicyError::MissingDigit);
        }

        Ok(())
    }

    /// Whether the password is empty (after normalization)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the password as bytes for hashing
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Vec<u8> {
        let mut bytes = self.as_bytes().to_vec();
        if let Some(p) = pepper {
            bytes.extend_from_slice(p);
        }
        bytes
    }

    /// Hash the password using Argon2id
    ///
    /// ## Arguments
    /// * `pepper` - Optional application-wide secret
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let mut password_bytes = self.peppered(pepper);

        // 128-bit random salt
        let salt = SaltString::generate(&mut OsRng);

        // OWASP defaults: m=19456 (19 MiB), t=2, p=1
        let result = Argon2::default()
            .hash_password(&password_bytes, &salt)
            .map(|hash| HashedPassword {
                hash: hash.to_string(),
            })
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()));

        password_bytes.zeroize();
        result
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash
    ///
    /// * `pepper` - Must match the pepper used during hashing
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let parsed_hash = match PasswordHash::new(&self.hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        let mut password_bytes = password.peppered(pepper);
        let ok = Argon2::default()
            .verify_password(&password_bytes, &parsed_hash)
            .is_ok();
        password_bytes.zeroize();
        ok
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod policy {
        use super::*;

        fn policy_err(raw: &str) -> PasswordPolicyError {
            ClearTextPassword::new(raw.to_string()).unwrap_err()
        }

        #[test]
        fn test_valid_passwords() {
            assert!(ClearTextPassword::new("abc123".to_string()).is_ok());
            assert!(ClearTextPassword::new("password123".to_string()).is_ok());
            assert!(ClearTextPassword::new(format!("a1{}", "x".repeat(98))).is_ok());
        }

        #[test]
        fn test_empty() {
            assert_eq!(policy_err(""), PasswordPolicyError::Empty);
            assert_eq!(policy_err("").to_string(), "password is required");
        }

        #[test]
        fn test_too_short() {
            let err = policy_err("ab1");
            assert_eq!(
                err.to_string(),
                "password must be at least 6 characters long"
            );
        }

        #[test]
        fn test_too_long() {
            let err = policy_err(&format!("a1{}", "x".repeat(99)));
            assert_eq!(
                err.to_string(),
                "password must be no more than 100 characters long"
            );
        }

        #[test]
        fn test_missing_letter() {
            assert_eq!(policy_err("123456"), PasswordPolicyError::MissingLetter);
            assert_eq!(
                policy_err("123456").to_string(),
                "password must contain at least one letter"
            );
        }

        #[test]
        fn test_missing_digit() {
            assert_eq!(policy_err("abcdefg"), PasswordPolicyError::MissingDigit);
            assert_eq!(
                policy_err("abcdefg").to_string(),
                "password must contain at least one number"
            );
        }

        #[test]
        fn test_length_counts_characters_not_bytes() {
            // 5 multi-byte characters + 1 digit = 6 characters
            assert!(ClearTextPassword::new("äöüßa1".to_string()).is_ok());
        }
    }

    mod hashing {
        use super::*;

        #[test]
        fn test_hash_and_verify() {
            let password = ClearTextPassword::new("secret123".to_string()).unwrap();
            let hashed = password.hash(None).unwrap();

            assert!(hashed.as_phc_string().starts_with("$argon2id$"));
            assert!(hashed.verify(&password, None));

            let wrong = ClearTextPassword::for_verification("secret124".to_string());
            assert!(!hashed.verify(&wrong, None));
        }

        #[test]
        fn test_hash_with_pepper() {
            let password = ClearTextPassword::new("secret123".to_string()).unwrap();
            let hashed = password.hash(Some(b"pepper")).unwrap();

            assert!(hashed.verify(&password, Some(b"pepper")));
            assert!(!hashed.verify(&password, None));
            assert!(!hashed.verify(&password, Some(b"other")));
        }

        #[test]
        fn test_phc_string_roundtrip() {
            let password = ClearTextPassword::new("secret123".to_string()).unwrap();
            let hashed = password.hash(None).unwrap();

            let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
            assert!(restored.verify(&password, None));
        }

        #[test]
        fn test_invalid_phc_string() {
            assert!(matches!(
                HashedPassword::from_phc_string("not-a-hash"),
                Err(PasswordHashError::InvalidHashFormat)
            ));
        }

        #[test]
        fn test_debug_redaction() {
            let password = ClearTextPassword::new("secret123".to_string()).unwrap();
            assert!(format!("{:?}", password).contains("REDACTED"));

            let hashed = password.hash(None).unwrap();
            assert!(!format!("{:?}", hashed).contains("argon2"));
        }
    }
}
