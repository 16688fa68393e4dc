//! Username Value Object
//!
//! Public handle of a user, used in profile URLs and as the author name on
//! articles and comments.
//!
//! ## Invariants
//! - Length: 3 to 20 characters
//! - ASCII letters, digits, and `_` only
//! - Case is preserved and significant (`Alice` and `alice` are distinct)

use derive_more::Display;
use serde::Serialize;
use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// Minimum length for username (in characters)
pub const USERNAME_MIN_LENGTH: usize = 3;

/// Maximum length for username (in characters)
pub const USERNAME_MAX_LENGTH: usize = 20;

// ============================================================================
// Error Types
// ============================================================================

/// Error returned when username validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsernameError {
    Empty,
    TooShort,
    TooLong,
    InvalidCharacter { char: char, position: usize },
}

impl fmt::Display for UsernameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "username is required"),
            Self::TooShort => write!(
                f,
                "username must be at least {USERNAME_MIN_LENGTH} characters long"
            ),
            Self::TooLong => write!(
                f,
                "username must be no more than {USERNAME_MAX_LENGTH} characters long"
            ),
            Self::InvalidCharacter { .. } => write!(
                f,
                "username can only contain letters, numbers, and underscores"
            ),
        }
    }
}

impl std::error::Error for UsernameError {}

impl From<UsernameError> for crate::error::AuthError {
    fn from(err: UsernameError) -> Self {
        crate::error::AuthError::Validation(err.to_string())
    }
}

// ============================================================================
// Username Value Object
// ============================================================================

/// Validated username
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Validate raw input
    pub fn new(input: impl Into<String>) -> Result<Self, UsernameError> {
        let input = input.into();
        Self::validate(&input)?;
        Ok(Self(input))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(input: &str) -> Result<(), UsernameError> {
        if input.is_empty() {
            return Err(UsernameError::Empty);
        }

        let length = input.chars().count();
        if length < USERNAME_MIN_LENGTH {
            return Err(UsernameError::TooShort);
        }
        if length > USERNAME_MAX_LENGTH {
            return Err(UsernameError::TooLong);
        }

        if let Some((position, char)) = input
            .chars()
            .enumerate()
            .find(|(_, c)| !Self::is_valid_char(*c))
        {
            return Err(UsernameError::InvalidCharacter { char, position });
        }

        Ok(())
    }

    #[inline]
    fn is_valid_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_'
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod length_validation {
        use super::*;

        #[test]
        fn test_empty_fails() {
            assert_eq!(Username::new(""), Err(UsernameError::Empty));
            assert_eq!(UsernameError::Empty.to_string(), "username is required");
        }

        #[test]
        fn test_too_short() {
            let err = Username::new("ab").unwrap_err();
            assert_eq!(err, UsernameError::TooShort);
            assert_eq!(
                err.to_string(),
                "username must be at least 3 characters long"
            );
        }

        #[test]
        fn test_boundaries() {
            assert!(Username::new("abc").is_ok());
            assert!(Username::new("a".repeat(USERNAME_MAX_LENGTH)).is_ok());
        }

        #[test]
        fn test_too_long() {
            let err = Username::new("a".repeat(USERNAME_MAX_LENGTH + 1)).unwrap_err();
            assert_eq!(
                err.to_string(),
                "username must be no more than 20 characters long"
            );
        }
    }

    mod character_validation {
        use super::*;

        #[test]
        fn test_valid_characters() {
            assert!(Username::new("alice_123").is_ok());
            assert!(Username::new("_Bob_").is_ok());
            assert!(Username::new("JAKE").is_ok());
        }

        #[test]
        fn test_invalid_characters() {
            for input in ["alice.b", "al ice", "alice-b", "ålice", "bob+1"] {
                let err = Username::new(input).unwrap_err();
                assert!(
                    matches!(err, UsernameError::InvalidCharacter { .. }),
                    "{input}"
                );
                assert_eq!(
                    err.to_string(),
                    "username can only contain letters, numbers, and underscores"
                );
            }
        }

        #[test]
        fn test_invalid_character_position() {
            assert_eq!(
                Username::new("abc!def"),
                Err(UsernameError::InvalidCharacter {
                    char: '!',
                    position: 3
                })
            );
        }

        #[test]
        fn test_case_preserved() {
            let name = Username::new("Alice").unwrap();
            assert_eq!(name.as_str(), "Alice");
            assert_ne!(name, Username::new("alice").unwrap());
        }
    }
}
