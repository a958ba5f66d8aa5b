//! Identity Name Value Object
//!
//! Free-form display name of a registered identity.
//!
//! ## Invariants
//! - NFKC normalized, surrounding whitespace trimmed
//! - Length: 1 to 50 characters (after normalization)
//! - No control characters

use derive_more::Display;
use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Maximum length for a name (in characters)
pub const IDENTITY_NAME_MAX_LENGTH: usize = 50;

/// Error returned when name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityNameError {
    /// Name is empty after trimming
    Empty,

    /// Name is too long (maximum: IDENTITY_NAME_MAX_LENGTH)
    TooLong { length: usize, max: usize },

    /// Name contains a control character
    ControlCharacter,
}

impl fmt::Display for IdentityNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Name is required"),
            Self::TooLong { length, max } => {
                write!(f, "Name is too long ({length} chars, maximum {max})")
            }
            Self::ControlCharacter => write!(f, "Name contains invalid characters"),
        }
    }
}

impl std::error::Error for IdentityNameError {}

/// Validated identity name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub struct IdentityName(String);

impl IdentityName {
    /// Create a new name with validation
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        Self::parse(raw.as_ref()).map_err(|e| AppError::bad_request(e.to_string()).with_source(e))
    }

    /// Normalize and validate without the AppError wrapping
    pub fn parse(raw: &str) -> Result<Self, IdentityNameError> {
        let normalized: String = raw.nfkc().collect();
        let name = normalized.trim();

        if name.is_empty() {
            return Err(IdentityNameError::Empty);
        }

        let length = name.chars().count();
        if length > IDENTITY_NAME_MAX_LENGTH {
            return Err(IdentityNameError::TooLong {
                length,
                max: IDENTITY_NAME_MAX_LENGTH,
            });
        }

        if name.chars().any(char::is_control) {
            return Err(IdentityNameError::ControlCharacter);
        }

        Ok(Self(name.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for IdentityName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
