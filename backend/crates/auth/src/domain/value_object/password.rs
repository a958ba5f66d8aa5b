//! Password Value Objects
//!
//! Domain wrappers over `platform::password`.
//!
//! - [`RawPassword`]: plaintext from a request, zeroized on drop
//! - [`PasswordDigest`]: Argon2id PHC string, the only form ever stored
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::password::{PasswordDigest, RawPassword};
//! use platform::password::PasswordHashParams;
//!
//! let raw = RawPassword::new("secret1".to_string()).unwrap();
//! let digest = PasswordDigest::from_raw(&raw, &PasswordHashParams::insecure_fast(), None).unwrap();
//! assert!(digest.verify(&raw, None).unwrap());
//! ```

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordHashParams, PasswordPolicyError,
};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Memory is automatically zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Accept a new password, enforcing the registration policy
    ///
    /// ## Errors
    /// Returns a 400 `AppError` with a user-facing message
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooShort { .. } => AppError::bad_request(e.to_string()),
            PasswordPolicyError::TooLong { .. } => AppError::bad_request(e.to_string())
                .with_action("Please choose a shorter password"),
            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::bad_request("Password cannot be empty")
            }
            PasswordPolicyError::InvalidCharacter => {
                AppError::bad_request("Password contains invalid characters")
                    .with_action("Please remove any special control characters")
            }
        })?;

        Ok(Self(clear_text))
    }

    /// Accept a password submitted at sign-in
    ///
    /// Only presence is checked; whether it is right is for the digest to say.
    pub fn for_sign_in(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::for_verification(raw);
        if clear_text.is_empty() {
            return Err(AppError::bad_request("Password is required"));
        }
        Ok(Self(clear_text))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Password Digest (Hashed, for storage)
// ============================================================================

/// Hashed password for storage
///
/// Stores the password in Argon2id PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(HashedPassword);

impl PasswordDigest {
    /// Hash a raw password with a fresh random salt
    pub fn from_raw(
        raw: &RawPassword,
        params: &PasswordHashParams,
        pepper: Option<&[u8]>,
    ) -> AppResult<Self> {
        let hashed = raw
            .inner()
            .hash(params, pepper)
            .map_err(|e| AppError::internal("Password hashing failed").with_source(e))?;

        Ok(Self(hashed))
    }

    /// Load from a stored PHC string
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string).map_err(|e| {
            AppError::internal("Invalid password hash in database").with_source(e)
        })?;

        Ok(Self(hashed))
    }

    /// Get PHC string for database storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Check a raw password against this digest
    ///
    /// `Ok(false)` on mismatch; an error only if the digest is unusable.
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<bool> {
        self.0.verify(raw.inner(), pepper).map_err(|e| match e {
            PasswordHashError::InvalidHashFormat => {
                AppError::internal("Invalid password hash in database").with_source(e)
            }
            _ => AppError::internal("Password verification failed").with_source(e),
        })
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordDigest")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
