//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

use platform::bearer::DEFAULT_TOKEN_HEADER;
use platform::crypto::random_bytes;
use platform::password::PasswordHashParams;
use platform::token::{MIN_SECRET_LEN, TokenError, TokenSigner};

/// Minimum accepted token secret length in bytes
pub const MIN_TOKEN_SECRET_LEN: usize = MIN_SECRET_LEN;

/// Auth application configuration
///
/// `Default` carries no secret; nothing can be signed until one is set.
#[derive(Clone)]
pub struct AuthConfig {
    /// Secret key for HS256 token signing
    pub token_secret: Vec<u8>,
    /// Token lifetime
    pub token_ttl: Duration,
    /// Header carrying the raw token
    pub token_header: String,
    /// Argon2id work factor for new digests
    pub password_hash_params: PasswordHashParams,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: Vec::new(),
            token_ttl: Duration::from_secs(3 * 3600), // 3 hours
            token_header: DEFAULT_TOKEN_HEADER.to_string(),
            password_hash_params: PasswordHashParams::default(),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with an explicit token secret
    pub fn with_secret(token_secret: Vec<u8>) -> Result<Self, TokenError> {
        if token_secret.len() < MIN_TOKEN_SECRET_LEN {
            return Err(TokenError::WeakSecret {
                min: MIN_TOKEN_SECRET_LEN,
                actual: token_secret.len(),
            });
        }

        Ok(Self {
            token_secret,
            ..Default::default()
        })
    }

    /// Create config with a random token secret
    ///
    /// Tokens do not survive a restart with this config.
    pub fn with_random_secret() -> Self {
        Self {
            token_secret: random_bytes(MIN_TOKEN_SECRET_LEN),
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Build the token signer for the configured secret and ttl
    pub fn token_signer(&self) -> Result<TokenSigner, TokenError> {
        TokenSigner::hs256(&self.token_secret, self.token_ttl)
    }

    /// Get token TTL in seconds
    pub fn token_ttl_secs(&self) -> u64 {
        self.token_ttl.as_secs()
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("token_header", &self.token_header)
            .field("password_hash_params", &self.password_hash_params)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
