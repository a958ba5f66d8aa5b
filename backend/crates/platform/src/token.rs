//! Bearer Token Issuing and Verification
//!
//! Stateless HS256 JSON Web Tokens carrying a subject id and an absolute
//! expiry. Nothing is stored server-side; a token is valid until `exp`.
//!
//! Verification order is signature first, then expiry, so a tampered token
//! is always reported as [`TokenError::InvalidSignature`] even when it has
//! also expired.

use std::fmt;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum HMAC secret length in bytes
pub const MIN_SECRET_LEN: usize = 32;

/// Claims embedded in every token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject - the authenticated identity id
    pub sub: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expires at (unix seconds)
    pub exp: i64,
}

/// Token verification/issuing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Signature does not match the server secret
    #[error("Token signature is invalid")]
    InvalidSignature,

    /// Current time is past the embedded expiry
    #[error("Token has expired")]
    Expired,

    /// Token cannot be parsed
    #[error("Token is malformed")]
    Malformed,

    /// Secret is too short to sign with
    #[error("Token secret must be at least {min} bytes, got {actual}")]
    WeakSecret { min: usize, actual: usize },

    /// Encoding failed (never expected with HS256)
    #[error("Token signing failed: {0}")]
    SigningFailed(String),
}

/// Issues and verifies bearer tokens with a shared secret
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenSigner {
    /// Create a signer using HS256 with the given secret and lifetime
    ///
    /// Secrets shorter than [`MIN_SECRET_LEN`] are refused.
    pub fn hs256(secret: &[u8], ttl: Duration) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(TokenError::WeakSecret {
                min: MIN_SECRET_LEN,
                actual: secret.len(),
            });
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against an explicit clock in `verify_at`
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        })
    }

    /// Token lifetime
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `subject`, valid from now for the configured ttl
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        self.issue_at(subject, Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `now` (unix seconds)
    pub fn issue_at(&self, subject: &str, now: i64) -> Result<String, TokenError> {
        let ttl_secs = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = TokenClaims {
            sub: subject.to_string(),
            iat: now,
            exp: now.saturating_add(ttl_secs),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Verify a token against the current time
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a token as if the current time were `now` (unix seconds)
    pub fn verify_at(&self, token: &str, now: i64) -> Result<TokenClaims, TokenError> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            },
        )?;

        if now > data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("algorithm", &"HS256")
            .field("secret", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";
    const TTL: Duration = Duration::from_secs(3600);

    fn signer() -> TokenSigner {
        TokenSigner::hs256(SECRET, TTL).unwrap()
    }

    /// Replace one character inside the signature segment
    fn tamper_signature(token: &str) -> String {
        let (head, signature) = token.rsplit_once('.').unwrap();
        let mut chars: Vec<char> = signature.chars().collect();
        chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
        format!("{}.{}", head, chars.into_iter().collect::<String>())
    }

    #[test]
    fn test_issue_and_verify() {
        let token = signer().issue("identity-123").unwrap();
        let claims = signer().verify(&token).unwrap();

        assert_eq!(claims.sub, "identity-123");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_token_has_three_segments() {
        let token = signer().issue("identity-123").unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_valid_just_before_expiry() {
        let issued_at = 1_700_000_000;
        let token = signer().issue_at("identity-123", issued_at).unwrap();

        let claims = signer().verify_at(&token, issued_at + 3600 - 1).unwrap();
        assert_eq!(claims.sub, "identity-123");

        // Boundary: exactly at exp is not yet past it
        assert!(signer().verify_at(&token, issued_at + 3600).is_ok());
    }

    #[test]
    fn test_expired_just_after_expiry() {
        let issued_at = 1_700_000_000;
        let token = signer().issue_at("identity-123", issued_at).unwrap();

        let result = signer().verify_at(&token, issued_at + 3600 + 1);
        assert_eq!(result, Err(TokenError::Expired));
    }

    #[test]
    fn test_expired_against_wall_clock() {
        let token = signer()
            .issue_at("identity-123", Utc::now().timestamp() - 7200)
            .unwrap();
        assert_eq!(signer().verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_tampered_signature() {
        let token = signer().issue("identity-123").unwrap();
        let tampered = tamper_signature(&token);

        assert_eq!(signer().verify(&tampered), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_tampered_and_expired_reports_signature() {
        let issued_at = 1_700_000_000;
        let token = signer().issue_at("identity-123", issued_at).unwrap();
        let tampered = tamper_signature(&token);

        let result = signer().verify_at(&tampered, issued_at + 10_000);
        assert_eq!(result, Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_wrong_secret() {
        let token = signer().issue("identity-123").unwrap();
        let other = TokenSigner::hs256(b"another-secret-key-of-32-bytes!!", TTL).unwrap();

        assert_eq!(other.verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_malformed_tokens() {
        assert_eq!(signer().verify(""), Err(TokenError::Malformed));
        assert_eq!(signer().verify("not-a-token"), Err(TokenError::Malformed));
        assert_eq!(signer().verify("a.b.c"), Err(TokenError::Malformed));
    }

    #[test]
    fn test_short_secret_refused() {
        assert_eq!(
            TokenSigner::hs256(b"", TTL).unwrap_err(),
            TokenError::WeakSecret { min: 32, actual: 0 }
        );
        assert!(TokenSigner::hs256(&[7u8; MIN_SECRET_LEN - 1], TTL).is_err());
        assert!(TokenSigner::hs256(&[7u8; MIN_SECRET_LEN], TTL).is_ok());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug = format!("{:?}", signer());
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("test-secret"));
    }
}
