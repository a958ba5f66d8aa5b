//! Authenticate Use Case
//!
//! Resolves a presented bearer token to the identity it was issued for.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::value_object::identity_id::IdentityId;
use crate::error::{AuthError, AuthResult};

/// Token authentication use case
///
/// Purely cryptographic; the store is not consulted.
pub struct AuthenticateUseCase {
    config: Arc<AuthConfig>,
}

impl AuthenticateUseCase {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    pub fn execute(&self, token: &str) -> AuthResult<IdentityId> {
        let claims = self.config.token_signer()?.verify(token)?;

        IdentityId::parse_str(&claims.sub).map_err(|_| AuthError::TokenMalformed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn setup() -> (AuthenticateUseCase, Arc<AuthConfig>) {
        let config = Arc::new(AuthConfig::development());
        (AuthenticateUseCase::new(config.clone()), config)
    }

    #[test]
    fn test_valid_token() {
        let (use_case, config) = setup();
        let id = IdentityId::new();
        let token = config.token_signer().unwrap().issue(&id.to_string()).unwrap();

        assert_eq!(use_case.execute(&token).unwrap(), id);
    }

    #[test]
    fn test_expired_token() {
        let (use_case, config) = setup();
        let issued_at = Utc::now().timestamp() - config.token_ttl_secs() as i64 - 1;
        let token = config
            .token_signer()
            .unwrap()
            .issue_at(&IdentityId::new().to_string(), issued_at)
            .unwrap();

        assert!(matches!(use_case.execute(&token), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_foreign_token() {
        let (use_case, _) = setup();
        let other = AuthConfig::development();
        let token = other.token_signer().unwrap().issue(&IdentityId::new().to_string()).unwrap();

        assert!(matches!(
            use_case.execute(&token),
            Err(AuthError::TokenInvalidSignature)
        ));
    }

    #[test]
    fn test_subject_not_an_id() {
        let (use_case, config) = setup();
        let token = config.token_signer().unwrap().issue("not-a-uuid").unwrap();

        assert!(matches!(use_case.execute(&token), Err(AuthError::TokenMalformed)));
    }

    #[test]
    fn test_garbage() {
        let (use_case, _) = setup();
        assert!(matches!(use_case.execute("garbage"), Err(AuthError::TokenMalformed)));
    }
}
