//! Login Use Case
//!
//! Exchanges an email and password for a fresh token.

use std::sync::Arc;

use kernel::error::app_error::FieldError;

use crate::application::config::AuthConfig;
use crate::domain::repository::IdentityRepository;
use crate::domain::value_object::{email::Email, identity_id::IdentityId, password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Login input
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug, Clone)]
pub struct LoginOutput {
    pub identity_id: IdentityId,
    pub token: String,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: IdentityRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: IdentityRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Unknown email and wrong password both end in `InvalidCredentials`
    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let mut field_errors = Vec::new();

        let email = Email::new(input.email)
            .map_err(|e| field_errors.push(FieldError::new("email", e.message())))
            .ok();
        let password = RawPassword::for_sign_in(input.password)
            .map_err(|e| field_errors.push(FieldError::new("password", e.message())))
            .ok();

        let (Some(email), Some(password)) = (email, password) else {
            return Err(AuthError::Validation(field_errors));
        };

        let signer = self.config.token_signer()?;

        let Some(identity) = self.repo.find_by_email(&email).await? else {
            tracing::debug!("Login for unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        let digest = identity.password_digest.clone();
        let config = self.config.clone();
        let matches =
            tokio::task::spawn_blocking(move || digest.verify(&password, config.pepper()))
                .await
                .map_err(|e| {
                    AuthError::Internal(format!("Password verification task failed: {}", e))
                })?
                .map_err(|e| AuthError::Internal(e.to_string()))?;

        if !matches {
            tracing::debug!(identity_id = %identity.id, "Login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = signer.issue(&identity.id.to_string())?;

        tracing::info!(identity_id = %identity.id, "Identity logged in");

        Ok(LoginOutput {
            identity_id: identity.id,
            token,
        })
    }
}
