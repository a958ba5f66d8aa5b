//! Register Use Case
//!
//! Creates a new identity and signs a token for it.

use std::sync::Arc;

use kernel::error::app_error::FieldError;

use crate::application::config::AuthConfig;
use crate::domain::entity::identity::NewIdentity;
use crate::domain::repository::IdentityRepository;
use crate::domain::value_object::{
    email::Email,
    identity_id::IdentityId,
    identity_name::IdentityName,
    password::{PasswordDigest, RawPassword},
};
use crate::error::{AuthError, AuthResult};

/// Registration input
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Registration output
#[derive(Debug, Clone)]
pub struct RegisterOutput {
    pub identity_id: IdentityId,
    pub token: String,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: IdentityRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: IdentityRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        // Every field is checked so the client sees all problems at once
        let mut field_errors = Vec::new();

        let name = IdentityName::new(&input.name)
            .map_err(|e| field_errors.push(FieldError::new("name", e.message())))
            .ok();
        let email = Email::new(input.email)
            .map_err(|e| field_errors.push(FieldError::new("email", e.message())))
            .ok();
        let password = RawPassword::new(input.password)
            .map_err(|e| field_errors.push(FieldError::new("password", e.message())))
            .ok();

        let (Some(name), Some(email), Some(password)) = (name, email, password) else {
            return Err(AuthError::Validation(field_errors));
        };

        // Refuse before writing anything if tokens cannot be signed
        let signer = self.config.token_signer()?;

        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(AuthError::DuplicateIdentity);
        }

        // Argon2 is CPU-bound; keep it off the async workers
        let config = self.config.clone();
        let password_digest = tokio::task::spawn_blocking(move || {
            PasswordDigest::from_raw(&password, &config.password_hash_params, config.pepper())
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| AuthError::Internal(e.to_string()))?;

        // A concurrent registration may still win here; the store reports it as a duplicate
        let identity = self
            .repo
            .insert(NewIdentity::new(name, email, password_digest))
            .await?;

        let token = signer.issue(&identity.id.to_string())?;

        tracing::info!(identity_id = %identity.id, "Identity registered");

        Ok(RegisterOutput {
            identity_id: identity.id,
            token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryIdentityRepository;
    use platform::password::PasswordHashParams;

    fn use_case() -> (RegisterUseCase<InMemoryIdentityRepository>, Arc<InMemoryIdentityRepository>, Arc<AuthConfig>) {
        let repo = Arc::new(InMemoryIdentityRepository::new());
        let config = Arc::new(AuthConfig {
            password_hash_params: PasswordHashParams::insecure_fast(),
            ..AuthConfig::development()
        });
        (
            RegisterUseCase::new(repo.clone(), config.clone()),
            repo,
            config,
        )
    }

    fn input(name: &str, email: &str, password: &str) -> RegisterInput {
        RegisterInput {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_issues_token_for_new_identity() {
        let (use_case, repo, config) = use_case();

        let output = use_case
            .execute(input("Ann", "ann@x.io", "secret1"))
            .await
            .unwrap();

        let claims = config.token_signer().unwrap().verify(&output.token).unwrap();
        assert_eq!(claims.sub, output.identity_id.to_string());

        let stored = repo.find_by_id(&output.identity_id).await.unwrap().unwrap();
        assert_eq!(stored.name.as_str(), "Ann");
        assert_eq!(stored.email.as_str(), "ann@x.io");
        assert_ne!(stored.password_digest.as_phc_string(), "secret1");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let (use_case, _, _) = use_case();

        use_case
            .execute(input("Ann", "ann@x.io", "secret1"))
            .await
            .unwrap();

        // Case differences do not make a new identity
        let err = use_case
            .execute(input("Other", "ANN@x.io", "another1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateIdentity));
    }

    #[tokio::test]
    async fn test_register_collects_all_field_errors() {
        let (use_case, repo, _) = use_case();

        let err = use_case.execute(input("", "not-an-email", "abc")).await.unwrap_err();

        let AuthError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        let names: Vec<&str> = fields.iter().map(|f| f.field.as_ref()).collect();
        assert_eq!(names, vec!["name", "email", "password"]);
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_register_without_secret_writes_nothing() {
        let repo = Arc::new(InMemoryIdentityRepository::new());
        let config = Arc::new(AuthConfig {
            password_hash_params: PasswordHashParams::insecure_fast(),
            ..AuthConfig::default()
        });

        let err = RegisterUseCase::new(repo.clone(), config)
            .execute(input("Ann", "ann@x.io", "secret1"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Internal(_)));
        assert!(repo.is_empty().await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_registrations_of_distinct_emails() {
        let (use_case, repo, _) = use_case();
        let use_case = Arc::new(use_case);

        let handles: Vec<_> = (0..6)
            .map(|i| {
                let use_case = use_case.clone();
                tokio::spawn(async move {
                    use_case
                        .execute(input("Ann", &format!("ann{}@x.io", i), "secret1"))
                        .await
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }
        assert_eq!(repo.len().await, 6);
    }

    #[tokio::test]
    async fn test_register_short_password_message() {
        let (use_case, _, _) = use_case();

        let err = use_case
            .execute(input("Ann", "ann@x.io", "abc"))
            .await
            .unwrap_err();

        let AuthError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        assert_eq!(fields.len(), 1);
        assert_eq!(
            fields[0].message,
            "Please enter a password with 6 or more characters"
        );
    }
}
