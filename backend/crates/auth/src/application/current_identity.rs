//! Current Identity Use Case
//!
//! Looks up the profile of an authenticated identity.

use std::sync::Arc;

use crate::domain::entity::identity::IdentityProfile;
use crate::domain::repository::IdentityRepository;
use crate::domain::value_object::identity_id::IdentityId;
use crate::error::{AuthError, AuthResult};

pub struct CurrentIdentityUseCase<R>
where
    R: IdentityRepository,
{
    repo: Arc<R>,
}

impl<R> CurrentIdentityUseCase<R>
where
    R: IdentityRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// A valid token whose identity no longer exists yields `IdentityNotFound`
    pub async fn execute(&self, identity_id: &IdentityId) -> AuthResult<IdentityProfile> {
        let identity = self
            .repo
            .find_by_id(identity_id)
            .await?
            .ok_or(AuthError::IdentityNotFound)?;

        Ok(identity.profile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::identity::NewIdentity;
    use crate::domain::value_object::{
        email::Email,
        identity_name::IdentityName,
        password::{PasswordDigest, RawPassword},
    };
    use crate::infra::memory::InMemoryIdentityRepository;
    use platform::password::PasswordHashParams;

    #[tokio::test]
    async fn test_profile_lookup() {
        let repo = Arc::new(InMemoryIdentityRepository::new());
        let raw = RawPassword::new("secret1".to_string()).unwrap();
        let digest =
            PasswordDigest::from_raw(&raw, &PasswordHashParams::insecure_fast(), None).unwrap();
        let identity = repo
            .insert(NewIdentity::new(
                IdentityName::new("Ann").unwrap(),
                Email::new("ann@x.io").unwrap(),
                digest,
            ))
            .await
            .unwrap();

        let profile = CurrentIdentityUseCase::new(repo)
            .execute(&identity.id)
            .await
            .unwrap();

        assert_eq!(profile.id, identity.id);
        assert_eq!(profile.name.as_str(), "Ann");
        assert_eq!(profile.email.as_str(), "ann@x.io");
    }

    #[tokio::test]
    async fn test_unknown_identity() {
        let repo = Arc::new(InMemoryIdentityRepository::new());
        let err = CurrentIdentityUseCase::new(repo)
            .execute(&IdentityId::new())
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::IdentityNotFound));
    }
}
