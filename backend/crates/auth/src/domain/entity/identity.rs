//! Identity Entity
//!
//! A registered user. Created once at registration and never modified.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, identity_id::IdentityId, identity_name::IdentityName, password::PasswordDigest,
};

/// Identity entity
///
/// Carries the password digest, so it never leaves the crate boundary as-is.
/// Use [`Identity::profile`] for anything sent to a client.
#[derive(Debug, Clone)]
pub struct Identity {
    /// Store-assigned identifier
    pub id: IdentityId,
    /// Display name
    pub name: IdentityName,
    /// Unique, lower-cased email
    pub email: Email,
    /// Argon2id digest of the password
    pub password_digest: PasswordDigest,
    /// Store-assigned creation time
    pub created_at: DateTime<Utc>,
}

/// Identity data before the store has assigned an id
#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub name: IdentityName,
    pub email: Email,
    pub password_digest: PasswordDigest,
}

/// Identity projection without credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityProfile {
    pub id: IdentityId,
    pub name: IdentityName,
    pub email: Email,
}

impl NewIdentity {
    pub fn new(name: IdentityName, email: Email, password_digest: PasswordDigest) -> Self {
        Self {
            name,
            email,
            password_digest,
        }
    }

    /// Attach the store-assigned id and timestamp
    pub fn into_identity(self, id: IdentityId, created_at: DateTime<Utc>) -> Identity {
        Identity {
            id,
            name: self.name,
            email: self.email,
            password_digest: self.password_digest,
            created_at,
        }
    }
}

impl Identity {
    /// Project out the password digest
    pub fn profile(&self) -> IdentityProfile {
        IdentityProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::password::RawPassword;
    use platform::password::PasswordHashParams;

    fn new_identity() -> NewIdentity {
        let raw = RawPassword::new("secret1".to_string()).unwrap();
        NewIdentity::new(
            IdentityName::new("Ann").unwrap(),
            Email::new("a@x.com").unwrap(),
            PasswordDigest::from_raw(&raw, &PasswordHashParams::insecure_fast(), None).unwrap(),
        )
    }

    #[test]
    fn test_into_identity_keeps_fields() {
        let id = IdentityId::new();
        let now = Utc::now();
        let identity = new_identity().into_identity(id, now);

        assert_eq!(identity.id, id);
        assert_eq!(identity.name.as_str(), "Ann");
        assert_eq!(identity.email.as_str(), "a@x.com");
        assert_eq!(identity.created_at, now);
    }

    #[test]
    fn test_profile_matches_identity() {
        let identity = new_identity().into_identity(IdentityId::new(), Utc::now());
        let profile = identity.profile();

        assert_eq!(profile.id, identity.id);
        assert_eq!(profile.name, identity.name);
        assert_eq!(profile.email, identity.email);
    }
}
