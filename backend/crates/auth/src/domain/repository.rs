//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use crate::domain::entity::identity::{Identity, NewIdentity};
use crate::domain::value_object::{email::Email, identity_id::IdentityId};
use crate::error::AuthResult;

/// Identity repository trait (the Credential Store)
#[trait_variant::make(IdentityRepository: Send)]
pub trait LocalIdentityRepository {
    /// Insert a new identity; the store assigns its id
    ///
    /// Must fail with `AuthError::DuplicateIdentity` when the email is
    /// already taken, even if a concurrent insert won the race.
    async fn insert(&self, identity: NewIdentity) -> AuthResult<Identity>;

    /// Find identity by ID
    async fn find_by_id(&self, id: &IdentityId) -> AuthResult<Option<Identity>>;

    /// Find identity by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Identity>>;
}
