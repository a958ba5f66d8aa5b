//! In-Memory Repository Implementation
//!
//! Process-local identity store for tests. Contents are lost on drop.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::entity::identity::{Identity, NewIdentity};
use crate::domain::repository::IdentityRepository;
use crate::domain::value_object::{email::Email, identity_id::IdentityId};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Tables {
    by_id: HashMap<IdentityId, Identity>,
    // email -> id, the uniqueness index
    by_email: HashMap<String, IdentityId>,
}

/// In-memory identity repository
#[derive(Clone, Default)]
pub struct InMemoryIdentityRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryIdentityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored identities
    pub async fn len(&self) -> usize {
        self.tables.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl IdentityRepository for InMemoryIdentityRepository {
    async fn insert(&self, identity: NewIdentity) -> AuthResult<Identity> {
        let mut tables = self.tables.write().await;

        // Check and insert under one write lock
        if tables.by_email.contains_key(identity.email.as_str()) {
            return Err(AuthError::DuplicateIdentity);
        }

        let id = IdentityId::new();
        let identity = identity.into_identity(id, Utc::now());

        tables
            .by_email
            .insert(identity.email.as_str().to_string(), id);
        tables.by_id.insert(id, identity.clone());

        Ok(identity)
    }

    async fn find_by_id(&self, identity_id: &IdentityId) -> AuthResult<Option<Identity>> {
        Ok(self.tables.read().await.by_id.get(identity_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Identity>> {
        let tables = self.tables.read().await;
        Ok(tables
            .by_email
            .get(email.as_str())
            .and_then(|id| tables.by_id.get(id))
            .cloned())
    }
}
