//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::identity::{Identity, NewIdentity};
use crate::domain::repository::IdentityRepository;
use crate::domain::value_object::{
    email::Email, identity_id::IdentityId, identity_name::IdentityName, password::PasswordDigest,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed identity repository
#[derive(Clone)]
pub struct PgIdentityRepository {
    pool: PgPool,
}

impl PgIdentityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl IdentityRepository for PgIdentityRepository {
    async fn insert(&self, identity: NewIdentity) -> AuthResult<Identity> {
        let inserted: (Uuid, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO identities (
                name,
                email,
                password_digest
            ) VALUES ($1, $2, $3)
            RETURNING identity_id, created_at
            "#,
        )
        .bind(identity.name.as_str())
        .bind(identity.email.as_str())
        .bind(identity.password_digest.as_phc_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AuthError::DuplicateIdentity
            }
            other => AuthError::Database(other),
        })?;

        let (identity_id, created_at) = inserted;
        Ok(identity.into_identity(IdentityId::from_uuid(identity_id), created_at))
    }

    async fn find_by_id(&self, identity_id: &IdentityId) -> AuthResult<Option<Identity>> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT
                identity_id,
                name,
                email,
                password_digest,
                created_at
            FROM identities
            WHERE identity_id = $1
            "#,
        )
        .bind(identity_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_identity()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Identity>> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT
                identity_id,
                name,
                email,
                password_digest,
                created_at
            FROM identities
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_identity()).transpose()
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct IdentityRow {
    identity_id: Uuid,
    name: String,
    email: String,
    password_digest: String,
    created_at: DateTime<Utc>,
}

impl IdentityRow {
    fn into_identity(self) -> AuthResult<Identity> {
        let password_digest = PasswordDigest::from_phc_string(self.password_digest)
            .map_err(|e| AuthError::Internal(format!("Invalid password_digest: {}", e)))?;

        Ok(Identity {
            id: IdentityId::from_uuid(self.identity_id),
            name: IdentityName::from_db(self.name),
            email: Email::from_db(self.email),
            password_digest,
            created_at: self.created_at,
        })
    }
}
