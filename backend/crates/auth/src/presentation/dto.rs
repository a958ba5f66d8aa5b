//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::identity::IdentityProfile;

// ============================================================================
// Requests
// ============================================================================

/// Registration request
///
/// Absent fields deserialize as empty so they surface as validation errors.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ============================================================================
// Responses
// ============================================================================

/// Returned by registration and login
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Public view of an identity
#[derive(Debug, Clone, Serialize)]
pub struct IdentityResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<IdentityProfile> for IdentityResponse {
    fn from(profile: IdentityProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            name: profile.name.as_str().to_string(),
            email: profile.email.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let req: RegisterRequest = serde_json::from_str(r#"{"email":"a@x.io"}"#).unwrap();
        assert_eq!(req.email, "a@x.io");
        assert!(req.name.is_empty());
        assert!(req.password.is_empty());
    }

    #[test]
    fn test_token_response_shape() {
        let json = serde_json::to_value(TokenResponse {
            token: "abc".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "token": "abc" }));
    }
}
