//! HTTP Handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, State};
use axum::Json;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    CurrentIdentityUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::repository::IdentityRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{IdentityResponse, LoginRequest, RegisterRequest, TokenResponse};
use crate::presentation::middleware::AuthenticatedIdentity;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: IdentityRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> AuthResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AuthError::MalformedBody(rejection.body_text()))
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/users
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<Json<TokenResponse>>
where
    R: IdentityRepository + Clone + Send + Sync + 'static,
{
    let req = body(payload)?;

    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(RegisterInput {
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(TokenResponse {
        token: output.token,
    }))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<Json<TokenResponse>>
where
    R: IdentityRepository + Clone + Send + Sync + 'static,
{
    let req = body(payload)?;

    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(TokenResponse {
        token: output.token,
    }))
}

// ============================================================================
// Current Identity (requires token)
// ============================================================================

/// GET /api/auth
pub async fn current_identity<R>(
    State(state): State<AuthAppState<R>>,
    Extension(AuthenticatedIdentity(identity_id)): Extension<AuthenticatedIdentity>,
) -> AuthResult<Json<IdentityResponse>>
where
    R: IdentityRepository + Clone + Send + Sync + 'static,
{
    let use_case = CurrentIdentityUseCase::new(state.repo.clone());

    let profile = use_case.execute(&identity_id).await?;

    Ok(Json(profile.into()))
}
