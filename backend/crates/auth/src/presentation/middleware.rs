//! Auth Middleware
//!
//! Token gate for protected routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use platform::bearer::extract_token;

use crate::application::AuthenticateUseCase;
use crate::domain::repository::IdentityRepository;
use crate::domain::value_object::identity_id::IdentityId;
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Identity proven by the request's token
///
/// Inserted into request extensions by [`require_token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedIdentity(pub IdentityId);

/// Middleware that requires a valid bearer token
///
/// The token is read from the configured header, falling back to
/// `Authorization: Bearer`. The store is not consulted here.
pub async fn require_token<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: IdentityRepository + Clone + Send + Sync + 'static,
{
    let token = extract_token(req.headers(), &state.config.token_header)
        .ok_or(AuthError::TokenMissing)?;

    let identity_id = AuthenticateUseCase::new(state.config.clone()).execute(&token)?;

    tracing::debug!(identity_id = %identity_id, "Token accepted");

    req.extensions_mut()
        .insert(AuthenticatedIdentity(identity_id));

    Ok(next.run(req).await)
}
