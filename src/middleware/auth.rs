use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use thiserror::Error;

use crate::app::AppState;
use crate::auth::{parse_basic_header, verify_password, CredentialError};
use crate::database::{DatabaseError, Store, User};
use crate::error::ApiError;

/// Authenticated user attached to the request for protected handlers
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

/// Why the guard refused a request.
///
/// `Unauthorized` covers malformed credentials, unknown users and wrong
/// passwords alike so responses cannot be used to probe for usernames.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Unauthorized request")]
    Unauthorized,

    #[error("credential lookup failed: {0}")]
    Store(#[from] DatabaseError),
}

/// Resolve the user named by the request's Basic credentials.
///
/// Performs at most one store lookup and one hash verification. Both finish
/// before this returns, so handler logic never overlaps authentication.
pub async fn authenticate(store: &dyn Store, headers: &HeaderMap) -> Result<User, AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::MissingToken)?;

    let credentials = parse_basic_header(header).map_err(|e| match e {
        CredentialError::NotBasic => AuthError::MissingToken,
        CredentialError::Malformed => {
            tracing::warn!("Rejected malformed Basic credentials");
            AuthError::Unauthorized
        }
    })?;

    let Some(user) = store.user_by_name(&credentials.user_name).await? else {
        tracing::warn!("Authentication failed: unknown user '{}'", credentials.user_name);
        return Err(AuthError::Unauthorized);
    };

    // bcrypt is CPU-bound; keep it off the async workers
    let password = credentials.password;
    let hash = user.password_hash.clone();
    let verified = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| {
            tracing::error!("Password verification task failed: {}", e);
            AuthError::Unauthorized
        })?;

    match verified {
        Ok(true) => {
            tracing::debug!("Authenticated user '{}' (id {})", user.user_name, user.id);
            Ok(user)
        }
        Ok(false) => {
            tracing::warn!("Authentication failed: wrong password for '{}'", user.user_name);
            Err(AuthError::Unauthorized)
        }
        Err(e) => {
            tracing::error!("Stored hash for user {} is unusable: {}", user.id, e);
            Err(AuthError::Unauthorized)
        }
    }
}

/// Basic authentication middleware; rejects with 401 or injects [`AuthUser`]
pub async fn basic_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = authenticate(state.store.as_ref(), request.headers()).await?;
    request.extensions_mut().insert(AuthUser(user));
    Ok(next.run(request).await)
}
