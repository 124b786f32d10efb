use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::{Claims, TokenError};
use crate::database::models::Role;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated identity extracted from the JWT
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i32,
    pub role: Role,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            role: claims.role,
        }
    }
}

/// Why a request carried no usable credential
#[derive(Debug, PartialEq, Eq)]
enum CredentialError {
    Missing,
    Malformed,
}

/// JWT authentication middleware that validates tokens and extracts user context.
///
/// Identity comes from the claims alone; the user row is not re-read, so a
/// role change takes effect at the next login.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = match extract_token(request.headers()) {
        Ok(token) => token,
        Err(CredentialError::Missing) => {
            tracing::debug!(path = %request.uri().path(), "Request without Authorization header");
            return Err(ApiError::forbidden("Access denied"));
        }
        Err(CredentialError::Malformed) => {
            return Err(TokenError::Invalid("malformed Authorization header".into()).into());
        }
    };

    let claims = state.tokens.verify(token).map_err(|e| {
        tracing::warn!(path = %request.uri().path(), "Token verification failed: {}", e);
        ApiError::from(e)
    })?;

    // Convert claims to AuthUser and inject into request
    let auth_user = AuthUser::from(claims);
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Extract the token from the Authorization header. Accepts both
/// `Bearer <token>` and a bare token.
fn extract_token(headers: &HeaderMap) -> Result<&str, CredentialError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or(CredentialError::Missing)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| CredentialError::Malformed)?;

    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str).trim();
    if token.is_empty() {
        return Err(CredentialError::Malformed);
    }
    Ok(token)
}
