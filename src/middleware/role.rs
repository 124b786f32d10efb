use axum::{extract::Request, middleware::Next, response::Response};

use crate::error::ApiError;

use super::auth::AuthUser;

/// Admit only admins. Must run after `jwt_auth_middleware`.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .copied()
        .ok_or_else(|| {
            tracing::error!("Role gate reached without an authenticated user");
            ApiError::forbidden("Access denied")
        })?;

    if !auth_user.role.is_admin() {
        tracing::warn!(
            user_id = auth_user.id,
            role = %auth_user.role,
            path = %request.uri().path(),
            "Non-admin denied"
        );
        return Err(ApiError::forbidden("Unauthorized"));
    }

    Ok(next.run(request).await)
}
