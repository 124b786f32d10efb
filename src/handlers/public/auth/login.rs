// handlers/public/auth/login.rs - POST /login handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::Claims;
use crate::database::models::PublicUser;
use crate::error::ApiError;
use crate::handlers::validation::RequiredFields;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Same body for unknown email and wrong password.
fn invalid_credentials() -> ApiError {
    ApiError::unauthorized("Invalid email or password")
}

/**
 * POST /login - Authenticate and receive a JWT
 *
 * Expected Input:
 * ```json
 * { "email": "ada@example.com", "password": "pw" }
 * ```
 *
 * Expected Output (Success):
 * ```json
 * {
 *   "message": "Login successful",
 *   "user": { "id": 1, "username": "ada", "email": "ada@example.com", "role": "user" },
 *   "token": "eyJhbGciOiJIUzI1NiI..."
 * }
 * ```
 *
 * The token carries `{id, role}` and expires one hour after issue.
 */
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(payload) = payload?;

    let mut fields = RequiredFields::new();
    let email = fields.take("email", payload.email);
    let password = fields.take("password", payload.password);
    fields.finish("All fields are required")?;

    let user = match state.repo.find_user_by_email(&email).await? {
        Some(user) => user,
        None => {
            state.hasher.verify_decoy(&password).await?;
            tracing::debug!("Login failed: no account for email");
            return Err(invalid_credentials());
        }
    };

    if !state.hasher.verify(&password, &user.password_hash).await? {
        tracing::warn!(user_id = user.id, "Login failed: wrong password");
        return Err(invalid_credentials());
    }

    let token = state.tokens.issue(&Claims::new(user.id, user.role))?;

    tracing::info!(user_id = user.id, role = %user.role, "Login successful");

    Ok(ApiResponse::success(json!({
        "message": "Login successful",
        "user": PublicUser::from(&user),
        "token": token,
    })))
}
