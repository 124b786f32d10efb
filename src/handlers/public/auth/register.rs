// handlers/public/auth/register.rs - POST /register handler

use std::collections::HashMap;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::{NewUser, PublicUser, Role};
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::handlers::validation::RequiredFields;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// POST /register - Create a user account
///
/// Expected Input:
/// ```json
/// { "username": "ada", "email": "ada@example.com", "password": "pw", "role": "user" }
/// ```
///
/// Responds 201 with `{ "message": "User registered", "user": { id, username, email, role } }`.
/// The password hash never leaves the server.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(payload) = payload?;

    let mut fields = RequiredFields::new();
    let username = fields.take("username", payload.username);
    let email = fields.take("email", payload.email);
    let password = fields.take("password", payload.password);
    let role = fields.take("role", payload.role);
    fields.finish("All fields are required")?;

    let role: Role = role.parse().map_err(|_| {
        let mut field_errors = HashMap::new();
        field_errors.insert("role".to_string(), "Must be 'admin' or 'user'".to_string());
        ApiError::validation_error("Role must be 'admin' or 'user'", Some(field_errors))
    })?;

    let password_hash = state.hasher.hash(&password).await?;

    let user = state
        .repo
        .create_user(NewUser {
            username,
            email,
            password_hash,
            role,
        })
        .await
        .map_err(|e| {
            if matches!(e, DatabaseError::Conflict(_)) {
                tracing::info!("Registration rejected: email already registered");
            }
            ApiError::from(e)
        })?;

    tracing::info!(user_id = user.id, role = %user.role, "User registered");

    Ok(ApiResponse::created(json!({
        "message": "User registered",
        "user": PublicUser::from(&user),
    })))
}
