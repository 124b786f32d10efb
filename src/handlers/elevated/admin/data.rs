use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::{DataRecord, NewDataRecord};
use crate::error::ApiError;
use crate::handlers::validation::RequiredFields;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DataPayload {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl DataPayload {
    fn into_record(self) -> Result<NewDataRecord, ApiError> {
        let mut fields = RequiredFields::new();
        let title = fields.take("title", self.title);
        let description = fields.take("description", self.description);
        fields.finish("Title and description are required")?;
        Ok(NewDataRecord { title, description })
    }
}

fn data_not_found() -> ApiError {
    ApiError::not_found("Data not found")
}

/// Ids are SERIAL integers; anything else cannot name a row.
fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse().map_err(|_| data_not_found())
}

/// POST /admin/data - Create a record
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<DataPayload>, JsonRejection>,
) -> ApiResult<DataRecord> {
    let Json(payload) = payload?;
    let record = payload.into_record()?;

    let created = state.repo.create_data(record).await?;
    tracing::info!(user_id = user.id, record_id = created.id, "Created data record");

    Ok(ApiResponse::created(created))
}

/// PUT /admin/data/:id - Replace title and description
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<DataPayload>, JsonRejection>,
) -> ApiResult<DataRecord> {
    let Json(payload) = payload?;
    let record = payload.into_record()?;
    let id = parse_id(&id)?;

    let updated = state
        .repo
        .update_data(id, record)
        .await?
        .ok_or_else(data_not_found)?;
    tracing::info!(user_id = user.id, record_id = id, "Updated data record");

    Ok(ApiResponse::success(updated))
}

/// DELETE /admin/data/:id - Remove a record, echoing it back
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let id = parse_id(&id)?;

    let deleted = state
        .repo
        .delete_data(id)
        .await?
        .ok_or_else(data_not_found)?;
    tracing::info!(user_id = user.id, record_id = id, "Deleted data record");

    Ok(ApiResponse::success(json!({
        "message": "Data deleted",
        "deleted": deleted,
    })))
}
