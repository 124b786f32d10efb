use axum::extract::State;

use crate::database::models::DataRecord;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /user/data (any role) and GET /admin/data (admin) - all records
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<DataRecord>> {
    let records = state.repo.list_data().await?;
    tracing::debug!(count = records.len(), "Listed data records");
    Ok(ApiResponse::success(records))
}
