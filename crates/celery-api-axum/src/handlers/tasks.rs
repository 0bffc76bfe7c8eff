//! Task submission handler.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use celery_api_core::{TaskRequest, TaskResult};
use tracing::{info, warn};

use crate::error::HttpError;
use crate::state::AppState;

/// Publish a Celery task.
///
/// The body is decoded as JSON whatever `Content-Type` the client sent.
/// A broker failure is a `200` with `{"Status": "failure"}`.
pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TaskResult>, HttpError> {
    info!("Received a task");

    let request: TaskRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "Error reading task payload");
        HttpError::BadRequest(format!("Invalid task payload: {e}"))
    })?;

    Ok(Json(state.tasks.submit(request).await?))
}
