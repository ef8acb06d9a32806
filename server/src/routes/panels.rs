//! Panel REST routes.
//!
//! Bodies are taken as raw JSON and decoded here so malformed panels come
//! back as `400` with a readable message instead of Axum's default rejection.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use panels::{Panel, PanelKey, PanelWrites};
use serde_json::Value;

use super::auth::AuthUser;
use super::error::ApiError;
use crate::services::panels as panel_svc;
use crate::state::AppState;

fn bad_request(e: impl std::fmt::Display) -> ApiError {
    ApiError::BadRequest(e.to_string())
}

/// `GET /api/panels`: current panels subtree, `null` when empty.
pub async fn list_panels(State(state): State<AppState>, _auth: AuthUser) -> Result<Json<Value>, ApiError> {
    Ok(Json(panel_svc::snapshot(state.store.as_ref()).await?))
}

/// `PUT /api/panels/{key}`: replace one panel.
pub async fn put_panel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(key): Path<String>,
    Json(body): Json<Value>,
) -> Result<StatusCode, ApiError> {
    let key: PanelKey = key.parse().map_err(bad_request)?;
    let panel: Panel = serde_json::from_value(body).map_err(bad_request)?;
    panel_svc::write_panel(state.store.as_ref(), key, panel).await?;
    tracing::debug!(account_id = %auth.account.id, %key, "panel written");
    Ok(StatusCode::NO_CONTENT)
}

/// `PATCH /api/panels`: replace several panels in one atomic write.
pub async fn patch_panels(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<Value>,
) -> Result<StatusCode, ApiError> {
    let writes: PanelWrites = serde_json::from_value(body).map_err(bad_request)?;
    if writes.is_empty() {
        return Err(ApiError::BadRequest("no panels to write".into()));
    }
    panel_svc::write_panels(state.store.as_ref(), &writes).await?;
    tracing::debug!(account_id = %auth.account.id, count = writes.len(), "panels written");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "panels_test.rs"]
mod tests;
