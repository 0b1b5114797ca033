use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use super::documents::AppState;
use crate::{
    error::AppError,
    middleware::auth::Actor,
    services::{self, access::RequestScope},
};

/// `GET /documents/{id}/versions` → 최신 버전부터, 내용 없이 요약만
pub async fn list_document_versions(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let mut scope = RequestScope::new(&state.pool, actor.id());
    let versions = services::versions::list(&mut scope, &id).await?;
    Ok(Json(json!({ "versions": versions })))
}

/// `GET /versions/{id}`
pub async fn get_version(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let mut scope = RequestScope::new(&state.pool, actor.id());
    let version = services::versions::get(&mut scope, &id).await?;
    Ok(Json(json!({ "version": version })))
}

/// `POST /documents/{id}/versions`: 현재 내용을 스냅샷으로 남기고 문서 version을 올린다.
pub async fn create_version_snapshot(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let version = services::versions::snapshot(&state.pool, &id, actor.id()).await?;
    Ok((StatusCode::CREATED, Json(json!({ "version": version }))))
}
