//! # 댓글 핸들러
//!
//! - `GET    /api/v1/documents/{id}/comments` → 오래된 순, 작성자 정보 포함
//! - `POST   /api/v1/documents/{id}/comments` → 201
//! - `PUT    /api/v1/comments/{id}`
//! - `DELETE /api/v1/comments/{id}`

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use super::{documents::AppState, extract::AppJson};
use crate::{
    error::AppError,
    middleware::auth::Actor,
    models::{CreateCommentRequest, UpdateCommentRequest},
    services::{self, access::RequestScope},
};

pub async fn list_comments(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let mut scope = RequestScope::new(&state.pool, actor.id());
    let comments = services::comments::list(&mut scope, &id).await?;
    Ok(Json(json!({ "comments": comments })))
}

pub async fn create_comment(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
    AppJson(req): AppJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let comment = services::comments::create(&state.pool, &id, actor.id(), &req).await?;
    Ok((StatusCode::CREATED, Json(json!({ "comment": comment }))))
}

pub async fn update_comment(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
    AppJson(req): AppJson<UpdateCommentRequest>,
) -> Result<Json<Value>, AppError> {
    let comment = services::comments::update(&state.pool, &id, actor.id(), &req).await?;
    Ok(Json(json!({ "comment": comment })))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    services::comments::delete(&state.pool, &id, actor.id()).await?;
    Ok(Json(json!({ "success": true })))
}
