//! # 사용자 핸들러
//!
//! - `GET /api/v1/users/me` → 내 프로필 (프로비저닝 전이면 404)
//! - `PUT /api/v1/users/me` → 내 계정 생성 또는 갱신

use axum::{extract::State, Json};
use serde_json::{json, Value};

use super::{documents::AppState, extract::AppJson};
use crate::{error::AppError, middleware::auth::Actor, models::ProvisionUserRequest, services};

pub async fn me(State(state): State<AppState>, actor: Actor) -> Result<Json<Value>, AppError> {
    let user = services::users::me(&state.pool, actor.id()).await?;
    Ok(Json(json!({ "user": user })))
}

pub async fn provision_me(
    State(state): State<AppState>,
    actor: Actor,
    AppJson(req): AppJson<ProvisionUserRequest>,
) -> Result<Json<Value>, AppError> {
    let user = services::users::provision(&state.pool, actor.id(), &req).await?;
    Ok(Json(json!({ "user": user })))
}
