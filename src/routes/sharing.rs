//! # 공유 설정 / 공유 링크 핸들러
//!
//! - `PUT /api/v1/documents/{id}/share` → 공개 범위 변경 (작성자만)
//! - `GET /api/v1/shared/{token}`       → 공유 링크로 문서 열기 (로그인 불필요)
//!
//! 비밀번호 보호 문서는 `x-document-password` 헤더로 비밀번호를 받습니다.
//! 비밀번호를 URL에 넣지 않습니다.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde_json::{json, Value};

use super::{documents::AppState, extract::AppJson};
use crate::{
    error::AppError,
    middleware::auth::Actor,
    models::{ShareRequest, SharingSummary},
    services,
};

pub const DOCUMENT_PASSWORD_HEADER: &str = "x-document-password";

/// 응답: `{ "document": { "id", "visibility", "access_token" } }`
pub async fn share_document(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
    AppJson(req): AppJson<ShareRequest>,
) -> Result<Json<Value>, AppError> {
    let document =
        services::sharing::apply_sharing(&state.pool, &state.hasher, &id, actor.id(), &req)
            .await?;
    Ok(Json(json!({ "document": SharingSummary::from(&document) })))
}

pub async fn open_shared_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(token): Path<String>,
) -> Result<Json<Value>, AppError> {
    let password = headers
        .get(DOCUMENT_PASSWORD_HEADER)
        .and_then(|value| value.to_str().ok());

    let mut document =
        services::sharing::open_shared_link(&state.pool, &state.hasher, &token, password).await?;
    // 링크로 들어온 방문자에게 토큰을 다시 돌려줄 필요는 없습니다.
    document.access_token = None;

    Ok(Json(json!({ "document": document })))
}
