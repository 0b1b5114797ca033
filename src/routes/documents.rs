//! # 문서(Document) 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET    /api/v1/documents`         → 내 문서 목록 (최근 수정순)
//! - `POST   /api/v1/documents`         → 새 문서 생성 (201)
//! - `GET    /api/v1/documents/public`  → 최근 공개 문서 (`?limit=`, 기본 10, 최대 100)
//! - `GET    /api/v1/documents/{id}`    → 단일 문서 조회
//! - `PUT    /api/v1/documents/{id}`    → 문서 수정 (보낸 필드만)
//! - `DELETE /api/v1/documents/{id}`    → 문서 삭제 (작성자만)
//!
//! 핸들러는 요청에서 값을 꺼내 `services::documents`에 넘기고, 결과를 JSON으로
//! 감싸기만 합니다. 권한 규칙은 핸들러에 두지 않습니다.

use crate::{
    error::AppError,
    middleware::auth::Actor,
    models::*,
    services::{self, access::RequestScope, password::PasswordHasher},
};
use super::extract::{AppJson, AppQuery};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// 저장소 클라이언트(연결 풀)는 `main`에서 한 번 만들어 여기로 주입합니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀 (내부적으로 Arc로 공유)
    pub pool: SqlitePool,
    /// Bearer 토큰 검증용 비밀키
    pub jwt_secret: String,
    /// 공유 비밀번호 해셔
    pub hasher: PasswordHasher,
}

/// `GET /documents` → `{ "documents": [...] }`
pub async fn list_documents(
    State(state): State<AppState>,
    actor: Actor,
) -> Result<Json<Value>, AppError> {
    let documents = services::documents::list_own(&state.pool, actor.id()).await?;
    Ok(Json(json!({ "documents": documents })))
}

/// `GET /documents/public?limit=10`
pub async fn list_public_documents(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PublicDocumentsQuery>,
) -> Result<Json<Value>, AppError> {
    let documents = services::documents::list_public(&state.pool, query.limit).await?;
    Ok(Json(json!({ "documents": documents })))
}

/// `GET /documents/{id}` → `{ "document": {..., "author", "permission"} }`
///
/// 없는 문서와 볼 권한이 없는 문서는 똑같이 404입니다.
pub async fn get_document(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let mut scope = RequestScope::new(&state.pool, actor.id());
    let document = services::documents::get_document(&mut scope, &id).await?;
    Ok(Json(json!({ "document": document })))
}

/// `POST /documents` → 201 `{ "document": ... }`
pub async fn create_document(
    State(state): State<AppState>,
    actor: Actor,
    AppJson(req): AppJson<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let document =
        services::documents::create(&state.pool, &state.hasher, actor.id(), &req).await?;
    Ok((StatusCode::CREATED, Json(json!({ "document": document }))))
}

/// `PUT /documents/{id}` → `{ "document": ... }`
pub async fn update_document(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
    AppJson(req): AppJson<UpdateDocumentRequest>,
) -> Result<Json<Value>, AppError> {
    let document =
        services::documents::update(&state.pool, &state.hasher, &id, actor.id(), &req).await?;
    Ok(Json(json!({ "document": document })))
}

/// `DELETE /documents/{id}` → `{ "success": true }`
pub async fn delete_document(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    services::documents::delete(&state.pool, &id, actor.id()).await?;
    Ok(Json(json!({ "success": true })))
}
