//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 라우터 구성을 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `documents`: 문서 CRUD 핸들러와 `AppState`
//! - `sharing`: 공유 설정 변경, 공유 링크 열기
//! - `collaborators`: 협업자 관리
//! - `comments`: 댓글
//! - `versions`: 버전 스냅샷
//! - `users`: 계정 프로비저닝
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `extract`: 에러 형식을 맞춘 JSON/쿼리 추출기

pub mod collaborators;
pub mod comments;
pub mod documents;
pub mod extract;
pub mod health;
pub mod sharing;
pub mod users;
pub mod versions;

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use documents::AppState;

/// `/api/v1` 아래에 붙는 API 라우트
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        // 문서 CRUD. `/documents/public`은 `{id}`보다 우선 매칭됩니다.
        .route(
            "/documents",
            get(documents::list_documents).post(documents::create_document),
        )
        .route("/documents/public", get(documents::list_public_documents))
        .route(
            "/documents/{id}",
            get(documents::get_document)
                .put(documents::update_document)
                .delete(documents::delete_document),
        )
        // 공유 설정과 공유 링크
        .route("/documents/{id}/share", put(sharing::share_document))
        .route("/shared/{token}", get(sharing::open_shared_document))
        // 협업자
        .route(
            "/documents/{id}/collaborators",
            get(collaborators::list_collaborators).post(collaborators::add_collaborator),
        )
        .route(
            "/documents/{id}/collaborators/{user_id}",
            put(collaborators::update_collaborator).delete(collaborators::remove_collaborator),
        )
        // 댓글
        .route(
            "/documents/{id}/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/comments/{id}",
            put(comments::update_comment).delete(comments::delete_comment),
        )
        // 버전 스냅샷
        .route(
            "/documents/{id}/versions",
            get(versions::list_document_versions).post(versions::create_version_snapshot),
        )
        .route("/versions/{id}", get(versions::get_version))
        // 계정
        .route("/users/me", get(users::me).put(users::provision_me))
        .route("/health", get(health::health_check))
        .with_state(state)
}

/// 전체 애플리케이션 라우터: `/api/v1` 중첩 + CORS + 요청 로깅
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/v1", api_routes(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
