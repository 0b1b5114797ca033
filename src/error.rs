//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//!
//! 접근 제어 엔진의 에러 분류:
//! - `NotFound`: 대상 엔티티가 없음
//! - `AuthenticationRequired`: 인증된 사용자(actor)가 없음
//! - `AccessDenied`: 사용자는 확인됐지만 권한이 부족함
//! - `InvalidInput`: 잘못된 요청 본문 (필수 필드 누락, 잘못된 enum 값, 짧은 비밀번호)
//! - `Database`: 저장소 실패 (연결 끊김, 제약 조건 위반). 내용은 로그에만 남김
//!
//! 읽기 경로는 `RequestScope::readable()`이 권한 없음과 없음을 모두 `NotFound`로
//! 돌려주므로 비공개 문서의 존재 여부가 드러나지 않습니다.
//!
//! 본문/쿼리 파싱 실패(`JsonRejection`, `QueryRejection`)도 `InvalidInput`으로 바뀝니다.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 리소스를 찾을 수 없음 (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// 인증 정보 없이 보호된 작업을 요청함 (HTTP 401)
    #[error("Authentication required")]
    AuthenticationRequired,

    /// 인증은 됐지만 권한이 부족함 (HTTP 403)
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// 잘못된 요청 (HTTP 400)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// 리소스 충돌 (HTTP 409): 중복 협업자, 이미 사용 중인 이메일
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// #[from]: sqlx 함수의 에러에 `?`를 쓰면 자동으로 이 variant로 변환됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    pub fn access_denied(message: impl Into<String>) -> Self {
        AppError::AccessDenied(message.into())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        AppError::InvalidInput(message.into())
    }

    /// 제약 조건 위반 중 UNIQUE 위반인지 확인합니다.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            AppError::Database(sqlx::Error::Database(e)) => e.is_unique_violation(),
            _ => false,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러(Database, Internal)는 실제 에러 내용을 로그에만 기록하고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            AppError::AuthenticationRequired => (
                StatusCode::UNAUTHORIZED,
                "authentication_required",
                self.to_string(),
            ),
            AppError::AccessDenied(ref msg) => {
                (StatusCode::FORBIDDEN, "access_denied", msg.clone())
            }
            AppError::InvalidInput(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_input", msg.clone())
            }
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                )
            }
        };

        // 결과: { "error": { "code": "not_found", "message": "Resource not found" } }
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
