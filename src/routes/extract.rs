//! # 요청 본문/쿼리 추출기
//!
//! axum 기본 `Json`/`Query`는 형식이 틀린 요청에 422 또는 400 평문을 돌려줍니다.
//! 여기 래퍼는 거부 사유를 `AppError::InvalidInput`으로 바꿔서
//! 다른 에러와 같은 `{ "error": { code, message } }` 형태로 응답합니다.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON 본문. 파싱 실패는 400 `invalid_input`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// 쿼리 문자열. 파싱 실패는 400 `invalid_input`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
