//! # 미들웨어 모듈
//!
//! - `auth`: Bearer 토큰에서 요청자(actor) ID를 꺼내는 추출기

pub mod auth;
