//! # mdshare
//!
//! 마크다운 문서 공유 서비스의 백엔드입니다. 핵심은 문서 접근 제어 엔진입니다.
//!
//! 요청 흐름:
//! 요청자 식별(`middleware::auth`) → 접근 판정(`services::access`)
//! → 변경 가드(`services::guard`) → 저장소(`db`)
//! 공개 범위 변경은 저장 전에 `services::sharing`을 한 번 더 거칩니다.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
