//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `document`: 문서, 공개 범위(Visibility), 공유 상태
//! - `collaborator`: 문서 협업자와 권한(Permission)
//! - `comment`: 댓글과 답글 스레드
//! - `user`: 사용자 프로필
//! - `version`: 문서 버전 스냅샷
//!
//! `pub use X::*;`로 재공개하여 `crate::models::Document`처럼 짧게 접근합니다.

pub mod collaborator;
pub mod comment;
pub mod document;
pub mod user;
pub mod version;

pub use collaborator::*;
pub use comment::*;
pub use document::*;
pub use user::*;
pub use version::*;
