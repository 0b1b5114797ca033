//! # 데이터베이스 접근 계층 (Entity Store Adapter)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 이 계층에는 권한 규칙이 없습니다. 순수한 CRUD와 조회만 담당하고,
//! 누가 무엇을 할 수 있는지는 `services/`가 결정합니다.
//!
//! 각 하위 모듈:
//! - `documents`: 문서 CRUD와 공유 상태 저장
//! - `collaborators`: 협업자 권한 행
//! - `comments`: 댓글과 답글
//! - `users`: 사용자 프로필
//! - `versions`: 버전 스냅샷 (append-only)

pub mod collaborators;
pub mod comments;
pub mod documents;
pub mod users;
pub mod versions;

pub use documents::*;

use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// SQLite 연결 풀을 생성합니다. 외래키 제약(cascade 삭제)은 항상 켭니다.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// ./migrations 폴더의 SQL 파일을 실행합니다 (컴파일 타임에 포함됨).
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// 저장용 타임스탬프 (UTC, 밀리초, 예: "2026-02-16T12:00:00.000Z")
pub fn now() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// 새 엔티티 ID (UUIDv7, 생성 순서대로 정렬됨)
pub fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}
