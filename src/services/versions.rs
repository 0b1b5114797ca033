//! # 버전 스냅샷
//!
//! 현재 내용을 `version_number = documents.version`으로 기록하고 문서의 version을
//! 1 올립니다. 편집할 때 자동으로 만들지 않고, 편집 권한자가 명시적으로 요청할 때만
//! 만듭니다. 스냅샷은 수정/삭제되지 않습니다 (문서 삭제 시 cascade만).

use sqlx::SqlitePool;
use tracing::info;

use crate::{
    db,
    error::AppError,
    models::*,
    services::{access::RequestScope, guard},
};

pub async fn list(
    scope: &mut RequestScope<'_>,
    document_id: &str,
) -> Result<Vec<DocumentVersionSummary>, AppError> {
    scope.readable(document_id).await?;
    db::versions::list_versions(scope.pool(), document_id).await
}

/// 단일 버전 조회. 버전이 속한 문서를 읽을 수 있어야 합니다.
pub async fn get(scope: &mut RequestScope<'_>, version_id: &str) -> Result<DocumentVersion, AppError> {
    let version = db::versions::get_version(scope.pool(), version_id)
        .await?
        .ok_or(AppError::NotFound)?;

    scope.readable(&version.document_id).await?;
    Ok(version)
}

pub async fn snapshot(
    pool: &SqlitePool,
    document_id: &str,
    actor: Option<&str>,
) -> Result<DocumentVersion, AppError> {
    let actor_id = guard::require_actor(actor)?;
    guard::require_editor(pool, document_id, actor_id).await?;

    let version = db::versions::create_snapshot(pool, document_id, actor_id)
        .await?
        .ok_or(AppError::NotFound)?;

    info!(
        document_id,
        actor_id,
        version_number = version.version_number,
        "version snapshot created"
    );

    Ok(version)
}
