use crate::error::AppError;
use crate::models::{DocumentVersion, DocumentVersionSummary};
use sqlx::SqlitePool;

/// 문서의 현재 내용을 `version_number = documents.version`으로 기록하고
/// 문서의 version을 1 올립니다. 두 작업은 한 트랜잭션으로 실행됩니다.
///
/// version을 먼저 올리고(`RETURNING`) 올리기 전 값을 번호로 씁니다.
/// 첫 문장이 쓰기라서 트랜잭션이 시작부터 쓰기 잠금을 잡으므로,
/// 동시에 들어온 스냅샷이 같은 번호를 읽는 일이 없습니다.
///
/// # 반환값
/// - `Ok(None)`: 해당 ID의 문서가 없음
pub async fn create_snapshot(
    pool: &SqlitePool,
    document_id: &str,
    created_by: &str,
) -> Result<Option<DocumentVersion>, AppError> {
    let mut tx = pool.begin().await?;

    let current: Option<(String, i64)> = sqlx::query_as(
        "UPDATE documents SET version = version + 1 WHERE id = ? RETURNING content, version - 1",
    )
    .bind(document_id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some((content, version_number)) = current else {
        return Ok(None);
    };

    let id = super::new_id();
    sqlx::query(
        r#"
        INSERT INTO document_versions (id, document_id, content, version_number, created_by,
                                       created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(document_id)
    .bind(&content)
    .bind(version_number)
    .bind(created_by)
    .bind(super::now())
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    get_version(pool, &id).await
}

pub async fn list_versions(
    pool: &SqlitePool,
    document_id: &str,
) -> Result<Vec<DocumentVersionSummary>, AppError> {
    let versions = sqlx::query_as::<_, DocumentVersionSummary>(
        r#"
        SELECT id, document_id, version_number, created_by, created_at
        FROM document_versions
        WHERE document_id = ?
        ORDER BY version_number DESC
        "#,
    )
    .bind(document_id)
    .fetch_all(pool)
    .await?;

    Ok(versions)
}

pub async fn get_version(
    pool: &SqlitePool,
    version_id: &str,
) -> Result<Option<DocumentVersion>, AppError> {
    let version = sqlx::query_as::<_, DocumentVersion>(
        r#"
        SELECT id, document_id, content, version_number, created_by, created_at
        FROM document_versions
        WHERE id = ?
        "#,
    )
    .bind(version_id)
    .fetch_optional(pool)
    .await?;

    Ok(version)
}
