//! # 문서 데이터베이스 쿼리 모듈
//!
//! `documents` 테이블에 대한 CRUD 쿼리 함수들입니다.
//! 모든 함수는 `async`이며 `SqlitePool`을 빌려서(&) 사용합니다.
//!
//! 공개 범위(visibility)와 비밀값(password_hash, access_token)은
//! 항상 `SharingState` 하나로 묶어서 함께 저장합니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

/// ID로 단일 문서를 조회합니다.
///
/// # 반환값
/// - `Ok(Some(Document))`: 문서를 찾은 경우
/// - `Ok(None)`: 해당 ID의 문서가 없는 경우
pub async fn get_document(pool: &SqlitePool, id: &str) -> Result<Option<Document>, AppError> {
    let doc = sqlx::query_as::<_, Document>(
        r#"
        SELECT id, title, content, author_id, visibility, password_hash, access_token,
               version, created_at, updated_at
        FROM documents
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(doc)
}

/// 작성자의 문서 목록을 최근 수정순으로 조회합니다.
pub async fn list_documents_by_author(
    pool: &SqlitePool,
    author_id: &str,
) -> Result<Vec<Document>, AppError> {
    let docs = sqlx::query_as::<_, Document>(
        r#"
        SELECT id, title, content, author_id, visibility, password_hash, access_token,
               version, created_at, updated_at
        FROM documents
        WHERE author_id = ?
        ORDER BY updated_at DESC, id DESC
        "#,
    )
    .bind(author_id)
    .fetch_all(pool)
    .await?;

    Ok(docs)
}

/// 최근 수정된 공개 문서를 최대 `limit`개 조회합니다.
pub async fn list_public_documents(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<Document>, AppError> {
    let docs = sqlx::query_as::<_, Document>(
        r#"
        SELECT id, title, content, author_id, visibility, password_hash, access_token,
               version, created_at, updated_at
        FROM documents
        WHERE visibility = 'public'
        ORDER BY updated_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(docs)
}

/// 공유 링크 토큰으로 문서를 찾습니다. 토큰은 UNIQUE 컬럼입니다.
pub async fn find_by_access_token(
    pool: &SqlitePool,
    token: &str,
) -> Result<Option<Document>, AppError> {
    let doc = sqlx::query_as::<_, Document>(
        r#"
        SELECT id, title, content, author_id, visibility, password_hash, access_token,
               version, created_at, updated_at
        FROM documents
        WHERE access_token = ?
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(doc)
}

/// 새 문서를 생성하고, 생성된 문서를 다시 조회하여 반환합니다.
pub async fn create_document(
    pool: &SqlitePool,
    id: &str,
    author_id: &str,
    title: &str,
    content: &str,
    sharing: &SharingState,
) -> Result<Document, AppError> {
    let now = super::now();

    sqlx::query(
        r#"
        INSERT INTO documents (id, title, content, author_id, visibility, password_hash,
                               access_token, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(content)
    .bind(author_id)
    .bind(sharing.visibility)
    .bind(&sharing.password_hash)
    .bind(&sharing.access_token)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await?;

    get_document(pool, id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created document".to_string()))
}

/// 문서 변경 사항. None인 필드는 그대로 둡니다.
#[derive(Debug, Default)]
pub struct DocumentChanges<'a> {
    pub title: Option<&'a str>,
    pub content: Option<&'a str>,
    pub sharing: Option<&'a SharingState>,
}

/// 문서를 수정합니다 (부분 업데이트). `updated_at`은 항상 갱신합니다.
///
/// 모든 변경은 UPDATE 문 하나로 실행되므로, 공개 범위와 비밀값이
/// 중간 상태로 저장되는 일은 없습니다. `version`은 건드리지 않습니다.
///
/// # 반환값
/// - `Ok(Some(Document))`: 수정 성공
/// - `Ok(None)`: 해당 ID의 문서가 없음
pub async fn update_document(
    pool: &SqlitePool,
    id: &str,
    changes: &DocumentChanges<'_>,
) -> Result<Option<Document>, AppError> {
    let now = super::now();

    // ── 동적 쿼리 구성 ──
    // 바인딩 값은 모두 문자열이거나 NULL이므로 Option<&str> 하나로 모읍니다.
    let mut query = String::from("UPDATE documents SET updated_at = ?");
    let mut bindings: Vec<Option<&str>> = vec![Some(now.as_str())];

    if let Some(title) = changes.title {
        query.push_str(", title = ?");
        bindings.push(Some(title));
    }

    if let Some(content) = changes.content {
        query.push_str(", content = ?");
        bindings.push(Some(content));
    }

    if let Some(sharing) = changes.sharing {
        query.push_str(", visibility = ?, password_hash = ?, access_token = ?");
        bindings.push(Some(sharing.visibility.as_str()));
        bindings.push(sharing.password_hash.as_deref());
        bindings.push(sharing.access_token.as_deref());
    }

    query.push_str(" WHERE id = ?");
    bindings.push(Some(id));

    let mut query_builder = sqlx::query(&query);
    for binding in bindings {
        query_builder = query_builder.bind(binding);
    }

    let result = query_builder.execute(pool).await?;
    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_document(pool, id).await
}

/// 문서를 삭제합니다. 협업자/댓글/버전은 외래키 cascade로 함께 삭제됩니다.
///
/// # 반환값
/// - `Ok(true)`: 삭제 성공
/// - `Ok(false)`: 해당 ID의 문서가 없음
pub async fn delete_document(pool: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM documents WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
