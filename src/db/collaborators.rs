//! # 협업자 데이터베이스 쿼리 모듈
//!
//! `document_collaborators` 테이블: (document_id, user_id) 쌍마다 권한 한 개.
//! 중복 추가는 UNIQUE 제약이 막습니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

/// 사용자의 협업자 권한만 조회합니다. 접근 판정기가 직접 호출하는 쿼리입니다.
///
/// 행이 없는 것은 정상적인 결과이므로 에러가 아니라 `None`입니다.
pub async fn find_permission(
    pool: &SqlitePool,
    document_id: &str,
    user_id: &str,
) -> Result<Option<Permission>, AppError> {
    let permission = sqlx::query_scalar::<_, Permission>(
        "SELECT permission FROM document_collaborators WHERE document_id = ? AND user_id = ?",
    )
    .bind(document_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(permission)
}

pub async fn get_collaborator(
    pool: &SqlitePool,
    document_id: &str,
    user_id: &str,
) -> Result<Option<Collaborator>, AppError> {
    let collaborator = sqlx::query_as::<_, Collaborator>(
        r#"
        SELECT id, document_id, user_id, permission, created_at
        FROM document_collaborators
        WHERE document_id = ? AND user_id = ?
        "#,
    )
    .bind(document_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(collaborator)
}

/// 문서의 협업자 목록을 사용자 정보와 함께 추가된 순서로 조회합니다.
pub async fn list_collaborators(
    pool: &SqlitePool,
    document_id: &str,
) -> Result<Vec<CollaboratorView>, AppError> {
    let rows = sqlx::query_as::<_, CollaboratorRow>(
        r#"
        SELECT c.id, c.document_id, c.user_id, c.permission, c.created_at,
               u.name AS user_name, u.email AS user_email, u.avatar_url AS user_avatar_url
        FROM document_collaborators c
        JOIN users u ON u.id = c.user_id
        WHERE c.document_id = ?
        ORDER BY c.created_at, c.id
        "#,
    )
    .bind(document_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(CollaboratorView::from).collect())
}

pub async fn add_collaborator(
    pool: &SqlitePool,
    document_id: &str,
    user_id: &str,
    permission: Permission,
) -> Result<Collaborator, AppError> {
    let id = super::new_id();

    sqlx::query(
        r#"
        INSERT INTO document_collaborators (id, document_id, user_id, permission, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(document_id)
    .bind(user_id)
    .bind(permission)
    .bind(super::now())
    .execute(pool)
    .await?;

    get_collaborator(pool, document_id, user_id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created collaborator".to_string()))
}

/// # 반환값
/// - `Ok(None)`: 해당 사용자는 이 문서의 협업자가 아님
pub async fn update_permission(
    pool: &SqlitePool,
    document_id: &str,
    user_id: &str,
    permission: Permission,
) -> Result<Option<Collaborator>, AppError> {
    let result = sqlx::query(
        "UPDATE document_collaborators SET permission = ? WHERE document_id = ? AND user_id = ?",
    )
    .bind(permission)
    .bind(document_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_collaborator(pool, document_id, user_id).await
}

pub async fn remove_collaborator(
    pool: &SqlitePool,
    document_id: &str,
    user_id: &str,
) -> Result<bool, AppError> {
    let result =
        sqlx::query("DELETE FROM document_collaborators WHERE document_id = ? AND user_id = ?")
            .bind(document_id)
            .bind(user_id)
            .execute(pool)
            .await?;

    Ok(result.rows_affected() > 0)
}
