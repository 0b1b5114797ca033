use crate::error::AppError;
use crate::models::*;
use sqlx::types::Json;
use sqlx::SqlitePool;

pub async fn get_comment(pool: &SqlitePool, id: &str) -> Result<Option<Comment>, AppError> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, document_id, user_id, content, parent_comment_id, position,
               created_at, updated_at
        FROM comments
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(comment)
}

/// 문서의 댓글을 작성자 정보와 함께 오래된 순으로 조회합니다.
/// 답글 트리는 클라이언트가 `parent_comment_id`로 조립합니다.
pub async fn list_comments(
    pool: &SqlitePool,
    document_id: &str,
) -> Result<Vec<CommentView>, AppError> {
    let rows = sqlx::query_as::<_, CommentRow>(
        r#"
        SELECT c.id, c.document_id, c.user_id, c.content, c.parent_comment_id, c.position,
               c.created_at, c.updated_at,
               u.name AS user_name, u.email AS user_email, u.avatar_url AS user_avatar_url
        FROM comments c
        JOIN users u ON u.id = c.user_id
        WHERE c.document_id = ?
        ORDER BY c.created_at, c.id
        "#,
    )
    .bind(document_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(CommentView::from).collect())
}

pub async fn create_comment(
    pool: &SqlitePool,
    document_id: &str,
    user_id: &str,
    content: &str,
    parent_comment_id: Option<&str>,
    position: Option<&CommentPosition>,
) -> Result<Comment, AppError> {
    let id = super::new_id();
    let now = super::now();

    sqlx::query(
        r#"
        INSERT INTO comments (id, document_id, user_id, content, parent_comment_id, position,
                              created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(document_id)
    .bind(user_id)
    .bind(content)
    .bind(parent_comment_id)
    .bind(position.map(Json))
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await?;

    get_comment(pool, &id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created comment".to_string()))
}

pub async fn update_comment(
    pool: &SqlitePool,
    id: &str,
    content: &str,
) -> Result<Option<Comment>, AppError> {
    let result = sqlx::query("UPDATE comments SET content = ?, updated_at = ? WHERE id = ?")
        .bind(content)
        .bind(super::now())
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_comment(pool, id).await
}

/// 댓글을 삭제합니다. 답글은 외래키 cascade로 함께 삭제됩니다.
pub async fn delete_comment(pool: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM comments WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
