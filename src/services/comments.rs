//! # 댓글 작업
//!
//! - 작성: 문서를 읽을 수 있고 계정이 있으면 누구나 (read 권한으로 충분)
//! - 수정: 댓글 작성자만
//! - 삭제: 댓글 작성자, 또는 문서 작성자 (모더레이션)

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::{
    db,
    error::AppError,
    models::*,
    services::{access::RequestScope, guard},
};

pub async fn list(
    scope: &mut RequestScope<'_>,
    document_id: &str,
) -> Result<Vec<CommentView>, AppError> {
    scope.readable(document_id).await?;
    db::comments::list_comments(scope.pool(), document_id).await
}

fn require_content(content: Option<&str>) -> Result<&str, AppError> {
    content
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| AppError::invalid_input("Comment content is required"))
}

/// 댓글 작성. 답글이면 부모 댓글이 같은 문서에 있어야 합니다.
pub async fn create(
    pool: &SqlitePool,
    document_id: &str,
    actor: Option<&str>,
    req: &CreateCommentRequest,
) -> Result<Comment, AppError> {
    let actor_id = guard::require_actor(actor)?;
    let content = require_content(req.content.as_deref())?;

    guard::require_readable(pool, document_id, actor_id).await?;
    guard::require_provisioned(pool, actor_id).await?;

    let parent_id = req.parent_comment_id.as_deref();
    if let Some(parent_id) = parent_id {
        let parent = db::comments::get_comment(pool, parent_id).await?;
        if !matches!(parent, Some(p) if p.document_id == document_id) {
            return Err(AppError::invalid_input(
                "Parent comment must belong to the same document",
            ));
        }
    }

    let comment = db::comments::create_comment(
        pool,
        document_id,
        actor_id,
        content,
        parent_id,
        req.position.as_ref(),
    )
    .await?;

    info!(document_id, actor_id, comment_id = %comment.id, "comment created");
    Ok(comment)
}

pub async fn update(
    pool: &SqlitePool,
    comment_id: &str,
    actor: Option<&str>,
    req: &UpdateCommentRequest,
) -> Result<Comment, AppError> {
    let actor_id = guard::require_actor(actor)?;
    let content = require_content(req.content.as_deref())?;

    let comment = db::comments::get_comment(pool, comment_id)
        .await?
        .ok_or(AppError::NotFound)?;

    if comment.user_id != actor_id {
        warn!(comment_id, actor_id, "comment edit by non-author denied");
        return Err(AppError::access_denied("Only the comment author can edit it"));
    }

    let updated = db::comments::update_comment(pool, comment_id, content)
        .await?
        .ok_or(AppError::NotFound)?;

    info!(document_id = %updated.document_id, actor_id, comment_id, "comment updated");
    Ok(updated)
}

/// 댓글 삭제. 답글도 함께 삭제됩니다.
pub async fn delete(pool: &SqlitePool, comment_id: &str, actor: Option<&str>) -> Result<(), AppError> {
    let actor_id = guard::require_actor(actor)?;

    let comment = db::comments::get_comment(pool, comment_id)
        .await?
        .ok_or(AppError::NotFound)?;

    if comment.user_id != actor_id {
        let document_author = db::get_document(pool, &comment.document_id)
            .await?
            .map(|d| d.author_id);

        if document_author.as_deref() != Some(actor_id) {
            warn!(comment_id, actor_id, "comment delete denied");
            return Err(AppError::access_denied(
                "Only the comment author or the document author can delete it",
            ));
        }
    }

    if !db::comments::delete_comment(pool, comment_id).await? {
        return Err(AppError::NotFound);
    }

    info!(document_id = %comment.document_id, actor_id, comment_id, "comment deleted");
    Ok(())
}
