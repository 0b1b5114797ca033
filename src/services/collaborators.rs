//! # 협업자 관리
//!
//! 추가/권한 변경/제거는 작성자 또는 `admin` 협업자만 할 수 있습니다.
//! 예외로 협업자는 언제든 자기 자신을 제거(탈퇴)할 수 있습니다.
//! `admin` 협업자도 문서 삭제와 공유 설정 변경은 할 수 없습니다.

use sqlx::SqlitePool;
use tracing::info;

use crate::{
    db,
    error::AppError,
    models::*,
    services::{access::RequestScope, guard},
};

/// 협업자 목록 (읽기 경로)
pub async fn list(
    scope: &mut RequestScope<'_>,
    document_id: &str,
) -> Result<Vec<CollaboratorView>, AppError> {
    scope.readable(document_id).await?;
    db::collaborators::list_collaborators(scope.pool(), document_id).await
}

fn parse_permission(value: Option<&str>, default: Option<Permission>) -> Result<Permission, AppError> {
    match value {
        Some(value) => value.parse().map_err(AppError::InvalidInput),
        None => default.ok_or_else(|| AppError::invalid_input("permission is required")),
    }
}

/// 협업자 추가. 권한을 생략하면 `read`.
pub async fn add(
    pool: &SqlitePool,
    document_id: &str,
    actor: Option<&str>,
    req: &AddCollaboratorRequest,
) -> Result<Collaborator, AppError> {
    let actor_id = guard::require_actor(actor)?;
    let user_id = req
        .user_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::invalid_input("user_id is required"))?;
    let permission = parse_permission(req.permission.as_deref(), Some(Permission::Read))?;

    let document = guard::require_collaborator_manager(pool, document_id, actor_id).await?;

    if document.author_id == user_id {
        return Err(AppError::invalid_input(
            "The document author cannot be added as a collaborator",
        ));
    }
    if db::users::find_by_id(pool, user_id).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let collaborator = db::collaborators::add_collaborator(pool, document_id, user_id, permission)
        .await
        .map_err(|e| {
            if e.is_unique_violation() {
                AppError::Conflict("User is already a collaborator on this document".to_string())
            } else {
                e
            }
        })?;

    info!(
        document_id,
        actor_id,
        collaborator_id = user_id,
        permission = %permission,
        "collaborator added"
    );

    Ok(collaborator)
}

/// 협업자 권한 변경
pub async fn update_permission(
    pool: &SqlitePool,
    document_id: &str,
    user_id: &str,
    actor: Option<&str>,
    req: &UpdateCollaboratorRequest,
) -> Result<Collaborator, AppError> {
    let actor_id = guard::require_actor(actor)?;
    let permission = parse_permission(req.permission.as_deref(), None)?;

    guard::require_collaborator_manager(pool, document_id, actor_id).await?;

    let collaborator = db::collaborators::update_permission(pool, document_id, user_id, permission)
        .await?
        .ok_or(AppError::NotFound)?;

    info!(
        document_id,
        actor_id,
        collaborator_id = user_id,
        permission = %permission,
        "collaborator permission changed"
    );

    Ok(collaborator)
}

/// 협업자 제거. 자기 자신은 권한과 무관하게 제거할 수 있습니다.
pub async fn remove(
    pool: &SqlitePool,
    document_id: &str,
    user_id: &str,
    actor: Option<&str>,
) -> Result<(), AppError> {
    let actor_id = guard::require_actor(actor)?;

    if user_id == actor_id {
        if db::get_document(pool, document_id).await?.is_none() {
            return Err(AppError::NotFound);
        }
    } else {
        guard::require_collaborator_manager(pool, document_id, actor_id).await?;
    }

    if !db::collaborators::remove_collaborator(pool, document_id, user_id).await? {
        return Err(AppError::NotFound);
    }

    info!(document_id, actor_id, collaborator_id = user_id, "collaborator removed");
    Ok(())
}
