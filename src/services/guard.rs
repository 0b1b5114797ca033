//! # 변경 가드 (Mutation Guard)
//!
//! 모든 생성/수정/삭제/공유 작업은 저장소에 위임하기 직전에 여기서 권한을 다시
//! 판정합니다. 판정 결과를 요청 사이에 재사용하지 않고, 같은 요청의
//! `RequestScope` 캐시도 보지 않습니다.
//!
//! 쓰기 경로에서는 세 가지 실패를 구분합니다.
//! - 요청자가 없음 → `AuthenticationRequired`
//! - 문서가 없음 → `NotFound`
//! - 권한 부족 → `AccessDenied`

use sqlx::SqlitePool;
use tracing::warn;

use crate::{
    db,
    error::AppError,
    models::{Document, Permission},
    services::access::{self, Resolution},
};

/// 인증된 요청자를 요구합니다.
pub fn require_actor(actor: Option<&str>) -> Result<&str, AppError> {
    actor.ok_or(AppError::AuthenticationRequired)
}

/// 요청자 계정이 `users`에 있어야 합니다. 새 행의 작성자가 되는 작업 전에 호출합니다.
///
/// 토큰은 유효하지만 `PUT /users/me`를 거치지 않은 요청자는 `AuthenticationRequired`.
pub async fn require_provisioned(pool: &SqlitePool, actor_id: &str) -> Result<(), AppError> {
    if db::users::find_by_id(pool, actor_id).await?.is_none() {
        warn!(actor_id, "actor has no account; PUT /users/me first");
        return Err(AppError::AuthenticationRequired);
    }
    Ok(())
}

/// 판정 결과에서 문서를 꺼냅니다. 문서가 없으면 `NotFound`.
fn require_document(resolution: Resolution) -> Result<(Document, Option<Permission>), AppError> {
    let permission = resolution
        .access
        .can_access
        .then_some(resolution.access.permission)
        .flatten();
    let document = resolution.document.ok_or(AppError::NotFound)?;
    Ok((document, permission))
}

/// 쓰기 작업 전에 문서 접근 권한(읽기 이상)을 요구합니다.
pub async fn require_readable(
    pool: &SqlitePool,
    document_id: &str,
    actor_id: &str,
) -> Result<(Document, Permission), AppError> {
    let resolution = access::resolve(pool, document_id, Some(actor_id)).await?;
    let (document, permission) = require_document(resolution)?;

    match permission {
        Some(permission) => Ok((document, permission)),
        None => {
            warn!(document_id, actor_id, "access denied");
            Err(AppError::access_denied(
                "You do not have access to this document",
            ))
        }
    }
}

/// 편집 권한(`write` 또는 `admin`)을 요구합니다.
pub async fn require_editor(
    pool: &SqlitePool,
    document_id: &str,
    actor_id: &str,
) -> Result<(Document, Permission), AppError> {
    let resolution = access::resolve(pool, document_id, Some(actor_id)).await?;
    let can_edit = resolution.access.can_edit();
    let (document, permission) = require_document(resolution)?;

    match permission {
        Some(permission) if can_edit => Ok((document, permission)),
        _ => {
            warn!(document_id, actor_id, "edit denied");
            Err(AppError::access_denied(
                "You do not have permission to edit this document",
            ))
        }
    }
}

/// 문서 작성자만 허용합니다 (삭제, 공유 설정).
///
/// 작성자 판정은 협업자 권한과 무관하므로 판정기를 거치지 않고 문서 행만 봅니다.
pub async fn require_author(
    pool: &SqlitePool,
    document_id: &str,
    actor_id: &str,
    action: &str,
) -> Result<Document, AppError> {
    let document = db::get_document(pool, document_id)
        .await?
        .ok_or(AppError::NotFound)?;

    if document.author_id != actor_id {
        warn!(document_id, actor_id, action, "author-only action denied");
        return Err(AppError::access_denied(format!(
            "Only the document author can {action}"
        )));
    }

    Ok(document)
}

/// 협업자 관리 권한: 작성자(`admin`으로 판정됨) 또는 `admin` 협업자.
pub async fn require_collaborator_manager(
    pool: &SqlitePool,
    document_id: &str,
    actor_id: &str,
) -> Result<Document, AppError> {
    let resolution = access::resolve(pool, document_id, Some(actor_id)).await?;
    let (document, permission) = require_document(resolution)?;

    let is_author = document.author_id == actor_id;
    let is_admin = permission == Some(Permission::Admin);

    if is_author || is_admin {
        Ok(document)
    } else {
        warn!(document_id, actor_id, "collaborator management denied");
        Err(AppError::access_denied(
            "Only the author or an admin collaborator can manage collaborators",
        ))
    }
}
