//! # 접근 판정기 (Access Resolver)
//!
//! 문서 ID와 요청자(없을 수도 있음)로부터 실효 권한을 계산합니다.
//! 규칙은 위에서부터 처음 맞는 것 하나만 적용됩니다.
//!
//! 1. 문서가 없으면 접근 불가 (호출자는 이를 "없음"으로 응답)
//! 2. 요청자가 작성자면 `admin`
//! 3. `public`이면 누구에게나 `read` (익명, 협업자 포함)
//! 4. 익명 요청이면 접근 불가
//! 5. 협업자 행이 있으면 그 권한, 없으면 접근 불가
//!
//! 작성자 규칙만 `public` 규칙보다 앞섭니다. 문서를 공개해도 작성자는 `admin`으로
//! 남고, 협업자는 공개 문서에서 저장된 권한과 무관하게 `read`로 판정됩니다.
//!
//! `link_only`/`password_protected`는 이 판정기에서 아무 권한도 주지 않습니다.
//! 토큰을 든 요청은 `services::sharing::open_shared_link`가 따로 처리합니다.
//!
//! ## 재진입 금지
//! `resolve()`는 `db::` 함수만 호출합니다. `RequestScope`처럼 결과를 기억하는
//! 상위 접근자를 절대 호출하지 않습니다. `RequestScope`가 `resolve()`를 부르므로,
//! 반대 방향 호출이 생기면 순환이 됩니다.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db,
    error::AppError,
    models::{Document, Permission, Visibility},
};

/// 판정 결과: `{ can_access, permission? }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Access {
    pub can_access: bool,
    pub permission: Option<Permission>,
}

impl Access {
    pub const DENIED: Access = Access {
        can_access: false,
        permission: None,
    };

    pub fn granted(permission: Permission) -> Self {
        Self {
            can_access: true,
            permission: Some(permission),
        }
    }

    /// `can_access && permission ∈ {write, admin}`
    pub fn can_edit(&self) -> bool {
        self.can_access && self.permission.is_some_and(|p| p.allows_edit())
    }
}

/// 판정 결과와, 판정하면서 읽은 문서. 가드는 문서 유무로 NotFound를 구분합니다.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub document: Option<Document>,
    pub access: Access,
}

impl Resolution {
    /// 접근 가능한 문서와 권한. 문서가 없거나 권한이 없으면 None.
    pub fn granted(&self) -> Option<(&Document, Permission)> {
        match (&self.document, self.access.permission) {
            (Some(doc), Some(permission)) if self.access.can_access => Some((doc, permission)),
            _ => None,
        }
    }
}

/// 부작용 없는 접근 판정. 저장소를 직접 조회합니다.
pub async fn resolve(
    pool: &SqlitePool,
    document_id: &str,
    actor: Option<&str>,
) -> Result<Resolution, AppError> {
    let Some(document) = db::get_document(pool, document_id).await? else {
        return Ok(Resolution {
            document: None,
            access: Access::DENIED,
        });
    };

    let public = document.visibility == Visibility::Public;

    let access = match actor {
        Some(actor_id) if actor_id == document.author_id => Access::granted(Permission::Admin),
        _ if public => Access::granted(Permission::Read),
        None => Access::DENIED,
        Some(actor_id) => {
            // 협업자 테이블을 직접 조회 (재진입 금지 규칙)
            db::collaborators::find_permission(pool, document_id, actor_id)
                .await?
                .map_or(Access::DENIED, Access::granted)
        }
    };

    Ok(Resolution {
        document: Some(document),
        access,
    })
}

/// `resolveAccess(documentId, actorId?)`
pub async fn resolve_access(
    pool: &SqlitePool,
    document_id: &str,
    actor: Option<&str>,
) -> Result<Access, AppError> {
    Ok(resolve(pool, document_id, actor).await?.access)
}

/// `canEdit(documentId, actorId)`
pub async fn can_edit(
    pool: &SqlitePool,
    document_id: &str,
    actor: Option<&str>,
) -> Result<bool, AppError> {
    Ok(resolve_access(pool, document_id, actor).await?.can_edit())
}

/// 요청 하나 동안만 사는 읽기 전용 판정 캐시.
///
/// 같은 요청 안에서 같은 문서를 여러 번 판정할 때 저장소 조회를 줄입니다.
/// 핸들러에서 요청마다 새로 만들고, 요청이 끝나면 버립니다.
/// 쓰기 작업의 가드는 이 캐시를 쓰지 않고 항상 `resolve()`를 새로 호출합니다.
pub struct RequestScope<'a> {
    pool: &'a SqlitePool,
    actor: Option<&'a str>,
    resolved: HashMap<String, Resolution>,
}

impl<'a> RequestScope<'a> {
    pub fn new(pool: &'a SqlitePool, actor: Option<&'a str>) -> Self {
        Self {
            pool,
            actor,
            resolved: HashMap::new(),
        }
    }

    pub fn pool(&self) -> &'a SqlitePool {
        self.pool
    }

    pub fn actor(&self) -> Option<&'a str> {
        self.actor
    }

    pub async fn resolve(&mut self, document_id: &str) -> Result<&Resolution, AppError> {
        match self.resolved.entry(document_id.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let resolution = resolve(self.pool, document_id, self.actor).await?;
                Ok(entry.insert(resolution))
            }
        }
    }

    /// 읽기 경로용: 없음과 권한 없음을 똑같이 `NotFound`로 돌려줍니다.
    pub async fn readable(&mut self, document_id: &str) -> Result<(Document, Permission), AppError> {
        let resolution = self.resolve(document_id).await?;
        match resolution.granted() {
            Some((doc, permission)) => Ok((doc.clone(), permission)),
            None => {
                tracing::debug!(document_id, "read denied or document missing");
                Err(AppError::NotFound)
            }
        }
    }
}
