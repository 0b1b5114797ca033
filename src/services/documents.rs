//! # 문서 작업
//!
//! 문서 조회/목록/생성/수정/삭제. 쓰기 작업은 모두 `guard`를 먼저 통과합니다.
//!
//! 편집 충돌 감지는 하지 않습니다. 두 편집자가 동시에 권한 확인을 통과하면
//! 나중에 저장한 쪽이 이깁니다. `version`도 편집마다 오르지 않고,
//! 버전 스냅샷(`services::versions`)을 만들 때만 오릅니다.

use sqlx::SqlitePool;
use tracing::info;

use crate::{
    db::{self, DocumentChanges},
    error::AppError,
    models::*,
    services::{
        access::RequestScope,
        guard,
        password::PasswordHasher,
        sharing::{self, SharingPlan},
    },
};

pub const DEFAULT_PUBLIC_LIMIT: i64 = 10;
pub const MAX_PUBLIC_LIMIT: i64 = 100;

/// 단일 문서 조회 (읽기 경로: 권한 없음도 `NotFound`)
///
/// 공유 링크 토큰은 `admin` 권한자에게만 보여줍니다.
pub async fn get_document(scope: &mut RequestScope<'_>, id: &str) -> Result<DocumentView, AppError> {
    let (mut document, permission) = scope.readable(id).await?;

    if permission != Permission::Admin {
        document.access_token = None;
    }

    let author = db::users::find_by_id(scope.pool(), &document.author_id)
        .await?
        .map(UserSummary::from);

    Ok(DocumentView {
        document,
        author,
        permission,
    })
}

/// 요청자가 작성한 문서 목록 (최근 수정순)
pub async fn list_own(pool: &SqlitePool, actor: Option<&str>) -> Result<Vec<Document>, AppError> {
    let actor_id = guard::require_actor(actor)?;
    db::list_documents_by_author(pool, actor_id).await
}

/// 최근 공개 문서. limit은 1..=100으로 맞춥니다.
pub async fn list_public(pool: &SqlitePool, limit: Option<i64>) -> Result<Vec<Document>, AppError> {
    let limit = limit
        .unwrap_or(DEFAULT_PUBLIC_LIMIT)
        .clamp(1, MAX_PUBLIC_LIMIT);
    db::list_public_documents(pool, limit).await
}

/// 문서 생성. 작성자는 항상 요청자입니다.
pub async fn create(
    pool: &SqlitePool,
    hasher: &PasswordHasher,
    actor: Option<&str>,
    req: &CreateDocumentRequest,
) -> Result<Document, AppError> {
    let actor_id = guard::require_actor(actor)?;

    let title = req
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::invalid_input("Title and content are required"))?;
    let content = req
        .content
        .as_deref()
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::invalid_input("Title and content are required"))?;

    let plan = match req.visibility.as_deref() {
        None => SharingPlan::Private,
        visibility => sharing::plan(visibility, req.password.as_deref())?,
    };

    guard::require_provisioned(pool, actor_id).await?;

    let sharing = plan.realize(hasher)?;
    let id = db::new_id();
    let document = db::create_document(pool, &id, actor_id, title, content, &sharing).await?;

    info!(
        document_id = %document.id,
        actor_id,
        visibility = %document.visibility,
        "document created"
    );

    Ok(document)
}

/// 문서 수정 (보낸 필드만). `can_edit` 필요.
///
/// visibility를 바꾸는 요청은 공유 정책을 그대로 따르므로 작성자만 할 수 있습니다.
pub async fn update(
    pool: &SqlitePool,
    hasher: &PasswordHasher,
    id: &str,
    actor: Option<&str>,
    req: &UpdateDocumentRequest,
) -> Result<Document, AppError> {
    let actor_id = guard::require_actor(actor)?;

    let title = match req.title.as_deref().map(str::trim) {
        Some("") => return Err(AppError::invalid_input("Title cannot be empty")),
        title => title,
    };
    let plan = match req.visibility.as_deref() {
        Some(visibility) => Some(sharing::plan(Some(visibility), req.password.as_deref())?),
        None => None,
    };

    let (document, _) = guard::require_editor(pool, id, actor_id).await?;

    if plan.is_some() && document.author_id != actor_id {
        tracing::warn!(document_id = id, actor_id, "visibility change by non-author denied");
        return Err(AppError::access_denied(
            "Only the document author can change sharing settings",
        ));
    }

    let sharing = plan.map(|p| p.realize(hasher)).transpose()?;
    let changes = DocumentChanges {
        title,
        content: req.content.as_deref(),
        sharing: sharing.as_ref(),
    };

    let updated = db::update_document(pool, id, &changes)
        .await?
        .ok_or(AppError::NotFound)?;

    info!(document_id = id, actor_id, "document updated");

    Ok(updated)
}

/// 문서 삭제. 작성자만 가능하며 협업자/댓글/버전이 함께 삭제됩니다.
pub async fn delete(pool: &SqlitePool, id: &str, actor: Option<&str>) -> Result<(), AppError> {
    let actor_id = guard::require_actor(actor)?;
    guard::require_author(pool, id, actor_id, "delete this document").await?;

    if !db::delete_document(pool, id).await? {
        return Err(AppError::NotFound);
    }

    info!(document_id = id, actor_id, "document deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{cheap_hasher, memory_pool, seed_document, seed_user};

    fn create_req(title: &str, content: &str) -> CreateDocumentRequest {
        CreateDocumentRequest {
            title: Some(title.to_string()),
            content: Some(content.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_forces_author_and_defaults_to_private() {
        let pool = memory_pool().await;
        seed_user(&pool, "alice").await;

        let doc = create(&pool, &cheap_hasher(), Some("alice"), &create_req(" Notes ", "# hi"))
            .await
            .unwrap();

        assert_eq!(doc.author_id, "alice");
        assert_eq!(doc.title, "Notes");
        assert_eq!(doc.visibility, Visibility::Private);
        assert_eq!(doc.version, 1);
        assert!(doc.sharing_is_consistent());
    }

    #[tokio::test]
    async fn create_rejects_missing_fields_without_persisting() {
        let pool = memory_pool().await;
        seed_user(&pool, "alice").await;
        let hasher = cheap_hasher();

        for req in [create_req("", "body"), create_req("   ", "body"), create_req("t", "")] {
            let err = create(&pool, &hasher, Some("alice"), &req).await.unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(_)));
        }
        let err = create(&pool, &hasher, None, &create_req("t", "c")).await.unwrap_err();
        assert!(matches!(err, AppError::AuthenticationRequired));
        let err = create(&pool, &hasher, Some("ghost"), &create_req("t", "c")).await.unwrap_err();
        assert!(matches!(err, AppError::AuthenticationRequired));

        assert!(list_own(&pool, Some("alice")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_with_link_only_issues_token() {
        let pool = memory_pool().await;
        seed_user(&pool, "alice").await;

        let req = CreateDocumentRequest {
            visibility: Some("link_only".into()),
            ..create_req("t", "c")
        };
        let doc = create(&pool, &cheap_hasher(), Some("alice"), &req).await.unwrap();

        assert_eq!(doc.visibility, Visibility::LinkOnly);
        assert!(doc.access_token.is_some());
    }

    #[tokio::test]
    async fn get_hides_private_documents_and_redacts_tokens() {
        let pool = memory_pool().await;
        seed_user(&pool, "alice").await;
        seed_user(&pool, "bob").await;
        let doc = seed_document(&pool, "alice", Visibility::LinkOnly).await;

        let mut scope = RequestScope::new(&pool, Some("bob"));
        assert!(matches!(
            get_document(&mut scope, &doc.id).await,
            Err(AppError::NotFound)
        ));

        db::collaborators::add_collaborator(&pool, &doc.id, "bob", Permission::Write)
            .await
            .unwrap();

        let mut scope = RequestScope::new(&pool, Some("bob"));
        let view = get_document(&mut scope, &doc.id).await.unwrap();
        assert_eq!(view.permission, Permission::Write);
        assert!(view.document.access_token.is_none());
        assert_eq!(view.author.map(|a| a.id).as_deref(), Some("alice"));

        let mut scope = RequestScope::new(&pool, Some("alice"));
        let view = get_document(&mut scope, &doc.id).await.unwrap();
        assert!(view.document.access_token.is_some());
    }

    #[tokio::test]
    async fn update_requires_edit_permission_and_keeps_version() {
        let pool = memory_pool().await;
        let hasher = cheap_hasher();
        seed_user(&pool, "alice").await;
        seed_user(&pool, "reader").await;
        seed_user(&pool, "writer").await;
        let doc = seed_document(&pool, "alice", Visibility::Private).await;
        db::collaborators::add_collaborator(&pool, &doc.id, "reader", Permission::Read)
            .await
            .unwrap();
        db::collaborators::add_collaborator(&pool, &doc.id, "writer", Permission::Write)
            .await
            .unwrap();

        let req = UpdateDocumentRequest {
            content: Some("edited".into()),
            ..Default::default()
        };

        assert!(matches!(
            update(&pool, &hasher, &doc.id, None, &req).await,
            Err(AppError::AuthenticationRequired)
        ));
        assert!(matches!(
            update(&pool, &hasher, &doc.id, Some("reader"), &req).await,
            Err(AppError::AccessDenied(_))
        ));
        assert!(matches!(
            update(&pool, &hasher, &doc.id, Some("stranger"), &req).await,
            Err(AppError::AccessDenied(_))
        ));

        let updated = update(&pool, &hasher, &doc.id, Some("writer"), &req).await.unwrap();
        assert_eq!(updated.content, "edited");
        assert_eq!(updated.title, doc.title);
        assert_eq!(updated.version, doc.version);
        assert!(updated.updated_at >= doc.updated_at);
    }

    #[tokio::test]
    async fn visibility_change_through_update_is_author_only() {
        let pool = memory_pool().await;
        let hasher = cheap_hasher();
        seed_user(&pool, "alice").await;
        seed_user(&pool, "writer").await;
        let doc = seed_document(&pool, "alice", Visibility::Private).await;
        db::collaborators::add_collaborator(&pool, &doc.id, "writer", Permission::Admin)
            .await
            .unwrap();

        let req = UpdateDocumentRequest {
            visibility: Some("public".into()),
            ..Default::default()
        };
        assert!(matches!(
            update(&pool, &hasher, &doc.id, Some("writer"), &req).await,
            Err(AppError::AccessDenied(_))
        ));

        let bad = UpdateDocumentRequest {
            visibility: Some("everyone".into()),
            ..Default::default()
        };
        assert!(matches!(
            update(&pool, &hasher, &doc.id, Some("alice"), &bad).await,
            Err(AppError::InvalidInput(_))
        ));

        let updated = update(&pool, &hasher, &doc.id, Some("alice"), &req).await.unwrap();
        assert_eq!(updated.visibility, Visibility::Public);
        assert!(updated.sharing_is_consistent());
    }

    #[tokio::test]
    async fn delete_is_author_only_and_cascades() {
        let pool = memory_pool().await;
        seed_user(&pool, "alice").await;
        seed_user(&pool, "writer").await;
        let doc = seed_document(&pool, "alice", Visibility::Private).await;
        db::collaborators::add_collaborator(&pool, &doc.id, "writer", Permission::Write)
            .await
            .unwrap();
        db::comments::create_comment(&pool, &doc.id, "writer", "hi", None, None)
            .await
            .unwrap();

        assert!(matches!(
            delete(&pool, &doc.id, Some("writer")).await,
            Err(AppError::AccessDenied(_))
        ));

        delete(&pool, &doc.id, Some("alice")).await.unwrap();

        assert!(db::get_document(&pool, &doc.id).await.unwrap().is_none());
        assert!(db::collaborators::list_collaborators(&pool, &doc.id)
            .await
            .unwrap()
            .is_empty());
        assert!(db::comments::list_comments(&pool, &doc.id).await.unwrap().is_empty());
        assert!(matches!(
            delete(&pool, &doc.id, Some("alice")).await,
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test]
    async fn concurrent_updates_both_succeed_and_last_writer_wins() {
        let pool = memory_pool().await;
        let hasher = cheap_hasher();
        seed_user(&pool, "alice").await;
        seed_user(&pool, "writer").await;
        let doc = seed_document(&pool, "alice", Visibility::Private).await;
        db::collaborators::add_collaborator(&pool, &doc.id, "writer", Permission::Write)
            .await
            .unwrap();

        let first = UpdateDocumentRequest {
            content: Some("from alice".into()),
            ..Default::default()
        };
        let second = UpdateDocumentRequest {
            content: Some("from writer".into()),
            ..Default::default()
        };

        let (a, b) = tokio::join!(
            update(&pool, &hasher, &doc.id, Some("alice"), &first),
            update(&pool, &hasher, &doc.id, Some("writer"), &second),
        );
        assert!(a.is_ok());
        assert!(b.is_ok());

        let stored = db::get_document(&pool, &doc.id).await.unwrap().unwrap();
        assert!(stored.content == "from alice" || stored.content == "from writer");
        assert!(stored.sharing_is_consistent());
    }

    #[tokio::test]
    async fn public_listing_clamps_limit() {
        let pool = memory_pool().await;
        seed_user(&pool, "alice").await;
        for _ in 0..3 {
            seed_document(&pool, "alice", Visibility::Public).await;
        }
        seed_document(&pool, "alice", Visibility::Private).await;

        assert_eq!(list_public(&pool, None).await.unwrap().len(), 3);
        assert_eq!(list_public(&pool, Some(0)).await.unwrap().len(), 1);
        assert_eq!(list_public(&pool, Some(2)).await.unwrap().len(), 2);
    }
}
