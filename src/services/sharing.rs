//! # 공유 정책 (Sharing Policy)
//!
//! 공개 범위를 바꿀 때 함께 바뀌어야 하는 비밀값을 계산합니다.
//!
//! | 목표 visibility      | password_hash     | access_token |
//! |----------------------|-------------------|--------------|
//! | `password_protected` | 새 해시 (필수)    | 새 토큰      |
//! | `link_only`          | 제거              | 새 토큰      |
//! | `public`, `private`  | 제거              | 제거         |
//!
//! 토큰을 쓰는 모드로 바꿀 때는 같은 모드를 다시 골라도 항상 새 토큰을 만듭니다.
//! 이전에 배포한 링크는 그 순간 무효가 됩니다.
//!
//! 계산은 두 단계입니다.
//! 1. `plan()`: 요청 본문만 보고 검증합니다. 저장소에 접근하지 않습니다.
//! 2. `SharingPlan::realize()`: 비밀번호를 해싱하고 토큰을 만들어 `SharingState`로 만듭니다.
//!
//! 권한 확인은 두 단계 사이에 호출자가 합니다.

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::{
    db::{self, DocumentChanges},
    error::AppError,
    models::{Document, ShareRequest, SharingState, Visibility},
    services::{
        guard,
        password::{generate_access_token, PasswordHasher},
    },
};

/// 비밀번호 보호 문서의 최소 비밀번호 길이 (앞뒤 공백 제외, 문자 수 기준)
pub const MIN_PASSWORD_LEN: usize = 6;

/// 검증을 마친 공개 범위 변경 계획. 비밀번호는 이미 trim된 값입니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SharingPlan {
    Private,
    Public,
    LinkOnly,
    PasswordProtected { password: String },
}

impl SharingPlan {
    pub fn visibility(&self) -> Visibility {
        match self {
            SharingPlan::Private => Visibility::Private,
            SharingPlan::Public => Visibility::Public,
            SharingPlan::LinkOnly => Visibility::LinkOnly,
            SharingPlan::PasswordProtected { .. } => Visibility::PasswordProtected,
        }
    }

    /// 계획을 저장할 상태로 만듭니다. 토큰 모드면 매번 새 토큰을 발급합니다.
    pub fn realize(self, hasher: &PasswordHasher) -> Result<SharingState, AppError> {
        let visibility = self.visibility();

        let password_hash = match &self {
            SharingPlan::PasswordProtected { password } => Some(hasher.hash_password(password)?),
            _ => None,
        };

        let access_token = visibility
            .uses_access_token()
            .then(generate_access_token);

        Ok(SharingState {
            visibility,
            password_hash,
            access_token,
        })
    }
}

/// 요청 본문을 검증해 변경 계획을 만듭니다.
///
/// # 에러
/// - visibility가 없거나 알 수 없는 값 → `InvalidInput`
/// - `password_protected`인데 비밀번호가 없거나 trim 후 6자 미만 → `InvalidInput`
pub fn plan(visibility: Option<&str>, password: Option<&str>) -> Result<SharingPlan, AppError> {
    let visibility: Visibility = visibility
        .ok_or_else(|| AppError::invalid_input("visibility is required"))?
        .parse()
        .map_err(AppError::InvalidInput)?;

    Ok(match visibility {
        Visibility::Private => SharingPlan::Private,
        Visibility::Public => SharingPlan::Public,
        Visibility::LinkOnly => SharingPlan::LinkOnly,
        Visibility::PasswordProtected => {
            let password = password.map(str::trim).unwrap_or_default();
            if password.chars().count() < MIN_PASSWORD_LEN {
                return Err(AppError::invalid_input(format!(
                    "Password must be at least {MIN_PASSWORD_LEN} characters long"
                )));
            }
            SharingPlan::PasswordProtected {
                password: password.to_string(),
            }
        }
    })
}

/// `applySharing(documentId, requestedVisibility, password?)`
///
/// 검증 순서: 인증 → 본문 검증 → 문서 존재 → 작성자 확인 → 해싱/저장.
/// 공개 범위와 비밀값, `updated_at`은 UPDATE 하나로 함께 저장됩니다.
pub async fn apply_sharing(
    pool: &SqlitePool,
    hasher: &PasswordHasher,
    document_id: &str,
    actor: Option<&str>,
    req: &ShareRequest,
) -> Result<Document, AppError> {
    let actor_id = guard::require_actor(actor)?;
    let plan = plan(req.visibility.as_deref(), req.password.as_deref())?;

    guard::require_author(pool, document_id, actor_id, "change sharing settings").await?;

    let sharing = plan.realize(hasher)?;
    let changes = DocumentChanges {
        sharing: Some(&sharing),
        ..Default::default()
    };

    let document = db::update_document(pool, document_id, &changes)
        .await?
        .ok_or(AppError::NotFound)?;

    info!(
        document_id,
        actor_id,
        visibility = %document.visibility,
        "sharing settings updated"
    );

    Ok(document)
}

/// 공유 링크로 문서를 엽니다. 로그인하지 않은 방문자를 위한 경로입니다.
///
/// - 토큰에 해당하는 문서가 없으면 `NotFound`
/// - `link_only`: 바로 반환
/// - `password_protected`: 비밀번호가 없으면 `AuthenticationRequired`,
///   틀리면 `AccessDenied`
pub async fn open_shared_link(
    pool: &SqlitePool,
    hasher: &PasswordHasher,
    token: &str,
    password: Option<&str>,
) -> Result<Document, AppError> {
    let document = db::find_by_access_token(pool, token)
        .await?
        .ok_or(AppError::NotFound)?;

    match document.visibility {
        Visibility::LinkOnly => Ok(document),
        Visibility::PasswordProtected => {
            let password = password
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .ok_or(AppError::AuthenticationRequired)?;

            let hash = document.password_hash.as_deref().ok_or_else(|| {
                AppError::Internal(format!("Document {} has no password hash", document.id))
            })?;

            if hasher.verify_password(password, hash)? {
                Ok(document)
            } else {
                warn!(document_id = %document.id, "wrong share password");
                Err(AppError::access_denied("Incorrect password"))
            }
        }
        // 토큰 컬럼은 토큰 모드에서만 채워지므로 여기 올 일은 없지만, 오면 없는 링크로 취급
        Visibility::Public | Visibility::Private => Err(AppError::NotFound),
    }
}
