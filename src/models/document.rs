//! # 문서 모델 정의
//!
//! `documents` 테이블 한 행에 대응하는 `Document`와, 공개 범위(`Visibility`),
//! 공개 범위에 딸린 비밀값 묶음(`SharingState`), 요청/응답 본문을 정의합니다.
//!
//! ## 공개 범위와 비밀값의 관계
//! | visibility           | password_hash | access_token |
//! |----------------------|---------------|--------------|
//! | `private`            | 없음          | 없음         |
//! | `public`             | 없음          | 없음         |
//! | `link_only`          | 없음          | 있음         |
//! | `password_protected` | 있음          | 있음         |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Permission, UserSummary};

/// 문서의 공유 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum Visibility {
    Private,
    Public,
    LinkOnly,
    PasswordProtected,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Public => "public",
            Visibility::LinkOnly => "link_only",
            Visibility::PasswordProtected => "password_protected",
        }
    }

    /// 이 모드에서 공유 링크 토큰이 존재해야 하는지
    pub fn uses_access_token(&self) -> bool {
        matches!(self, Visibility::LinkOnly | Visibility::PasswordProtected)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "private" => Ok(Visibility::Private),
            "public" => Ok(Visibility::Public),
            "link_only" => Ok(Visibility::LinkOnly),
            "password_protected" => Ok(Visibility::PasswordProtected),
            other => Err(format!("Invalid visibility setting: {other}")),
        }
    }
}

/// 문서 엔티티: DB의 `documents` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub content: String,
    /// 작성자. 생성 이후 바뀌지 않습니다.
    pub author_id: String,
    pub visibility: Visibility,
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    pub access_token: Option<String>,
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl Document {
    /// 현재 행이 공개 범위/비밀값 규칙을 지키는지 확인합니다.
    pub fn sharing_is_consistent(&self) -> bool {
        let wants_hash = self.visibility == Visibility::PasswordProtected;
        wants_hash == self.password_hash.is_some()
            && self.visibility.uses_access_token() == self.access_token.is_some()
    }
}

/// 공개 범위와 그에 딸린 비밀값. 항상 함께 저장됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharingState {
    pub visibility: Visibility,
    pub password_hash: Option<String>,
    pub access_token: Option<String>,
}

/// `GET /documents/{id}` 응답: 문서 + 작성자 요약 + 요청자의 실효 권한
#[derive(Debug, Clone, Serialize)]
pub struct DocumentView {
    #[serde(flatten)]
    pub document: Document,
    pub author: Option<UserSummary>,
    pub permission: Permission,
}

/// 문서 생성 요청: `POST /api/v1/documents`
///
/// title/content를 Option으로 받는 이유: 누락 시 axum의 422 대신
/// 우리 쪽에서 400 `invalid_input`으로 응답하기 위해서입니다.
#[derive(Debug, Default, Deserialize)]
pub struct CreateDocumentRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub visibility: Option<String>,
    pub password: Option<String>,
}

/// 문서 수정 요청: `PUT /api/v1/documents/{id}` (보낸 필드만 변경)
#[derive(Debug, Default, Deserialize)]
pub struct UpdateDocumentRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub visibility: Option<String>,
    pub password: Option<String>,
}

/// 공유 설정 변경 요청: `PUT /api/v1/documents/{id}/share`
#[derive(Debug, Default, Deserialize)]
pub struct ShareRequest {
    pub visibility: Option<String>,
    pub password: Option<String>,
}

/// 공유 설정 변경 응답의 `document` 필드
#[derive(Debug, Serialize)]
pub struct SharingSummary {
    pub id: String,
    pub visibility: Visibility,
    pub access_token: Option<String>,
}

impl From<&Document> for SharingSummary {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            visibility: doc.visibility,
            access_token: doc.access_token.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PublicDocumentsQuery {
    pub limit: Option<i64>,
}
