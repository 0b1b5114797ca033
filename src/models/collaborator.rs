use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UserSummary;

/// 문서에 대한 권한 수준. 선언 순서가 곧 강도 순서입니다 (Read < Write < Admin).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum Permission {
    Read,
    Write,
    Admin,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Read => "read",
            Permission::Write => "write",
            Permission::Admin => "admin",
        }
    }

    pub fn allows_edit(&self) -> bool {
        *self >= Permission::Write
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(Permission::Read),
            "write" => Ok(Permission::Write),
            "admin" => Ok(Permission::Admin),
            other => Err(format!("Invalid permission: {other}")),
        }
    }
}

/// `document_collaborators` 테이블 한 행. (document_id, user_id)는 유일합니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Collaborator {
    pub id: String,
    pub document_id: String,
    pub user_id: String,
    pub permission: Permission,
    pub created_at: String,
}

/// users 테이블과 조인한 조회 결과 행
#[derive(Debug, sqlx::FromRow)]
pub struct CollaboratorRow {
    pub id: String,
    pub document_id: String,
    pub user_id: String,
    pub permission: Permission,
    pub created_at: String,
    pub user_name: String,
    pub user_email: String,
    pub user_avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollaboratorView {
    pub id: String,
    pub document_id: String,
    pub user_id: String,
    pub permission: Permission,
    pub created_at: String,
    pub user: UserSummary,
}

impl From<CollaboratorRow> for CollaboratorView {
    fn from(row: CollaboratorRow) -> Self {
        Self {
            user: UserSummary {
                id: row.user_id.clone(),
                name: row.user_name,
                email: row.user_email,
                avatar_url: row.user_avatar_url,
            },
            id: row.id,
            document_id: row.document_id,
            user_id: row.user_id,
            permission: row.permission,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddCollaboratorRequest {
    pub user_id: Option<String>,
    pub permission: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCollaboratorRequest {
    pub permission: Option<String>,
}
