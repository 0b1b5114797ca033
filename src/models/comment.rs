//! # 댓글 모델 정의
//!
//! 댓글은 `parent_comment_id`로 답글 스레드(트리)를 이룹니다.
//! 부모는 생성 시점에 고정되고 이후 바뀌지 않으므로 순환이 생길 수 없습니다.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;

use super::UserSummary;

/// 문서 본문 안의 댓글 위치
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentPosition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<SelectionRange>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRange {
    pub start: u32,
    pub end: u32,
}

/// `comments` 테이블 한 행. position은 JSON 텍스트로 저장됩니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: String,
    pub document_id: String,
    pub user_id: String,
    pub content: String,
    pub parent_comment_id: Option<String>,
    pub position: Option<Json<CommentPosition>>,
    pub created_at: String,
    pub updated_at: String,
}

/// users 테이블과 조인한 조회 결과 행
#[derive(Debug, sqlx::FromRow)]
pub struct CommentRow {
    pub id: String,
    pub document_id: String,
    pub user_id: String,
    pub content: String,
    pub parent_comment_id: Option<String>,
    pub position: Option<Json<CommentPosition>>,
    pub created_at: String,
    pub updated_at: String,
    pub user_name: String,
    pub user_email: String,
    pub user_avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    #[serde(flatten)]
    pub comment: Comment,
    pub user: UserSummary,
}

impl From<CommentRow> for CommentView {
    fn from(row: CommentRow) -> Self {
        Self {
            user: UserSummary {
                id: row.user_id.clone(),
                name: row.user_name,
                email: row.user_email,
                avatar_url: row.user_avatar_url,
            },
            comment: Comment {
                id: row.id,
                document_id: row.document_id,
                user_id: row.user_id,
                content: row.content,
                parent_comment_id: row.parent_comment_id,
                position: row.position,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}

/// `POST /api/v1/documents/{id}/comments`
#[derive(Debug, Default, Deserialize)]
pub struct CreateCommentRequest {
    pub content: Option<String>,
    pub parent_comment_id: Option<String>,
    pub position: Option<CommentPosition>,
}

/// `PUT /api/v1/comments/{id}`
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCommentRequest {
    pub content: Option<String>,
}
