use serde::{Deserialize, Serialize};

/// 문서 버전 스냅샷. 추가만 되고 수정/삭제되지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DocumentVersion {
    pub id: String,
    pub document_id: String,
    pub content: String,
    pub version_number: i64,
    pub created_by: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DocumentVersionSummary {
    pub id: String,
    pub document_id: String,
    pub version_number: i64,
    pub created_by: String,
    pub created_at: String,
}
