use serde::{Deserialize, Serialize};

/// ID 공급자가 만든 사용자. `id`는 토큰의 `sub` 클레임과 같습니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// 문서/댓글/협업자 응답에 붙는 작성자 요약
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            avatar_url: user.avatar_url,
        }
    }
}

/// `PUT /api/v1/users/me`: 자기 계정 프로비저닝(생성 또는 갱신)
#[derive(Debug, Default, Deserialize)]
pub struct ProvisionUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}
