//! # 계정 프로비저닝
//!
//! 사용자는 ID 공급자가 만듭니다. 이 서비스는 요청자가 자기 계정 행을
//! 명시적으로 만들거나 갱신하는 경로 하나만 제공합니다.

use sqlx::SqlitePool;
use tracing::info;

use crate::{
    db,
    error::AppError,
    models::{ProvisionUserRequest, User},
    services::guard,
};

pub async fn me(pool: &SqlitePool, actor: Option<&str>) -> Result<User, AppError> {
    let actor_id = guard::require_actor(actor)?;
    db::users::find_by_id(pool, actor_id)
        .await?
        .ok_or(AppError::NotFound)
}

/// 요청자 자신의 계정을 만들거나 갱신합니다. 다른 사용자의 이메일이면 `Conflict`.
pub async fn provision(
    pool: &SqlitePool,
    actor: Option<&str>,
    req: &ProvisionUserRequest,
) -> Result<User, AppError> {
    let actor_id = guard::require_actor(actor)?;

    let email = req
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| e.contains('@'))
        .ok_or_else(|| AppError::invalid_input("A valid email is required"))?;
    let name = req
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::invalid_input("name is required"))?;
    let avatar_url = req.avatar_url.as_deref().filter(|u| !u.is_empty());

    let user = db::users::upsert_user(pool, actor_id, email, name, avatar_url)
        .await
        .map_err(|e| {
            if e.is_unique_violation() {
                AppError::Conflict("Email is already in use".to_string())
            } else {
                e
            }
        })?;

    info!(actor_id, "user provisioned");
    Ok(user)
}
