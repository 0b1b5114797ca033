//! # 협업자 핸들러
//!
//! - `GET    /api/v1/documents/{id}/collaborators`
//! - `POST   /api/v1/documents/{id}/collaborators`            (201)
//! - `PUT    /api/v1/documents/{id}/collaborators/{user_id}`
//! - `DELETE /api/v1/documents/{id}/collaborators/{user_id}`

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use super::{documents::AppState, extract::AppJson};
use crate::{
    error::AppError,
    middleware::auth::Actor,
    models::{AddCollaboratorRequest, UpdateCollaboratorRequest},
    services::{self, access::RequestScope},
};

pub async fn list_collaborators(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let mut scope = RequestScope::new(&state.pool, actor.id());
    let collaborators = services::collaborators::list(&mut scope, &id).await?;
    Ok(Json(json!({ "collaborators": collaborators })))
}

pub async fn add_collaborator(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
    AppJson(req): AppJson<AddCollaboratorRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let collaborator = services::collaborators::add(&state.pool, &id, actor.id(), &req).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "collaborator": collaborator })),
    ))
}

pub async fn update_collaborator(
    State(state): State<AppState>,
    actor: Actor,
    Path((id, user_id)): Path<(String, String)>,
    AppJson(req): AppJson<UpdateCollaboratorRequest>,
) -> Result<Json<Value>, AppError> {
    let collaborator =
        services::collaborators::update_permission(&state.pool, &id, &user_id, actor.id(), &req)
            .await?;
    Ok(Json(json!({ "collaborator": collaborator })))
}

pub async fn remove_collaborator(
    State(state): State<AppState>,
    actor: Actor,
    Path((id, user_id)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    services::collaborators::remove(&state.pool, &id, &user_id, actor.id()).await?;
    Ok(Json(json!({ "success": true })))
}
