//! Member API endpoints

use api_types::member::{MemberCreated, MemberNew, MemberView, MembersResponse};
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{ServerError, server::ServerState};

/// Handle requests for listing the members of a group
pub async fn list(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<MembersResponse>, ServerError> {
    let engine = state.engine.read().await;
    let members = engine
        .group(&id)?
        .members_sorted()
        .into_iter()
        .map(|member| MemberView {
            id: member.id,
            name: member.name.clone(),
        })
        .collect();

    Ok(Json(MembersResponse { members }))
}

/// Handle requests for adding a member to a group
pub async fn add(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MemberNew>,
) -> Result<Json<MemberCreated>, ServerError> {
    let mut engine = state.engine.write().await;
    let member_id = engine.add_member(&id, &payload.name).await?;

    Ok(Json(MemberCreated { id: member_id }))
}
