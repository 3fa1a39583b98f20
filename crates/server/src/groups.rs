//! Group API endpoints

use api_types::group::{GroupCreated, GroupDetail, GroupNew, GroupRename, GroupView, GroupsResponse};
use api_types::{expense::ExpenseView, member::MemberView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};

/// Handle requests for creating a new `Group`
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<GroupNew>,
) -> Result<Json<GroupCreated>, ServerError> {
    let mut engine = state.engine.write().await;
    let id = engine.new_group(&payload.name).await?;

    Ok(Json(GroupCreated { id }))
}

/// Handle requests for listing all groups
pub async fn list(State(state): State<ServerState>) -> Json<GroupsResponse> {
    let engine = state.engine.read().await;
    let groups = engine
        .groups()
        .into_iter()
        .map(|group| GroupView {
            id: group.id.clone(),
            name: group.name.clone(),
            created_at: group.created_at,
        })
        .collect();

    Json(GroupsResponse { groups })
}

/// Handle requests for a single group with nested members and expenses
pub async fn detail(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<GroupDetail>, ServerError> {
    let engine = state.engine.read().await;
    let group = engine.group(&id)?;

    let members = group
        .members_sorted()
        .into_iter()
        .map(|member| MemberView {
            id: member.id,
            name: member.name.clone(),
        })
        .collect();
    let expenses = group
        .expenses_sorted()
        .into_iter()
        .map(|expense| ExpenseView {
            id: expense.id,
            title: expense.title.clone(),
            amount_minor: expense.amount.minor(),
            paid_by: expense.paid_by,
            created_at: expense.created_at,
        })
        .collect();

    Ok(Json(GroupDetail {
        id: group.id.clone(),
        name: group.name.clone(),
        created_at: group.created_at,
        members,
        expenses,
    }))
}

/// Handle requests for renaming a group
pub async fn rename(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<GroupRename>,
) -> Result<StatusCode, ServerError> {
    let mut engine = state.engine.write().await;
    engine.rename_group(&id, &payload.name).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Handle requests for deleting a group (cascades to members and expenses)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    let mut engine = state.engine.write().await;
    engine.delete_group(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
