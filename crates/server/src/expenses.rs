//! Expense API endpoints

use api_types::expense::{
    ExpenseCreated, ExpenseNew, ExpenseUpdate, ExpenseView, ExpensesResponse,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::Money;
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

/// Handle requests for listing the expenses of a group
pub async fn list(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<ExpensesResponse>, ServerError> {
    let engine = state.engine.read().await;
    let expenses = engine
        .group(&id)?
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

    Ok(Json(ExpensesResponse { expenses }))
}

/// Handle requests for recording a new expense
pub async fn create(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ExpenseNew>,
) -> Result<Json<ExpenseCreated>, ServerError> {
    let mut engine = state.engine.write().await;
    let expense_id = engine
        .add_expense(
            &id,
            &payload.title,
            Money::new(payload.amount_minor),
            payload.paid_by,
        )
        .await?;

    Ok(Json(ExpenseCreated { id: expense_id }))
}

/// Handle requests for updating an expense
pub async fn update(
    State(state): State<ServerState>,
    Path((id, expense_id)): Path<(String, Uuid)>,
    Json(payload): Json<ExpenseUpdate>,
) -> Result<StatusCode, ServerError> {
    let mut engine = state.engine.write().await;
    engine
        .update_expense(
            &id,
            expense_id,
            &payload.title,
            Money::new(payload.amount_minor),
            payload.paid_by,
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Handle requests for deleting an expense
pub async fn delete(
    State(state): State<ServerState>,
    Path((id, expense_id)): Path<(String, Uuid)>,
) -> Result<StatusCode, ServerError> {
    let mut engine = state.engine.write().await;
    engine.delete_expense(&id, expense_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
