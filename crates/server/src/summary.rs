//! Group summary endpoint

use api_types::summary::{BalanceView, SummaryResponse};
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{ServerError, server::ServerState};

/// Handle requests for the group summary: total spend, per-person share
/// and per-member balances.
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<SummaryResponse>, ServerError> {
    let engine = state.engine.read().await;
    let group = engine.group(&id)?;
    let summary = engine.summary(&id)?;

    let balances = summary
        .balances
        .iter()
        .map(|row| {
            let member = group.member(row.member_id)?;
            Ok(BalanceView {
                member_id: row.member_id,
                name: member.name.clone(),
                paid_minor: row.paid.minor(),
                share_minor: row.share.minor(),
                balance_minor: row.balance.minor(),
            })
        })
        .collect::<Result<Vec<_>, ServerError>>()?;

    Ok(Json(SummaryResponse {
        total_minor: summary.total.minor(),
        per_person_minor: summary.per_person.minor(),
        balances,
    }))
}
