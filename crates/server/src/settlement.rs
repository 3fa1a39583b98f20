//! Group settlement endpoint

use api_types::settlement::{SettlementResponse, TransferView};
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{ServerError, server::ServerState};

/// Handle requests for the settlement plan, with payer and payee resolved
/// to display names.
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<SettlementResponse>, ServerError> {
    let engine = state.engine.read().await;
    let group = engine.group(&id)?;
    let summary = engine.summary(&id)?;

    let settlements = summary
        .settlements
        .iter()
        .map(|transfer| {
            Ok(TransferView {
                from: group.member(transfer.from)?.name.clone(),
                to: group.member(transfer.to)?.name.clone(),
                amount_minor: transfer.amount.minor(),
            })
        })
        .collect::<Result<Vec<_>, ServerError>>()?;

    Ok(Json(SettlementResponse { settlements }))
}
