use axum::{
    Router,
    routing::{get, post},
};
use tokio::sync::RwLock;

use std::sync::Arc;

use crate::{expenses, groups, members, settlement, summary};
use engine::Engine;

/// Shared handler state.
///
/// The engine sits behind a `RwLock` so mutations are serialized against
/// summary/settlement reads: a query never observes a partially applied
/// mutation.
#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<RwLock<Engine>>,
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/groups", post(groups::create).get(groups::list))
        .route(
            "/groups/{id}",
            get(groups::detail)
                .patch(groups::rename)
                .delete(groups::delete),
        )
        .route(
            "/groups/{id}/members",
            get(members::list).post(members::add),
        )
        .route(
            "/groups/{id}/expenses",
            get(expenses::list).post(expenses::create),
        )
        .route(
            "/groups/{id}/expenses/{expense_id}",
            axum::routing::patch(expenses::update).delete(expenses::delete),
        )
        .route("/groups/{id}/summary", get(summary::get))
        .route("/groups/{id}/settlement", get(settlement::get))
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(RwLock::new(engine)),
    };

    axum::serve(listener, router(state)).await
}
