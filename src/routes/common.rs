//! Common routes: status and per-kind counts.

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize)]
struct StatusBody {
    status: &'static str,
}

async fn status() -> Json<StatusBody> {
    Json(StatusBody { status: "OK" })
}

async fn stats(State(state): State<AppState>) -> Result<Json<BTreeMap<&'static str, usize>>, AppError> {
    let mut counts = BTreeMap::new();
    for spec in state.kinds.iter() {
        counts.insert(spec.path_segment, state.storage.count(spec.kind).await?);
    }
    Ok(Json(counts))
}

/// GET /status, GET /stats.
pub fn common_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(status))
        .route("/stats", get(stats))
}
