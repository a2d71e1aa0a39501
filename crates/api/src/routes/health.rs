use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    open_views: usize,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let open_views = state.users.count().await + state.roles.count().await;
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        open_views,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
