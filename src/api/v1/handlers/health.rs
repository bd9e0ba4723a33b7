/*
 * Responsibility
 * - GET /health (疎通用)
 * - settings は読まない (secret の有無に関係なく ok を返す)
 */
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let router = state.gate.router();
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
            "cookie": router.cookie_name(),
            "leeway_seconds": router.leeway_seconds(),
        })),
    )
}
