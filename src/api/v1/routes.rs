/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health, /invoke
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::v1::handlers::{health::health, invoke::invoke};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/invoke", post(invoke))
}
