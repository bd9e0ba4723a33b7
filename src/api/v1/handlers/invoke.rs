/*
 * Responsibility
 * - POST /invoke: viewer-request event を受け取り、gate の判定結果を返す
 * - 現在時刻はここで一度だけ読む (gate 本体には注入する)
 * - body の JSON rejection も AppError (INVALID_EVENT) に揃える
 */
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use chrono::Utc;

use crate::edge::{EdgeEvent, HandlerOutput};
use crate::error::AppError;
use crate::state::AppState;

pub async fn invoke(
    State(state): State<AppState>,
    payload: Result<Json<EdgeEvent>, JsonRejection>,
) -> Result<Json<HandlerOutput>, AppError> {
    let Json(event) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection, "rejected invocation payload");
        AppError::InvalidEvent(rejection.body_text())
    })?;

    let now = Utc::now().timestamp();
    let distribution_id = event.distribution_id().map(str::to_owned);

    let output = state
        .gate
        .handle_event(state.settings.as_ref(), event, now)
        .map_err(|err| {
            tracing::warn!(
                error = %err,
                distribution_id = distribution_id.as_deref(),
                "invocation failed"
            );
            AppError::from(err)
        })?;

    Ok(Json(output))
}
