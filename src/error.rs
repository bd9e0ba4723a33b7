/*
 * Responsibility
 * - ホスト共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - GateError (settings / event) を統一的に変換
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::gate::GateError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid event: {0}")]
    InvalidEvent(String),
    // Parameter names stay in the logs, not in the response.
    #[error("gate settings unavailable")]
    SettingsUnavailable,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::InvalidEvent(_) => (StatusCode::BAD_REQUEST, "INVALID_EVENT"),
            AppError::SettingsUnavailable => {
                (StatusCode::INTERNAL_SERVER_ERROR, "SETTINGS_UNAVAILABLE")
            }
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code,
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<GateError> for AppError {
    fn from(e: GateError) -> Self {
        match e {
            GateError::Event(e) => AppError::InvalidEvent(e.to_string()),
            GateError::Settings(_) => AppError::SettingsUnavailable,
        }
    }
}
