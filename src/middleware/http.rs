//! HTTP-level middleware (cross-cutting concerns).
//!
//! This module is for transport concerns of the invoke host that apply to every
//! route. The gate itself never sees any of this.
//!
//! Responsibility:
//! - Request-Id generation + propagation (X-Request-Id)
//! - Access logging / request tracing (TraceLayer), with the request id on the span
//! - Body size limits
//! - Global timeouts
//!
//! Notes:
//! - Limits come from `Config` (`BODY_LIMIT_BYTES`, `REQUEST_TIMEOUT_SECONDS`).
//! - Verdict / redirect logs emitted inside the gate are recorded under the
//!   request span, so one invocation can be followed by its `request_id`.

use axum::Router;
use axum::body::Body;
use axum::error_handling::HandleErrorLayer;
use axum::http::{Request, StatusCode, header::HeaderName};
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::config::Config;

const REQUEST_ID_HEADER: &str = "x-request-id";

// Span for one host request. The id is set by `SetRequestIdLayer` before this runs.
fn make_span(req: &Request<Body>) -> Span {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "invocation",
        method = %req.method(),
        path = %req.uri().path(),
        request_id = %request_id,
    )
}

/// Apply HTTP-level middleware to the given Router.
///
/// Layer order (outermost first):
/// error mapping → request id → id propagation → trace → body limit → timeout
pub fn apply(router: Router, config: &Config) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    let layers = ServiceBuilder::new()
        // Make the service error `Infallible` by converting errors into responses.
        .layer(HandleErrorLayer::new(|err: BoxError| async move {
            if err.is::<tower::timeout::error::Elapsed>() {
                StatusCode::REQUEST_TIMEOUT
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }))
        // Generate a request id if missing, then echo it on the response.
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        // Sits outside the body limit so the span sees the raw `Request<Body>`.
        .layer(TraceLayer::new_for_http().make_span_with(make_span))
        // Viewer-request events are small; anything larger is not an event.
        .layer(RequestBodyLimitLayer::new(config.body_limit_bytes))
        // The gate is pure computation; only the settings lookup can stall.
        .layer(TimeoutLayer::new(config.request_timeout));

    router.layer(layers)
}
