//! Request logging middleware configuration

use axum::{body::Body, Router};
use http::{Request, Response, StatusCode};
use std::time::Duration;
use tower_http::{classify::ServerErrorsFailureClass, trace::TraceLayer};
use tracing::{info_span, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResponseLogLevel {
    Info,
    Warn,
    Skip,
}

// Server errors are reported once, by the failure hook.
fn response_log_level(status: StatusCode) -> ResponseLogLevel {
    if status.is_server_error() {
        ResponseLogLevel::Skip
    } else if status.is_client_error() {
        ResponseLogLevel::Warn
    } else {
        ResponseLogLevel::Info
    }
}

/// Wraps `router` in a span per request and logs each response by status
/// class.
pub fn with_request_logging<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|request: &Request<Body>| {
                info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            })
            .on_request(|request: &Request<Body>, _span: &Span| {
                tracing::debug!(
                    "started processing request {} {}",
                    request.method(),
                    request.uri().path()
                );
            })
            .on_response(|response: &Response<Body>, latency: Duration, _span: &Span| {
                let status = response.status().as_u16();
                let latency_ms = latency.as_millis();

                match response_log_level(response.status()) {
                    ResponseLogLevel::Info => {
                        tracing::info!(status, latency_ms, "request completed");
                    }
                    ResponseLogLevel::Warn => {
                        tracing::warn!(status, latency_ms, "client error response");
                    }
                    ResponseLogLevel::Skip => {}
                }
            })
            .on_failure(
                |error: ServerErrorsFailureClass, latency: Duration, _span: &Span| {
                    tracing::error!(
                        latency_ms = latency.as_millis(),
                        error = ?error,
                        "request failed"
                    );
                },
            ),
    )
}
