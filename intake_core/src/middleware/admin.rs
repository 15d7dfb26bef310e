//! Shared-secret gate in front of the admin routes

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Query, Request, State},
    http::{HeaderMap, Uri},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;
use subtle::ConstantTimeEq;

pub const ADMIN_PASS_HEADER: &str = "x-admin-pass";

#[derive(Clone)]
pub struct AdminGate {
    secret: Arc<str>,
}

impl AdminGate {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self { secret: secret.into() }
    }

    /// Exact match against the configured secret, compared in constant time.
    pub fn verify(&self, presented: &str) -> bool {
        bool::from(presented.as_bytes().ct_eq(self.secret.as_bytes()))
    }
}

#[derive(Debug, Deserialize)]
struct PassQuery {
    pass: Option<String>,
}

/// The `X-Admin-Pass` header wins; the `pass` query parameter is consulted
/// only when the header is absent or empty.
pub fn presented_credential(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    let from_header = headers
        .get(ADMIN_PASS_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty());

    if let Some(value) = from_header {
        return Some(value.to_string());
    }

    Query::<PassQuery>::try_from_uri(uri)
        .ok()
        .and_then(|Query(query)| query.pass)
}

pub async fn require_admin_pass(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let presented = presented_credential(request.headers(), request.uri());

    match presented {
        Some(pass) if state.admin.verify(&pass) => Ok(next.run(request).await),
        _ => {
            tracing::warn!(
                method = %request.method(),
                path = %request.uri().path(),
                "rejected admin request"
            );
            Err(AppError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_verify() {
        let gate = AdminGate::new("s3cret");
        assert!(gate.verify("s3cret"));
        assert!(!gate.verify("s3cre"));
        assert!(!gate.verify("s3cret "));
        assert!(!gate.verify("S3CRET"));
        assert!(!gate.verify(""));
    }

    #[test]
    fn test_credential_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert(ADMIN_PASS_HEADER, HeaderValue::from_static("from-header"));
        let uri: Uri = "/admin/bookings?pass=from-query".parse().unwrap();

        assert_eq!(presented_credential(&headers, &uri).as_deref(), Some("from-header"));
    }

    #[test]
    fn test_credential_from_query() {
        let headers = HeaderMap::new();
        let uri: Uri = "/admin/bookings?pass=p%40ss%20word".parse().unwrap();
        assert_eq!(presented_credential(&headers, &uri).as_deref(), Some("p@ss word"));

        let uri: Uri = "/admin/bookings".parse().unwrap();
        assert_eq!(presented_credential(&headers, &uri), None);
    }

    #[test]
    fn test_empty_header_falls_back_to_query() {
        let mut headers = HeaderMap::new();
        headers.insert(ADMIN_PASS_HEADER, HeaderValue::from_static(""));
        let uri: Uri = "/admin/bookings?pass=from-query".parse().unwrap();

        assert_eq!(presented_credential(&headers, &uri).as_deref(), Some("from-query"));
    }
}
