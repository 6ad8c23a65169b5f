// SPDX-License-Identifier: Apache-2.0

use axum::body::Body;
use axum::extract::State;
use axum::http::header::HOST;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use factotum_ws_api::ApiError;

use crate::http::request_tracing::RequestTrace;
use crate::http::response_contract::api_error_response;
use crate::AppState;

/// Host without port, lowercased. Bracketed IPv6 literals keep their brackets.
fn host_name(raw: &str) -> String {
    let raw = raw.trim();
    let host = if raw.starts_with('[') {
        raw.split_once(']')
            .map_or(raw, |(h, _)| &raw[..=h.len()])
    } else {
        raw.rsplit_once(':').map_or(raw, |(h, _)| h)
    };
    host.to_ascii_lowercase()
}

/// `*` matches anything; a leading dot matches the domain and its subdomains.
#[must_use]
pub(crate) fn host_allowed(host: &str, allowed: &[String]) -> bool {
    if allowed.is_empty() {
        return true;
    }
    let host = host_name(host);
    allowed.iter().any(|pattern| {
        let pattern = pattern.to_ascii_lowercase();
        if pattern == "*" {
            true
        } else if let Some(domain) = pattern.strip_prefix('.') {
            host == domain || host.ends_with(&pattern)
        } else {
            host == pattern
        }
    })
}

pub(crate) async fn allowed_hosts_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if state.api.allowed_hosts.is_empty() {
        return next.run(request).await;
    }
    let host = request
        .headers()
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if host_allowed(&host, &state.api.allowed_hosts) {
        return next.run(request).await;
    }
    let request_id = request
        .extensions()
        .get::<RequestTrace>()
        .map(|t| t.request_id.clone())
        .unwrap_or_else(|| "req-unknown".to_string());
    api_error_response(ApiError::disallowed_host(&host).with_request_id(request_id))
}
