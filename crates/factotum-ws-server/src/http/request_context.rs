// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use axum::extract::{FromRequestParts, Path, Query};
use axum::http::request::Parts;
use axum::http::{HeaderMap, Uri};
use axum::response::Response;
use factotum_ws_api::{query_map, ApiError, RequestUrl};

use crate::http::handlers::NO_MATCH;
use crate::http::request_tracing::{extract_request_trace, RequestTrace};
use crate::http::response_contract::api_error_response;
use crate::AppState;

/// What every handler needs from the request besides path parameters.
#[derive(Debug, Clone)]
pub(crate) struct RequestContext {
    pub request_id: String,
    pub query: BTreeMap<String, String>,
    pub url: RequestUrl,
}

fn request_id(parts: &Parts, state: &AppState) -> String {
    match parts.extensions.get::<RequestTrace>() {
        Some(trace) => trace.request_id.clone(),
        None => extract_request_trace(&parts.headers, state).request_id,
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for RequestContext {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let request_id = request_id(parts, state);
        let pairs = query_pairs(&parts.uri)
            .map_err(|err| api_error_response(err.with_request_id(&request_id)))?;
        let origin = request_origin(&parts.headers, state.api.public_base_url.as_deref());
        Ok(Self {
            request_id,
            query: query_map(&pairs),
            url: RequestUrl::new(&origin, parts.uri.path(), pairs),
        })
    }
}

impl RequestContext {
    pub(crate) fn respond(&self, result: Result<Response, ApiError>) -> Response {
        match result {
            Ok(response) => response,
            Err(err) => api_error_response(err.with_request_id(&self.request_id)),
        }
    }
}

/// The single path parameter of a detail route. Segments that do not decode
/// name no resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PathSegment(pub String);

#[axum::async_trait]
impl FromRequestParts<AppState> for PathSegment {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(segment)) => Ok(Self(segment)),
            Err(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "undecodable path segment");
                Err(api_error_response(
                    ApiError::not_found(NO_MATCH)
                        .with_request_id(request_id(parts, state)),
                ))
            }
        }
    }
}

fn sent_replacement_character(raw: &str) -> bool {
    raw.contains(char::REPLACEMENT_CHARACTER) || raw.to_ascii_uppercase().contains("%EF%BF%BD")
}

/// Form-decoded query pairs in request order. Escapes that do not decode to
/// UTF-8 are rejected rather than replaced.
pub(crate) fn query_pairs(uri: &Uri) -> Result<Vec<(String, String)>, ApiError> {
    let raw = uri.query().unwrap_or_default();
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri)
        .map_err(|e| ApiError::invalid_param("query", raw, &e.body_text()))?;
    let lossy = pairs.iter().find(|(k, v)| {
        k.contains(char::REPLACEMENT_CHARACTER) || v.contains(char::REPLACEMENT_CHARACTER)
    });
    match lossy {
        Some((name, _)) if !sent_replacement_character(raw) => Err(ApiError::invalid_param(
            name,
            raw,
            "invalid percent-encoding: not UTF-8",
        )),
        _ => Ok(pairs),
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// `scheme://host` for absolute links. A configured public base URL wins.
#[must_use]
pub(crate) fn request_origin(headers: &HeaderMap, public_base_url: Option<&str>) -> String {
    if let Some(base) = public_base_url {
        return base.trim_end_matches('/').to_string();
    }
    let scheme = header_str(headers, "x-forwarded-proto")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| matches!(*v, "http" | "https"))
        .unwrap_or("http");
    let host = header_str(headers, "host").unwrap_or("localhost");
    format!("{scheme}://{host}")
}
