// SPDX-License-Identifier: Apache-2.0

use axum::extract::State;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE, ETAG, IF_NONE_MATCH};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use factotum_ws_api::{openapi_spec, ApiError, OPENAPI_PATH};
use factotum_ws_core::{stable_hash_hex, stable_json_bytes};
use serde_json::json;

use crate::http::request_context::{request_origin, RequestContext};
use crate::AppState;

const REDOC_TEMPLATE: &str = include_str!("../../templates/redoc.html");

fn if_none_match(headers: &HeaderMap) -> Option<&str> {
    headers.get(IF_NONE_MATCH).and_then(|v| v.to_str().ok())
}

/// Servers and code samples point at the origin the client used.
pub(crate) async fn openapi_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    ctx: RequestContext,
) -> Response {
    let origin = request_origin(&headers, state.api.public_base_url.as_deref());
    let document = openapi_spec(&origin, &state.api.page_limits);
    let bytes = match stable_json_bytes(&document) {
        Ok(bytes) => bytes,
        Err(e) => {
            let details = if state.api.debug {
                json!({"cause": e.to_string()})
            } else {
                json!({})
            };
            return ctx.respond(Err(ApiError::internal(details)));
        }
    };
    let etag = format!("\"{}\"", stable_hash_hex(&bytes));

    let mut resp = if if_none_match(&headers) == Some(etag.as_str()) {
        StatusCode::NOT_MODIFIED.into_response()
    } else {
        (
            [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
            bytes,
        )
            .into_response()
    };
    if let Ok(value) = HeaderValue::from_str(&etag) {
        resp.headers_mut().insert(ETAG, value);
    }
    resp.headers_mut()
        .insert(CACHE_CONTROL, HeaderValue::from_static("public, max-age=300"));
    resp
}

pub(crate) async fn docs_page_handler(State(state): State<AppState>) -> Html<String> {
    let spec_url = match state.api.public_base_url.as_deref() {
        Some(base) => format!("{}{OPENAPI_PATH}", base.trim_end_matches('/')),
        None => OPENAPI_PATH.to_string(),
    };
    Html(REDOC_TEMPLATE.replace("{{OPENAPI_URL}}", &spec_url))
}
