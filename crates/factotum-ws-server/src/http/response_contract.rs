// SPDX-License-Identifier: Apache-2.0

use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use factotum_ws_api::{map_error, ApiError, ApiErrorCode};
use factotum_ws_query::QueryErrorCode;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::db::DbError;

pub(crate) fn api_error_response(err: ApiError) -> Response {
    let status = StatusCode::from_u16(map_error(&err).status_code)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(
            code = ?err.code,
            message = %err.message,
            status = status.as_u16(),
            "request failed"
        );
    } else {
        debug!(
            code = ?err.code,
            message = %err.message,
            status = status.as_u16(),
            "request rejected"
        );
    }
    let mut resp = (status, Json(json!({"error": err}))).into_response();
    if status == StatusCode::SERVICE_UNAVAILABLE {
        resp.headers_mut()
            .insert("retry-after", HeaderValue::from_static("3"));
    }
    resp
}

pub(crate) fn json_response<T: Serialize>(value: T) -> Response {
    Json(value).into_response()
}

fn cause(debug_errors: bool, cause: &str) -> Value {
    if debug_errors {
        json!({"cause": cause})
    } else {
        json!({})
    }
}

/// Internal causes reach the client only when debug errors are enabled.
#[must_use]
pub(crate) fn db_error_to_api(err: DbError, debug_errors: bool) -> ApiError {
    match err {
        DbError::Timeout => ApiError::timeout(),
        DbError::Query(q) => match q.code {
            QueryErrorCode::NotFound => ApiError::not_found(q.message),
            QueryErrorCode::Validation => ApiError::new(
                ApiErrorCode::InvalidQueryParameter,
                q.message,
                json!({}),
                "req-unknown",
            ),
            _ => {
                error!(error = %q, "query failed");
                ApiError::internal(cause(debug_errors, &q.message))
            }
        },
        other => {
            error!(error = %other, "database unavailable");
            ApiError::internal(cause(debug_errors, &other.to_string()))
        }
    }
}
