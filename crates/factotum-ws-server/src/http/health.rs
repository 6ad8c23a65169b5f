// SPDX-License-Identifier: Apache-2.0

use std::sync::atomic::Ordering;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use factotum_ws_api::ApiError;
use factotum_ws_query::missing_tables;
use serde_json::json;
use tracing::warn;

use crate::http::request_context::RequestContext;
use crate::AppState;

pub(crate) async fn healthz_handler() -> Response {
    (StatusCode::OK, Json(json!({"status": "ok"}))).into_response()
}

/// Ready once draining has not started, the database opens and every
/// required table is present.
pub(crate) async fn readyz_handler(State(state): State<AppState>, ctx: RequestContext) -> Response {
    if !state.ready.load(Ordering::Relaxed) {
        return ctx.respond(Err(ApiError::not_ready(json!({"reason": "draining"}))));
    }
    let result = match state.db.run(|conn| missing_tables(conn)).await {
        Ok(missing) if missing.is_empty() => {
            Ok((StatusCode::OK, Json(json!({"status": "ready"}))).into_response())
        }
        Ok(missing) => {
            warn!(missing_tables = ?missing, "database schema incomplete");
            Err(ApiError::not_ready(json!({"missing_tables": missing})))
        }
        Err(e) => {
            warn!(error = %e, "database not reachable");
            let details = if state.api.debug {
                json!({"cause": e.to_string()})
            } else {
                json!({})
            };
            Err(ApiError::not_ready(details))
        }
    };
    ctx.respond(result)
}
