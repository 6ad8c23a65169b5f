// SPDX-License-Identifier: Apache-2.0

use std::sync::atomic::{AtomicBool, AtomicU64};
use std::sync::Arc;

use axum::handler::Handler;
use axum::http::{HeaderValue, Method};
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

use crate::config::ApiConfig;
use crate::db::Database;
use crate::http::{docs, handlers, health};
use crate::middleware::allowed_hosts::allowed_hosts_middleware;
use crate::middleware::request_tracing::request_tracing_middleware;
use crate::AppState;

impl AppState {
    #[must_use]
    pub fn new(api: ApiConfig, db: Database) -> Self {
        Self {
            api: Arc::new(api),
            db: Arc::new(db),
            ready: Arc::new(AtomicBool::new(true)),
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

/// Registers `path` and its form without the trailing slash.
fn resource<H, T>(router: Router<AppState>, path: &str, handler: H) -> Router<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    router
        .route(path, get(handler.clone()))
        .route(path.trim_end_matches('/'), get(handler))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods([Method::GET, Method::HEAD, Method::OPTIONS]);
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "ignoring unparsable CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(parsed))
}

pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(docs::docs_page_handler))
        .route("/healthz", get(health::healthz_handler))
        .route("/readyz", get(health::readyz_handler));
    router = resource(router, "/openapi/", docs::openapi_handler);
    router = resource(router, "/pucs/", handlers::list_pucs_handler);
    router = resource(router, "/pucs/:id/", handlers::puc_detail_handler);
    router = resource(router, "/products/", handlers::list_products_handler);
    router = resource(router, "/products/:id/", handlers::product_detail_handler);
    router = resource(router, "/chemicals/", handlers::list_chemicals_handler);
    router = resource(
        router,
        "/chemicals/distinct/:attribute/",
        handlers::distinct_chemicals_handler,
    );
    router = resource(router, "/chemicals/:id_or_code/", handlers::chemical_detail_handler);
    router = resource(router, "/documents/", handlers::list_documents_handler);
    router = resource(router, "/documents/:id/", handlers::document_detail_handler);
    router = resource(router, "/chemicalpresences/", handlers::list_presences_handler);
    router = resource(
        router,
        "/chemicalpresences/:id/",
        handlers::presence_detail_handler,
    );

    let cors = cors_layer(&state.api.cors_allowed_origins);
    router
        .fallback(handlers::not_found_handler)
        .layer(from_fn_with_state(state.clone(), allowed_hosts_middleware))
        .layer(from_fn_with_state(state.clone(), request_tracing_middleware))
        .layer(cors)
        .with_state(state)
}
