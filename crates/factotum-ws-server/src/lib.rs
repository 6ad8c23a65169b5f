// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

//! Read-only HTTP service over a Factotum SQLite snapshot.

use std::sync::atomic::{AtomicBool, AtomicU64};
use std::sync::Arc;

mod config;
mod db;
mod http;
mod middleware;
mod runtime;

pub use config::{
    validate_startup_config_contract, ApiConfig, ConfigError, DatabaseConfig, DEFAULT_BIND,
    DEFAULT_DATABASE,
};
pub use db::{Database, DbError};
pub use runtime::server_runtime_app::build_router;

pub const CRATE_NAME: &str = "factotum-ws-server";

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<ApiConfig>,
    pub db: Arc<Database>,
    /// Cleared when shutdown drain begins.
    pub ready: Arc<AtomicBool>,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}
