// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ApiErrorCode {
    InvalidQueryParameter,
    NotFound,
    Timeout,
    NotReady,
    Internal,
    DisallowedHost,
}

pub const API_ERROR_CODES: [&str; 6] = [
    "InvalidQueryParameter",
    "NotFound",
    "Timeout",
    "NotReady",
    "Internal",
    "DisallowedHost",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub details: Value,
    pub request_id: String,
}

impl ApiError {
    #[must_use]
    pub fn new(
        code: ApiErrorCode,
        message: impl Into<String>,
        details: Value,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            request_id: request_id.into(),
        }
    }

    #[must_use]
    pub fn invalid_param(name: &str, value: &str, reason: &str) -> Self {
        Self::new(
            ApiErrorCode::InvalidQueryParameter,
            format!("invalid query parameter: {name}"),
            json!({"field_errors":[{"parameter": name, "reason": reason, "value": value}]}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::NotFound, message, json!({}), "req-unknown")
    }

    #[must_use]
    pub fn internal(details: Value) -> Self {
        Self::new(
            ApiErrorCode::Internal,
            "internal server error",
            details,
            "req-unknown",
        )
    }

    #[must_use]
    pub fn timeout() -> Self {
        Self::new(
            ApiErrorCode::Timeout,
            "database query timed out",
            json!({}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn not_ready(details: Value) -> Self {
        Self::new(
            ApiErrorCode::NotReady,
            "service not ready",
            details,
            "req-unknown",
        )
    }

    #[must_use]
    pub fn disallowed_host(host: &str) -> Self {
        Self::new(
            ApiErrorCode::DisallowedHost,
            format!("invalid HTTP_HOST header: {host}"),
            json!({}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }
}

const _: fn() = || {
    fn assert_traits<T: Serialize + for<'de> Deserialize<'de>>() {}
    assert_traits::<ApiErrorCode>();
    assert_traits::<ApiError>();
};
