// SPDX-License-Identifier: Apache-2.0

//! Environment lookup with the service prefix.
//!
//! Every setting is read as `FACTOTUM_WS_<KEY>` first and `<KEY>` second, so a
//! deployment can either namespace its variables or share bare names such as
//! `DATABASE` with sibling services.

use std::time::Duration;

pub const ENV_PREFIX: &str = "FACTOTUM_WS_";

pub const TRUE_VALUES: [&str; 7] = ["true", "True", "yes", "y", "1", "on", "ok"];
pub const FALSE_VALUES: [&str; 5] = ["false", "no", "n", "0", "off"];

/// Case-insensitive boolean parse over the accepted true/false spellings.
#[must_use]
pub fn parse_bool(raw: &str) -> Option<bool> {
    let v = raw.trim();
    if TRUE_VALUES.iter().any(|t| t.eq_ignore_ascii_case(v)) {
        Some(true)
    } else if FALSE_VALUES.iter().any(|f| f.eq_ignore_ascii_case(v)) {
        Some(false)
    } else {
        None
    }
}

pub struct EnvLookup<F> {
    source: F,
}

impl EnvLookup<fn(&str) -> Option<String>> {
    #[must_use]
    pub fn process() -> Self {
        fn read(name: &str) -> Option<String> {
            std::env::var(name).ok()
        }
        Self { source: read }
    }
}

impl<F> EnvLookup<F>
where
    F: Fn(&str) -> Option<String>,
{
    pub fn from_fn(source: F) -> Self {
        Self { source }
    }

    /// Prefixed name wins; blank values count as unset.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let prefixed = format!("{ENV_PREFIX}{key}");
        let found = [prefixed.as_str(), key]
            .into_iter()
            .filter_map(|name| (self.source)(name))
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty());
        found
    }

    #[must_use]
    pub fn string(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    #[must_use]
    pub fn bool(&self, key: &str, default: bool) -> bool {
        self.get(key)
            .and_then(|v| parse_bool(&v))
            .unwrap_or(default)
    }

    #[must_use]
    pub fn u64(&self, key: &str, default: u64) -> u64 {
        self.get(key)
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(default)
    }

    #[must_use]
    pub fn usize(&self, key: &str, default: usize) -> usize {
        self.get(key)
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(default)
    }

    #[must_use]
    pub fn i64(&self, key: &str, default: i64) -> i64 {
        self.get(key)
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(default)
    }

    #[must_use]
    pub fn duration_ms(&self, key: &str, default_ms: u64) -> Duration {
        Duration::from_millis(self.u64(key, default_ms))
    }

    /// Comma separated list, empty items dropped.
    #[must_use]
    pub fn list(&self, key: &str) -> Vec<String> {
        self.get(key)
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect()
    }
}
