// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

pub mod canonical;
pub mod env;

pub use canonical::{stable_hash_hex, stable_json_bytes, stable_json_hash_hex};
pub use env::{parse_bool, EnvLookup, ENV_PREFIX, FALSE_VALUES, TRUE_VALUES};

pub const CRATE_NAME: &str = "factotum-ws-core";
