// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use std::env;
use std::fs;
use std::path::PathBuf;

use factotum_ws_query::PageLimits;

const DEFAULT_BASE_URL: &str = "http://localhost:8001";

fn main() -> Result<(), String> {
    let mut out: Option<PathBuf> = None;
    let mut base_url = DEFAULT_BASE_URL.to_string();
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => out = args.next().map(PathBuf::from),
            "--base-url" => {
                base_url = args
                    .next()
                    .ok_or_else(|| "missing value for --base-url".to_string())?;
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    let out = out.ok_or_else(|| "missing --out <path>".to_string())?;

    let spec = factotum_ws_api::openapi_spec(&base_url, &PageLimits::default());
    let bytes = factotum_ws_core::stable_json_bytes(&spec).map_err(|e| e.to_string())?;
    if let Some(parent) = out.parent() {
        fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }
    fs::write(&out, bytes).map_err(|e| e.to_string())?;
    println!("wrote OpenAPI spec: {}", out.display());
    Ok(())
}
