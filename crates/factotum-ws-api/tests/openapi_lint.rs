// SPDX-License-Identifier: Apache-2.0

use factotum_ws_api::{openapi_spec, API_ERROR_CODES};
use factotum_ws_core::{stable_json_bytes, stable_json_hash_hex};
use factotum_ws_query::PageLimits;
use serde_json::Value;

const BASE: &str = "https://api.example.org";

fn spec() -> Value {
    openapi_spec(BASE, &PageLimits::default())
}

fn assert_sorted_object(value: &Value) {
    let object = value.as_object().expect("json object");
    let observed = object.keys().map(String::as_str).collect::<Vec<_>>();
    let mut sorted = observed.clone();
    sorted.sort_unstable();
    assert_eq!(observed, sorted);
}

#[test]
fn openapi_paths_and_component_schemas_are_sorted() {
    let spec = spec();
    assert_sorted_object(spec.get("paths").expect("paths"));
    assert_sorted_object(&spec["components"]["schemas"]);
}

#[test]
fn every_resource_route_is_documented() {
    let spec = spec();
    for path in [
        "/pucs/",
        "/pucs/{id}/",
        "/products/",
        "/products/{id}/",
        "/chemicals/",
        "/chemicals/{id_or_code}/",
        "/chemicals/distinct/{attribute}/",
        "/documents/",
        "/documents/{id}/",
        "/chemicalpresences/",
        "/chemicalpresences/{id}/",
    ] {
        assert!(spec["paths"][path]["get"].is_object(), "{path}");
    }
    assert_eq!(spec["info"]["title"], "Factotum Web Services");
    assert_eq!(spec["info"]["version"], "v0");
}

#[test]
fn list_operations_document_paging_and_envelope() {
    let spec = spec();
    let op = &spec["paths"]["/products/"]["get"];
    let names: Vec<&str> = op["parameters"]
        .as_array()
        .expect("parameters")
        .iter()
        .map(|p| p["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, vec!["chemical", "upc", "puc", "page", "page_size"]);
    let page_size = &op["parameters"][4]["schema"];
    assert_eq!(page_size["default"], 100);
    assert_eq!(page_size["maximum"], 500);

    let body = &op["responses"]["200"]["content"]["application/json"]["schema"];
    assert!(body["properties"]["paging"].is_object());
    assert!(body["properties"]["meta"]["properties"]["count"].is_object());
    assert_eq!(
        body["properties"]["paging"]["properties"]["links"]["properties"]["last"]["example"],
        "https://api.example.org/products/?page=4"
    );
    assert!(op["description"]
        .as_str()
        .expect("description")
        .ends_with("paginated response of these objects."));
}

#[test]
fn operations_carry_code_samples_with_expanded_paths() {
    let spec = spec();
    let samples = spec["paths"]["/pucs/{id}/"]["get"]["x-code-samples"]
        .as_array()
        .expect("samples");
    let langs: Vec<&str> = samples
        .iter()
        .map(|s| s["lang"].as_str().expect("lang"))
        .collect();
    assert_eq!(langs, vec!["Python", "Shell", "Ruby", "R"]);
    assert_eq!(samples[1]["source"], "curl \"https://api.example.org/pucs/1/\"");
}

#[test]
fn api_error_schema_is_closed() {
    let spec = spec();
    let api_error = &spec["components"]["schemas"]["ApiError"];
    assert_eq!(api_error["additionalProperties"], Value::Bool(false));
    let required = api_error["required"]
        .as_array()
        .expect("required")
        .iter()
        .map(|v| v.as_str().expect("string"))
        .collect::<Vec<_>>();
    assert_eq!(required, vec!["code", "message", "details", "request_id"]);
    let codes = spec["components"]["schemas"]["ApiErrorCode"]["enum"]
        .as_array()
        .expect("enum")
        .len();
    assert_eq!(codes, API_ERROR_CODES.len());
}

#[test]
fn canonical_bytes_are_deterministic() {
    let a = stable_json_bytes(&spec()).expect("bytes a");
    let b = stable_json_bytes(&spec()).expect("bytes b");
    assert_eq!(a, b);
    assert_eq!(
        stable_json_hash_hex(&spec()).expect("hash").len(),
        64
    );
}
