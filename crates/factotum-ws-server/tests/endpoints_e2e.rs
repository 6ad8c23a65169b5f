// SPDX-License-Identifier: Apache-2.0

mod e2e_support;

use e2e_support::*;
use factotum_ws_query::PageLimits;
use factotum_ws_server::ApiConfig;
use serde_json::{json, Value};

async fn fixture_app() -> (tempfile::TempDir, std::net::SocketAddr) {
    let dir = tempfile::tempdir().expect("tempdir");
    let db = fixture_db(dir.path());
    let addr = spawn_app(ApiConfig::default(), db).await;
    (dir, addr)
}

fn ids(body: &Value) -> Vec<i64> {
    body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|row| row["id"].as_i64().expect("id"))
        .collect()
}

#[tokio::test]
async fn puc_list_is_filtered_by_chemical_and_counts_products() {
    let (_dir, addr) = fixture_app().await;

    let (status, body) = get_json(addr, &format!("/pucs/?chemical={WATER}")).await;
    assert_eq!(status, 200);
    assert_eq!(body["meta"]["count"], 2);
    assert_eq!(ids(&body), vec![1, 2]);
    assert_eq!(body["data"][1]["num_products"], 2);

    let (_, body) = get_json(addr, "/pucs/1/").await;
    assert_eq!(
        body,
        json!({
            "id": 1,
            "level_1_category": "Personal care",
            "level_2_category": "hair styling and care",
            "level_3_category": "shampoo",
            "definition": "Shampoos.",
            "kind": "FO",
            "name": "Personal care - hair styling and care - shampoo",
            "num_products": 1
        })
    );
}

#[tokio::test]
async fn envelope_links_are_absolute_and_sorted() {
    let (_dir, addr) = fixture_app().await;

    let (status, body) = get_json(addr, "/chemicals/?page_size=2&page=2").await;
    assert_eq!(status, 200);
    let origin = format!("http://{addr}");
    assert_eq!(
        body["paging"],
        json!({
            "links": {
                "current": format!("{origin}/chemicals/?page=2&page_size=2"),
                "first": format!("{origin}/chemicals/?page_size=2"),
                "last": format!("{origin}/chemicals/?page=3&page_size=2"),
                "next": format!("{origin}/chemicals/?page=3&page_size=2"),
                "previous": format!("{origin}/chemicals/?page_size=2")
            },
            "page": 2,
            "pages": 3,
            "size": 2
        })
    );
    assert_eq!(body["meta"]["count"], 5);
    assert_eq!(ids(&body), vec![102, 103]);

    let (_, last) = get_json(addr, "/chemicals/?page_size=2&page=last").await;
    assert_eq!(last["paging"]["page"], 3);
    assert_eq!(last["paging"]["size"], 1);
    assert_eq!(last["paging"]["links"]["next"], Value::Null);
}

#[tokio::test]
async fn oversized_page_size_is_clamped() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db = write_db(dir.path(), &[factotum_ws_query::SCHEMA_SQL, MANY_PUCS_SQL]);
    let addr = spawn_app(ApiConfig::default(), db).await;

    let (status, body) = get_json(addr, "/pucs/?page_size=666").await;
    assert_eq!(status, 200);
    assert_eq!(body["meta"]["count"], 600);
    assert_eq!(body["paging"]["size"], 500);
    assert_eq!(body["paging"]["pages"], 2);
    assert_eq!(
        body["paging"]["links"]["next"],
        format!("http://{addr}/pucs/?page=2&page_size=666")
    );

    let (_, body) = get_json(addr, "/pucs/?page_size=junk").await;
    assert_eq!(body["paging"]["size"], 100);
    assert_eq!(body["paging"]["pages"], 6);
}

#[tokio::test]
async fn configured_limits_and_base_url_shape_paging() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db = fixture_db(dir.path());
    let api = ApiConfig {
        page_limits: PageLimits {
            default_page_size: 2,
            max_page_size: 3,
        },
        public_base_url: Some("https://api.example.org".to_string()),
        ..ApiConfig::default()
    };
    let addr = spawn_app(api, db).await;

    let (_, body) = get_json(addr, "/products/").await;
    assert_eq!(body["paging"]["size"], 2);
    assert_eq!(
        body["paging"]["links"]["next"],
        "https://api.example.org/products/?page=2"
    );
    let (_, body) = get_json(addr, "/products/?page_size=10").await;
    assert_eq!(body["paging"]["size"], 3);
}

#[tokio::test]
async fn products_filter_by_upc_and_expose_uber_puc() {
    let (_dir, addr) = fixture_app().await;

    let (status, body) = get_json(addr, "/products/?upc=stub_47").await;
    assert_eq!(status, 200);
    assert_eq!(ids(&body), vec![1, 3]);
    assert_eq!(
        body["data"][0],
        json!({
            "id": 1,
            "name": "Baby Shampoo",
            "upc": "stub_47",
            "manufacturer": "Acme",
            "brand": "Gentle",
            "puc_id": 1,
            "document_id": 10
        })
    );

    let (_, orphan) = get_json(addr, "/products/4").await;
    assert_eq!(orphan["puc_id"], Value::Null);
    assert_eq!(orphan["document_id"], Value::Null);
}

#[tokio::test]
async fn chemicals_prefer_curated_identity() {
    let (_dir, addr) = fixture_app().await;

    let (_, curated) = get_json(addr, "/chemicals/100/").await;
    assert_eq!(
        curated,
        json!({
            "id": 100,
            "sid": WATER,
            "rid": "DTXRID100",
            "name": "Water",
            "cas": "7732-18-5",
            "datadocument_id": 10
        })
    );

    let (_, raw) = get_json(addr, "/chemicals/103/").await;
    assert_eq!(raw["sid"], Value::Null);
    assert_eq!(raw["name"], "mystery oil");
    assert_eq!(raw["cas"], "0000-00-0");

    let (_, by_rid) = get_json(addr, "/chemicals/DTXRID104/").await;
    assert_eq!(by_rid["id"], 104);

    let (status, by_sid) = get_json(addr, &format!("/chemicals/{FORMALDEHYDE}/")).await;
    assert_eq!(status, 200);
    assert_eq!(
        by_sid,
        json!({
            "id": FORMALDEHYDE,
            "sid": FORMALDEHYDE,
            "name": "Formaldehyde",
            "cas": "50-00-0"
        })
    );

    let (_, curated_only) = get_json(addr, "/chemicals/?curated=yes").await;
    assert_eq!(ids(&curated_only), vec![100, 101, 102]);
    let (_, raw_only) = get_json(addr, "/chemicals/?curated=false").await;
    assert_eq!(ids(&raw_only), vec![103, 104]);
}

#[tokio::test]
async fn distinct_values_are_sorted_and_referenced() {
    let (_dir, addr) = fixture_app().await;

    let (status, body) = get_json(addr, "/chemicals/distinct/sid/").await;
    assert_eq!(status, 200);
    assert_eq!(
        body["data"],
        json!([{"sid": WATER}, {"sid": FORMALDEHYDE}])
    );
    assert_eq!(body["meta"]["count"], 2);

    let (_, names) = get_json(addr, "/chemicals/distinct/true_chemname").await;
    assert_eq!(
        names["data"],
        json!([{"true_chemname": "Formaldehyde"}, {"true_chemname": "Water"}])
    );

    let (status, _) = get_json(addr, "/chemicals/distinct/rid/").await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn documents_embed_products_and_ingredients() {
    let (_dir, addr) = fixture_app().await;

    let (status, doc) = get_json(addr, "/documents/10/").await;
    assert_eq!(status, 200);
    assert_eq!(doc["product_ids"], json!([1]));
    assert_eq!(doc["data_type"]["name"], "Composition");
    assert_eq!(doc["source"]["name"], "EPA");
    let chems: Vec<i64> = doc["chemicals"]
        .as_array()
        .expect("chemicals")
        .iter()
        .map(|c| c["id"].as_i64().expect("id"))
        .collect();
    assert_eq!(chems, vec![100, 101]);
    assert_eq!(doc["chemicals"][0]["min_weight_fraction"], 0.5);
    assert_eq!(doc["chemicals"][1]["max_weight_fraction"], 0.01);
    assert_eq!(doc["chemicals"][1]["data_type"], doc["data_type"]);
    assert_eq!(doc["chemicals"][1]["source"]["name"], "EPA");

    let (_, bare) = get_json(addr, "/documents/11/").await;
    assert_eq!(bare["data_type"], Value::Null);
    assert_eq!(bare["source"], Value::Null);

    let (_, by_chem) = get_json(addr, &format!("/documents/?chemical={FORMALDEHYDE}")).await;
    assert_eq!(ids(&by_chem), vec![10]);
}

#[tokio::test]
async fn presence_tags_list_with_kind_names() {
    let (_dir, addr) = fixture_app().await;

    let (status, body) = get_json(addr, "/chemicalpresences/").await;
    assert_eq!(status, 200);
    assert_eq!(body["meta"]["count"], 2);
    assert_eq!(body["data"][0]["kind"], "General use");

    let (_, tag) = get_json(addr, "/chemicalpresences/2/").await;
    assert_eq!(tag["definition"], Value::Null);
    assert_eq!(tag["kind"], "Pesticide");
}

#[tokio::test]
async fn empty_results_keep_the_envelope() {
    let (_dir, addr) = fixture_app().await;

    let (status, body) = get_json(addr, "/pucs/?chemical=DTXSID999").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["meta"]["count"], 0);
    assert_eq!(body["paging"]["page"], 1);
    assert_eq!(body["paging"]["pages"], 1);
    assert_eq!(body["paging"]["size"], 0);
    let links = &body["paging"]["links"];
    assert_eq!(links["current"], links["first"]);
    assert_eq!(links["first"], links["last"]);
    assert_eq!(links["next"], Value::Null);
    assert_eq!(links["previous"], Value::Null);

    let (_, blank) = get_json(addr, "/products/?upc=&chemical=").await;
    assert_eq!(blank["meta"]["count"], 4);
}

#[tokio::test]
async fn malformed_filters_are_bad_requests() {
    let (_dir, addr) = fixture_app().await;

    for path in [
        "/products/?puc=abc",
        "/pucs/?chemical=not-a-sid",
        "/chemicals/?curated=maybe",
        "/documents/?product=1.5",
    ] {
        let (status, head, body) = send_raw(addr, path).await;
        assert_eq!(status, 400, "{path}");
        let body: Value = serde_json::from_str(&body).expect("error json");
        assert_eq!(body["error"]["code"], "InvalidQueryParameter", "{path}");
        assert_eq!(
            body["error"]["request_id"].as_str(),
            header_value(&head, "x-request-id"),
            "{path}"
        );
    }
}

#[tokio::test]
async fn query_values_are_percent_decoded_once() {
    let (_dir, addr) = fixture_app().await;

    let (status, body) = get_json(addr, "/chemicals/?cas=50%2D00%2D0&page_size=1").await;
    assert_eq!(status, 200);
    assert_eq!(body["meta"]["count"], 2);
    assert_eq!(ids(&body), vec![101]);
    assert_eq!(
        body["paging"]["links"]["next"],
        format!("http://{addr}/chemicals/?cas=50-00-0&page=2&page_size=1")
    );

    let (status, head, body) = send_raw(addr, "/chemicals/?cas=%E9").await;
    assert_eq!(status, 400);
    let body: Value = serde_json::from_str(&body).expect("error json");
    assert_eq!(body["error"]["code"], "InvalidQueryParameter");
    assert_eq!(body["error"]["details"]["field_errors"][0]["parameter"], "cas");
    assert_eq!(
        body["error"]["request_id"].as_str(),
        header_value(&head, "x-request-id")
    );
}

#[tokio::test]
async fn unknown_resources_and_pages_are_not_found() {
    let (_dir, addr) = fixture_app().await;

    for path in [
        "/pucs/999/",
        "/pucs/abc/",
        "/products/0",
        "/chemicals/999999/",
        "/chemicals/DTXSID999/",
        "/chemicals/no-such-rid/",
        "/documents/1/",
        "/nowhere/",
        "/chemicals/%FF/",
        "/pucs/%C3/",
        "/chemicals/distinct/%FF/",
    ] {
        let (status, body) = get_json(addr, path).await;
        assert_eq!(status, 404, "{path}");
        assert_eq!(body["error"]["code"], "NotFound", "{path}");
    }

    for path in ["/pucs/?page=9", "/pucs/?page=0", "/pucs/?page=two"] {
        let (status, body) = get_json(addr, path).await;
        assert_eq!(status, 404, "{path}");
        assert_eq!(body["error"]["message"], "Invalid page.", "{path}");
    }
}

#[tokio::test]
async fn openapi_document_is_served_with_etag() {
    let (_dir, addr) = fixture_app().await;

    let (status, head, body) = send_raw(addr, "/openapi/").await;
    assert_eq!(status, 200);
    let spec: Value = serde_json::from_str(&body).expect("openapi json");
    assert_eq!(spec["openapi"], "3.0.2");
    assert_eq!(spec["info"]["title"], "Factotum Web Services");
    assert_eq!(spec["servers"][0]["url"], format!("http://{addr}"));
    assert!(spec["paths"]["/chemicals/distinct/{attribute}/"].is_object());

    let etag = header_value(&head, "etag").expect("etag").to_string();
    let (status, _, body) =
        send_with_headers(addr, "/openapi/", &[("If-None-Match", etag.as_str())]).await;
    assert_eq!(status, 304);
    assert!(body.is_empty());

    let (status, head, body) = send_raw(addr, "/").await;
    assert_eq!(status, 200);
    assert!(header_value(&head, "content-type")
        .is_some_and(|v| v.starts_with("text/html")));
    assert!(body.contains("/openapi/"));
}

#[tokio::test]
async fn health_and_readiness() {
    let (_dir, addr) = fixture_app().await;
    let (status, body) = get_json(addr, "/healthz").await;
    assert_eq!((status, body), (200, json!({"status": "ok"})));
    let (status, _) = get_json(addr, "/readyz").await;
    assert_eq!(status, 200);

    let empty_dir = tempfile::tempdir().expect("tempdir");
    let empty = write_db(empty_dir.path(), &["CREATE TABLE unrelated (id INTEGER);"]);
    let addr = spawn_app(ApiConfig::default(), empty).await;
    let (status, head, body) = send_raw(addr, "/readyz").await;
    assert_eq!(status, 503);
    assert_eq!(header_value(&head, "retry-after"), Some("3"));
    let body: Value = serde_json::from_str(&body).expect("json");
    assert_eq!(body["error"]["code"], "NotReady");
    assert!(body["error"]["details"]["missing_tables"]
        .as_array()
        .is_some_and(|t| t.len() == factotum_ws_query::REQUIRED_TABLES.len()));
}

#[tokio::test]
async fn request_ids_are_echoed_or_generated() {
    let (_dir, addr) = fixture_app().await;

    let (_, head, _) =
        send_with_headers(addr, "/healthz", &[("x-request-id", "req-from-client")]).await;
    assert_eq!(header_value(&head, "x-request-id"), Some("req-from-client"));

    let (_, head, _) = send_raw(addr, "/healthz").await;
    let generated = header_value(&head, "x-request-id").expect("request id");
    assert!(generated.starts_with("req-"));
    assert_eq!(generated.len(), "req-".len() + 16);
}

#[tokio::test]
async fn disallowed_hosts_are_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db = fixture_db(dir.path());
    let api = ApiConfig {
        allowed_hosts: vec!["api.example.org".to_string()],
        ..ApiConfig::default()
    };
    let addr = spawn_app(api, db).await;

    let (status, _, body) =
        send_with_headers(addr, "/pucs/", &[("Host", "evil.example.com")]).await;
    assert_eq!(status, 400);
    let body: Value = serde_json::from_str(&body).expect("json");
    assert_eq!(body["error"]["code"], "DisallowedHost");

    let (status, _, _) =
        send_with_headers(addr, "/pucs/", &[("Host", "api.example.org:8001")]).await;
    assert_eq!(status, 200);
}
