// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use factotum_ws_query::SCHEMA_SQL;
use factotum_ws_server::{build_router, ApiConfig, AppState, Database, DatabaseConfig};
use rusqlite::Connection;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub const WATER: &str = "DTXSID6026296";
pub const FORMALDEHYDE: &str = "DTXSID7020637";

pub const FIXTURE_SQL: &str = "
INSERT INTO dashboard_puc (id, gen_cat, prod_fam, prod_type, description, kind) VALUES
  (1, 'Personal care', 'hair styling and care', 'shampoo', 'Shampoos.', 'FO'),
  (2, 'Home maintenance', 'paints', '', 'Paints and coatings.', 'FO'),
  (3, 'Vehicle', '', '', 'Vehicle articles.', 'AR');
INSERT INTO dashboard_product (id, title, upc, manufacturer, brand_name) VALUES
  (1, 'Baby Shampoo', 'stub_47', 'Acme', 'Gentle'),
  (2, 'Wall Paint', 'stub_48', NULL, NULL),
  (3, 'Car Seat', 'stub_47', 'SeatCo', 'SeatCo'),
  (4, 'Orphan product', 'stub_99', NULL, NULL);
INSERT INTO dashboard_producttopuc (id, product_id, puc_id, classification_method, is_uber_puc) VALUES
  (1, 1, 1, 'MA', 1),
  (2, 2, 2, 'MA', 1),
  (3, 3, 3, 'MA', 1),
  (4, 1, 2, 'AU', 0);
INSERT INTO dashboard_documenttype (id, title, description, code) VALUES
  (1, 'Composition', 'Composition of a product', 'CO');
INSERT INTO dashboard_datasource (id, title, url, description) VALUES
  (1, 'EPA', 'https://www.epa.gov', 'US Environmental Protection Agency');
INSERT INTO dashboard_datagroup (id, name, data_source_id) VALUES (1, 'SDS batch', 1);
INSERT INTO dashboard_datadocument (id, title, subtitle, organization, date, url, document_type_id, data_group_id) VALUES
  (10, 'Shampoo SDS', NULL, 'Acme', '2019-01-01', 'https://example.org/10.pdf', 1, 1),
  (11, 'Paint SDS', 'rev 2', 'PaintCo', NULL, NULL, NULL, NULL),
  (12, 'Seat label', NULL, NULL, NULL, NULL, NULL, NULL);
INSERT INTO dashboard_productdocument (id, product_id, document_id) VALUES
  (1, 1, 10),
  (2, 2, 11),
  (3, 3, 12);
INSERT INTO dashboard_dsstoxlookup (id, sid, true_cas, true_chemname) VALUES
  (1, 'DTXSID6026296', '7732-18-5', 'Water'),
  (2, 'DTXSID7020637', '50-00-0', 'Formaldehyde'),
  (3, 'DTXSID0000001', 'unused', 'Unreferenced');
INSERT INTO dashboard_rawchem (id, extracted_text_id, rid, raw_chem_name, raw_cas, dsstox_id) VALUES
  (100, 10, 'DTXRID100', 'aqua', '7732-18-5', 1),
  (101, 10, 'DTXRID101', 'formalin', 'formalin-cas', 2),
  (102, 11, 'DTXRID102', 'water', '7732-18-5', 1),
  (103, 11, NULL, 'mystery oil', '0000-00-0', NULL),
  (104, 12, 'DTXRID104', 'Formaldehyde sol', '50-00-0', NULL);
INSERT INTO dashboard_extractedchemical (rawchem_ptr_id, lower_wf_analysis, central_wf_analysis, upper_wf_analysis) VALUES
  (100, 0.5, NULL, 0.9),
  (101, NULL, 0.01, NULL);
INSERT INTO dashboard_extractedlistpresencetagkind (id, name) VALUES
  (1, 'General use'),
  (2, 'Pesticide');
INSERT INTO dashboard_extractedlistpresencetag (id, name, definition, kind_id) VALUES
  (1, 'fragrance', 'Used as a fragrance', 1),
  (2, 'insecticide', NULL, 2);
INSERT INTO dashboard_extractedlistpresencetotag (id, content_object_id, tag_id) VALUES
  (1, 100, 1),
  (2, 102, 1),
  (3, 103, 2);
";

/// 600 generated PUCs, enough to exceed the page size ceiling.
pub const MANY_PUCS_SQL: &str = "
INSERT INTO dashboard_puc (id, gen_cat, prod_fam, prod_type, description, kind)
  WITH RECURSIVE n(x) AS (SELECT 1 UNION ALL SELECT x + 1 FROM n WHERE x < 600)
  SELECT x, 'Category ' || x, '', '', 'Generated', 'FO' FROM n;
";

pub fn write_db(dir: &Path, seed: &[&str]) -> PathBuf {
    let path = dir.join("factotum.sqlite3");
    let conn = Connection::open(&path).expect("create sqlite");
    for sql in seed {
        conn.execute_batch(sql).expect("seed sqlite");
    }
    path
}

pub fn fixture_db(dir: &Path) -> PathBuf {
    write_db(dir, &[SCHEMA_SQL, FIXTURE_SQL])
}

pub async fn spawn_app(api: ApiConfig, db_path: PathBuf) -> SocketAddr {
    let db = Database::new(DatabaseConfig {
        path: db_path,
        ..DatabaseConfig::default()
    });
    let app = build_router(AppState::new(api, db));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

pub async fn send_with_headers(
    addr: SocketAddr,
    path: &str,
    headers: &[(&str, &str)],
) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let host = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("host"))
        .map_or_else(|| addr.to_string(), |(_, v)| (*v).to_string());
    let mut req = format!("GET {path} HTTP/1.1\r\nHost: {host}\r\nConnection: close\r\n");
    for (name, value) in headers.iter().filter(|(k, _)| !k.eq_ignore_ascii_case("host")) {
        req.push_str(&format!("{name}: {value}\r\n"));
    }
    req.push_str("\r\n");
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("status");
    (status, head.to_string(), body.to_string())
}

pub async fn send_raw(addr: SocketAddr, path: &str) -> (u16, String, String) {
    send_with_headers(addr, path, &[]).await
}

pub async fn get_json(addr: SocketAddr, path: &str) -> (u16, serde_json::Value) {
    let (status, _, body) = send_raw(addr, path).await;
    let json = serde_json::from_str(&body)
        .unwrap_or_else(|e| panic!("json body for {path}: {e}: {body}"));
    (status, json)
}

pub fn header_value<'a>(head: &'a str, name: &str) -> Option<&'a str> {
    head.lines().find_map(|line| {
        let (k, v) = line.split_once(':')?;
        k.trim().eq_ignore_ascii_case(name).then(|| v.trim())
    })
}
