// SPDX-License-Identifier: Apache-2.0

//! Tables this service reads. The curation system owns the database; the DDL
//! here mirrors the columns queried and seeds local fixtures.

use rusqlite::Connection;

use crate::query_error::QueryError;

pub const REQUIRED_TABLES: [&str; 14] = [
    "dashboard_datadocument",
    "dashboard_datagroup",
    "dashboard_datasource",
    "dashboard_documenttype",
    "dashboard_dsstoxlookup",
    "dashboard_extractedchemical",
    "dashboard_extractedlistpresencetag",
    "dashboard_extractedlistpresencetagkind",
    "dashboard_extractedlistpresencetotag",
    "dashboard_product",
    "dashboard_productdocument",
    "dashboard_producttopuc",
    "dashboard_puc",
    "dashboard_rawchem",
];

pub const SCHEMA_SQL: &str = "
CREATE TABLE dashboard_puc (
  id INTEGER PRIMARY KEY,
  gen_cat TEXT NOT NULL DEFAULT '',
  prod_fam TEXT NOT NULL DEFAULT '',
  prod_type TEXT NOT NULL DEFAULT '',
  description TEXT NOT NULL DEFAULT '',
  kind TEXT NOT NULL DEFAULT 'UN'
);
CREATE TABLE dashboard_product (
  id INTEGER PRIMARY KEY,
  title TEXT NOT NULL,
  upc TEXT NOT NULL,
  manufacturer TEXT,
  brand_name TEXT
);
CREATE TABLE dashboard_producttopuc (
  id INTEGER PRIMARY KEY,
  product_id INTEGER NOT NULL REFERENCES dashboard_product(id),
  puc_id INTEGER NOT NULL REFERENCES dashboard_puc(id),
  classification_method TEXT,
  is_uber_puc INTEGER NOT NULL DEFAULT 0
);
CREATE TABLE dashboard_documenttype (
  id INTEGER PRIMARY KEY,
  title TEXT NOT NULL,
  description TEXT,
  code TEXT
);
CREATE TABLE dashboard_datasource (
  id INTEGER PRIMARY KEY,
  title TEXT NOT NULL,
  url TEXT,
  description TEXT
);
CREATE TABLE dashboard_datagroup (
  id INTEGER PRIMARY KEY,
  name TEXT NOT NULL,
  data_source_id INTEGER REFERENCES dashboard_datasource(id)
);
CREATE TABLE dashboard_datadocument (
  id INTEGER PRIMARY KEY,
  title TEXT NOT NULL,
  subtitle TEXT,
  organization TEXT,
  date TEXT,
  url TEXT,
  document_type_id INTEGER REFERENCES dashboard_documenttype(id),
  data_group_id INTEGER REFERENCES dashboard_datagroup(id)
);
CREATE TABLE dashboard_productdocument (
  id INTEGER PRIMARY KEY,
  product_id INTEGER NOT NULL REFERENCES dashboard_product(id),
  document_id INTEGER NOT NULL REFERENCES dashboard_datadocument(id)
);
CREATE TABLE dashboard_dsstoxlookup (
  id INTEGER PRIMARY KEY,
  sid TEXT NOT NULL UNIQUE,
  true_cas TEXT,
  true_chemname TEXT
);
CREATE TABLE dashboard_rawchem (
  id INTEGER PRIMARY KEY,
  extracted_text_id INTEGER NOT NULL REFERENCES dashboard_datadocument(id),
  rid TEXT,
  raw_chem_name TEXT,
  raw_cas TEXT,
  dsstox_id INTEGER REFERENCES dashboard_dsstoxlookup(id)
);
CREATE TABLE dashboard_extractedchemical (
  rawchem_ptr_id INTEGER PRIMARY KEY REFERENCES dashboard_rawchem(id),
  lower_wf_analysis REAL,
  central_wf_analysis REAL,
  upper_wf_analysis REAL
);
CREATE TABLE dashboard_extractedlistpresencetagkind (
  id INTEGER PRIMARY KEY,
  name TEXT NOT NULL
);
CREATE TABLE dashboard_extractedlistpresencetag (
  id INTEGER PRIMARY KEY,
  name TEXT NOT NULL,
  definition TEXT,
  kind_id INTEGER REFERENCES dashboard_extractedlistpresencetagkind(id)
);
CREATE TABLE dashboard_extractedlistpresencetotag (
  id INTEGER PRIMARY KEY,
  content_object_id INTEGER NOT NULL REFERENCES dashboard_rawchem(id),
  tag_id INTEGER NOT NULL REFERENCES dashboard_extractedlistpresencetag(id)
);
CREATE INDEX idx_producttopuc_product ON dashboard_producttopuc(product_id);
CREATE INDEX idx_producttopuc_puc ON dashboard_producttopuc(puc_id);
CREATE INDEX idx_product_upc ON dashboard_product(upc);
CREATE INDEX idx_productdocument_product ON dashboard_productdocument(product_id);
CREATE INDEX idx_productdocument_document ON dashboard_productdocument(document_id);
CREATE INDEX idx_rawchem_extracted_text ON dashboard_rawchem(extracted_text_id);
CREATE INDEX idx_rawchem_dsstox ON dashboard_rawchem(dsstox_id);
CREATE INDEX idx_rawchem_rid ON dashboard_rawchem(rid);
CREATE INDEX idx_rawchem_raw_cas ON dashboard_rawchem(raw_cas);
CREATE INDEX idx_dsstoxlookup_true_cas ON dashboard_dsstoxlookup(true_cas);
CREATE INDEX idx_presencetotag_object ON dashboard_extractedlistpresencetotag(content_object_id);
CREATE INDEX idx_presencetotag_tag ON dashboard_extractedlistpresencetotag(tag_id);
";

/// Required tables absent from `conn`, in `REQUIRED_TABLES` order.
pub fn missing_tables(conn: &Connection) -> Result<Vec<&'static str>, QueryError> {
    let mut stmt =
        conn.prepare_cached("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1")?;
    let mut missing = Vec::new();
    for table in REQUIRED_TABLES {
        if !stmt.exists([table])? {
            missing.push(table);
        }
    }
    Ok(missing)
}
