// SPDX-License-Identifier: Apache-2.0

use factotum_ws_model::{Dtxsid, DsstoxLookup, RawChem};
use rusqlite::{types::Value, Connection};

use super::{text, ListPlan};
use crate::filters::ChemicalFilter;
use crate::pagination::{Page, PageRequest};
use crate::query_error::QueryError;
use crate::row_decode::{
    chemical_from_row, dsstox_from_row, CHEMICAL_COLUMNS, CHEMICAL_FROM, DSSTOX_COLUMNS,
};

pub fn list_chemicals(
    conn: &Connection,
    filter: &ChemicalFilter,
    req: &PageRequest,
) -> Result<Page<RawChem>, QueryError> {
    let mut plan = ListPlan::new(CHEMICAL_FROM);
    if let Some(puc) = filter.puc {
        plan.filter(
            "rc.extracted_text_id IN (SELECT pd.document_id FROM dashboard_productdocument pd \
             JOIN dashboard_producttopuc pp ON pp.product_id = pd.product_id WHERE pp.puc_id = ?)",
            [Value::Integer(puc)],
        );
    }
    if let Some(sid) = &filter.sid {
        plan.filter("d.sid = ?", [text(sid.as_str())]);
    }
    if let Some(cas) = &filter.cas {
        plan.filter(
            "(rc.raw_cas = ? OR d.true_cas = ?)",
            [text(cas.as_str()), text(cas.as_str())],
        );
    }
    match filter.curated {
        Some(true) => {
            plan.filter("d.id IS NOT NULL", []);
        }
        Some(false) => {
            plan.filter("d.id IS NULL", []);
        }
        None => {}
    }
    if let Some(document) = filter.document {
        plan.filter("rc.extracted_text_id = ?", [Value::Integer(document)]);
    }
    plan.fetch_page(
        conn,
        CHEMICAL_COLUMNS,
        &[],
        "COUNT(*)",
        "rc.id ASC",
        req,
        chemical_from_row,
    )
}

pub fn get_chemical(conn: &Connection, id: i64) -> Result<Option<RawChem>, QueryError> {
    let mut plan = ListPlan::new(CHEMICAL_FROM);
    plan.filter("rc.id = ?", [Value::Integer(id)]);
    plan.fetch_first(conn, CHEMICAL_COLUMNS, &[], "rc.id ASC", chemical_from_row)
}

/// Lowest-id raw chemical carrying the registry id.
pub fn get_chemical_by_rid(conn: &Connection, rid: &str) -> Result<Option<RawChem>, QueryError> {
    let mut plan = ListPlan::new(CHEMICAL_FROM);
    plan.filter("rc.rid = ?", [text(rid)]);
    plan.fetch_first(conn, CHEMICAL_COLUMNS, &[], "rc.id ASC", chemical_from_row)
}

pub fn get_curated_chemical(
    conn: &Connection,
    sid: &Dtxsid,
) -> Result<Option<DsstoxLookup>, QueryError> {
    let mut plan = ListPlan::new("FROM dashboard_dsstoxlookup d");
    plan.filter("d.sid = ?", [text(sid.as_str())]);
    plan.fetch_first(conn, DSSTOX_COLUMNS, &[], "d.id ASC", dsstox_from_row)
}
