// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use factotum_ws_model::{DataDocument, RawChem};
use rusqlite::{params_from_iter, types::Value, Connection};

use super::{placeholders, text, ListPlan, DOCUMENTS_WITH_SID};
use crate::filters::DocumentFilter;
use crate::pagination::{Page, PageRequest};
use crate::query_error::QueryError;
use crate::row_decode::{
    chemical_from_row, document_from_row, CHEMICAL_COLUMNS, CHEMICAL_FROM, DOCUMENT_COLUMNS,
    DOCUMENT_FROM,
};

pub fn list_documents(
    conn: &Connection,
    filter: &DocumentFilter,
    req: &PageRequest,
) -> Result<Page<DataDocument>, QueryError> {
    let mut plan = ListPlan::new(DOCUMENT_FROM);
    if let Some(sid) = &filter.chemical {
        plan.filter(
            format!("dd.id IN ({DOCUMENTS_WITH_SID})"),
            [text(sid.as_str())],
        );
    }
    if let Some(product) = filter.product {
        plan.filter(
            "dd.id IN (SELECT pd.document_id FROM dashboard_productdocument pd WHERE pd.product_id = ?)",
            [Value::Integer(product)],
        );
    }
    let mut page = plan.fetch_page(
        conn,
        DOCUMENT_COLUMNS,
        &[],
        "COUNT(*)",
        "dd.id ASC",
        req,
        document_from_row,
    )?;
    attach_related(conn, &mut page.items)?;
    Ok(page)
}

pub fn get_document(conn: &Connection, id: i64) -> Result<Option<DataDocument>, QueryError> {
    let mut plan = ListPlan::new(DOCUMENT_FROM);
    plan.filter("dd.id = ?", [Value::Integer(id)]);
    let Some(doc) = plan.fetch_first(conn, DOCUMENT_COLUMNS, &[], "dd.id ASC", document_from_row)?
    else {
        return Ok(None);
    };
    let mut docs = vec![doc];
    attach_related(conn, &mut docs)?;
    Ok(docs.pop())
}

/// Loads linked product ids and extracted chemicals for a whole page in two queries.
fn attach_related(conn: &Connection, docs: &mut [DataDocument]) -> Result<(), QueryError> {
    if docs.is_empty() {
        return Ok(());
    }
    let ids: Vec<Value> = docs.iter().map(|d| Value::Integer(d.id)).collect();
    let marks = placeholders(ids.len());

    let mut products: BTreeMap<i64, Vec<i64>> = BTreeMap::new();
    let sql = format!(
        "SELECT DISTINCT pd.document_id, pd.product_id FROM dashboard_productdocument pd \
         WHERE pd.document_id IN ({marks}) ORDER BY pd.document_id, pd.product_id"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(ids.iter()), |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?))
    })?;
    for row in rows {
        let (doc_id, product_id) = row?;
        products.entry(doc_id).or_default().push(product_id);
    }

    let mut chemicals: BTreeMap<i64, Vec<RawChem>> = BTreeMap::new();
    let sql = format!(
        "SELECT {CHEMICAL_COLUMNS} {CHEMICAL_FROM} WHERE rc.extracted_text_id IN ({marks}) ORDER BY rc.id"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(ids.iter()), chemical_from_row)?;
    for row in rows {
        let chem = row?;
        chemicals.entry(chem.extracted_text_id).or_default().push(chem);
    }

    for doc in docs.iter_mut() {
        doc.product_ids = products.remove(&doc.id).unwrap_or_default();
        doc.chemicals = chemicals.remove(&doc.id).unwrap_or_default();
    }
    Ok(())
}
