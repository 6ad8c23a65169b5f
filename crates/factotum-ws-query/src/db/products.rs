// SPDX-License-Identifier: Apache-2.0

use factotum_ws_model::Product;
use rusqlite::{types::Value, Connection};

use super::{text, ListPlan, PRODUCTS_WITH_SID};
use crate::filters::ProductFilter;
use crate::pagination::{Page, PageRequest};
use crate::query_error::QueryError;
use crate::row_decode::{product_from_row, PRODUCT_COLUMNS};

const PRODUCT_FROM: &str = "FROM dashboard_product p";

pub fn list_products(
    conn: &Connection,
    filter: &ProductFilter,
    req: &PageRequest,
) -> Result<Page<Product>, QueryError> {
    let mut plan = ListPlan::new(PRODUCT_FROM);
    if let Some(sid) = &filter.chemical {
        plan.filter(
            format!("p.id IN ({PRODUCTS_WITH_SID})"),
            [text(sid.as_str())],
        );
    }
    if let Some(upc) = &filter.upc {
        plan.filter("p.upc = ?", [text(upc.as_str())]);
    }
    if let Some(puc) = filter.puc {
        plan.filter(
            "p.id IN (SELECT pp.product_id FROM dashboard_producttopuc pp WHERE pp.puc_id = ?)",
            [Value::Integer(puc)],
        );
    }
    plan.fetch_page(
        conn,
        PRODUCT_COLUMNS,
        &[],
        "COUNT(*)",
        "p.id ASC",
        req,
        product_from_row,
    )
}

pub fn get_product(conn: &Connection, id: i64) -> Result<Option<Product>, QueryError> {
    let mut plan = ListPlan::new(PRODUCT_FROM);
    plan.filter("p.id = ?", [Value::Integer(id)]);
    plan.fetch_first(conn, PRODUCT_COLUMNS, &[], "p.id ASC", product_from_row)
}
