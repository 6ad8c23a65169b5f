// SPDX-License-Identifier: Apache-2.0

use factotum_ws_model::Puc;
use rusqlite::{types::Value, Connection};

use super::{text, ListPlan, PRODUCTS_WITH_SID};
use crate::filters::PucFilter;
use crate::pagination::{Page, PageRequest};
use crate::query_error::QueryError;
use crate::row_decode::{puc_from_row, PUC_COLUMNS};

const PUC_FROM: &str = "FROM dashboard_puc p";

fn num_products_column(scoped: bool) -> String {
    if scoped {
        format!(
            "(SELECT COUNT(DISTINCT pp.product_id) FROM dashboard_producttopuc pp \
             WHERE pp.puc_id = p.id AND pp.product_id IN ({PRODUCTS_WITH_SID}))"
        )
    } else {
        "(SELECT COUNT(DISTINCT pp.product_id) FROM dashboard_producttopuc pp WHERE pp.puc_id = p.id)"
            .to_string()
    }
}

pub fn list_pucs(
    conn: &Connection,
    filter: &PucFilter,
    req: &PageRequest,
) -> Result<Page<Puc>, QueryError> {
    let mut plan = ListPlan::new(PUC_FROM);
    let mut select_params: Vec<Value> = Vec::new();
    if let Some(sid) = &filter.chemical {
        plan.filter(
            format!(
                "p.id IN (SELECT pp.puc_id FROM dashboard_producttopuc pp \
                 WHERE pp.product_id IN ({PRODUCTS_WITH_SID}))"
            ),
            [text(sid.as_str())],
        );
        select_params.push(text(sid.as_str()));
    }
    let select = format!(
        "{PUC_COLUMNS}, {}",
        num_products_column(filter.chemical.is_some())
    );
    plan.fetch_page(
        conn,
        &select,
        &select_params,
        "COUNT(*)",
        "p.id ASC",
        req,
        puc_from_row,
    )
}

pub fn get_puc(conn: &Connection, id: i64) -> Result<Option<Puc>, QueryError> {
    let mut plan = ListPlan::new(PUC_FROM);
    plan.filter("p.id = ?", [Value::Integer(id)]);
    let select = format!("{PUC_COLUMNS}, {}", num_products_column(false));
    plan.fetch_first(conn, &select, &[], "p.id ASC", puc_from_row)
}
