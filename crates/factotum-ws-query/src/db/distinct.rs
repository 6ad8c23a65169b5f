// SPDX-License-Identifier: Apache-2.0

use factotum_ws_model::DistinctAttribute;
use rusqlite::Connection;

use super::ListPlan;
use crate::pagination::{Page, PageRequest};
use crate::query_error::QueryError;

const CURATED_FROM: &str = "FROM dashboard_dsstoxlookup d";

/// Distinct non-null values of a curated column, restricted to identities
/// that at least one raw chemical resolves to, ascending.
pub fn list_distinct(
    conn: &Connection,
    attribute: DistinctAttribute,
    req: &PageRequest,
) -> Result<Page<String>, QueryError> {
    // The column name comes from a closed enum, never from the request.
    let column = format!("d.{}", attribute.as_str());
    let mut plan = ListPlan::new(CURATED_FROM);
    plan.filter(format!("{column} IS NOT NULL"), []);
    plan.filter(
        "EXISTS (SELECT 1 FROM dashboard_rawchem rc WHERE rc.dsstox_id = d.id)",
        [],
    );
    plan.fetch_page(
        conn,
        &format!("DISTINCT {column}"),
        &[],
        &format!("COUNT(DISTINCT {column})"),
        &format!("{column} ASC"),
        req,
        |row| row.get::<_, String>(0),
    )
}
