// SPDX-License-Identifier: Apache-2.0

pub(crate) mod chemicals;
pub(crate) mod distinct;
pub(crate) mod documents;
pub(crate) mod presences;
pub(crate) mod products;
pub(crate) mod pucs;

use rusqlite::{params_from_iter, types::Value, Connection, Row};
use tracing::debug;

use crate::pagination::{resolve_page, Page, PageRequest};
use crate::query_error::QueryError;

/// Raw chemicals curated to a given SID, as (document id) rows.
pub(crate) const DOCUMENTS_WITH_SID: &str = "SELECT rc.extracted_text_id FROM dashboard_rawchem rc \
     JOIN dashboard_dsstoxlookup dx ON dx.id = rc.dsstox_id WHERE dx.sid = ?";

/// Products having a document that contains a chemical curated to a given SID.
pub(crate) const PRODUCTS_WITH_SID: &str = "SELECT pd.product_id FROM dashboard_productdocument pd \
     JOIN dashboard_rawchem rc ON rc.extracted_text_id = pd.document_id \
     JOIN dashboard_dsstoxlookup dx ON dx.id = rc.dsstox_id WHERE dx.sid = ?";

/// A base relation with AND-ed predicates; every list and detail query goes through one.
#[derive(Debug, Clone)]
pub(crate) struct ListPlan {
    from: &'static str,
    where_parts: Vec<String>,
    params: Vec<Value>,
}

impl ListPlan {
    pub(crate) fn new(from: &'static str) -> Self {
        Self {
            from,
            where_parts: Vec::new(),
            params: Vec::new(),
        }
    }

    pub(crate) fn filter(
        &mut self,
        clause: impl Into<String>,
        values: impl IntoIterator<Item = Value>,
    ) -> &mut Self {
        self.where_parts.push(clause.into());
        self.params.extend(values);
        self
    }

    fn where_sql(&self) -> String {
        if self.where_parts.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.where_parts.join(" AND "))
        }
    }

    pub(crate) fn count(&self, conn: &Connection, count_expr: &str) -> Result<u64, QueryError> {
        let sql = format!("SELECT {count_expr} {}{}", self.from, self.where_sql());
        let mut stmt = conn.prepare_cached(&sql)?;
        let n: i64 = stmt.query_row(params_from_iter(self.params.iter()), |row| row.get(0))?;
        Ok(u64::try_from(n).unwrap_or(0))
    }

    /// Counts, resolves the requested page, then fetches only that window.
    /// `select_params` bind placeholders inside `select` and precede the filter params.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn fetch_page<T, F>(
        &self,
        conn: &Connection,
        select: &str,
        select_params: &[Value],
        count_expr: &str,
        order_by: &str,
        req: &PageRequest,
        decode: F,
    ) -> Result<Page<T>, QueryError>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let count = self.count(conn, count_expr)?;
        let window = resolve_page(count, req)?;

        let sql = format!(
            "SELECT {select} {}{} ORDER BY {order_by} LIMIT ? OFFSET ?",
            self.from,
            self.where_sql()
        );
        debug!(sql = %sql, count, page = window.number, "list query");
        let mut params: Vec<Value> = select_params.to_vec();
        params.extend(self.params.iter().cloned());
        params.push(Value::Integer(to_sql_int(window.limit)));
        params.push(Value::Integer(to_sql_int(window.offset)));

        let mut stmt = conn.prepare_cached(&sql)?;
        let items = stmt
            .query_map(params_from_iter(params.iter()), decode)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page {
            items,
            number: window.number,
            num_pages: window.num_pages,
            count,
        })
    }

    pub(crate) fn fetch_first<T, F>(
        &self,
        conn: &Connection,
        select: &str,
        select_params: &[Value],
        order_by: &str,
        decode: F,
    ) -> Result<Option<T>, QueryError>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let sql = format!(
            "SELECT {select} {}{} ORDER BY {order_by} LIMIT 1",
            self.from,
            self.where_sql()
        );
        let mut params: Vec<Value> = select_params.to_vec();
        params.extend(self.params.iter().cloned());
        let mut stmt = conn.prepare_cached(&sql)?;
        let mut rows = stmt.query_map(params_from_iter(params.iter()), decode)?;
        Ok(rows.next().transpose()?)
    }
}

pub(crate) fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

fn to_sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// `?, ?, ?` for an IN list of `n` values.
pub(crate) fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}
