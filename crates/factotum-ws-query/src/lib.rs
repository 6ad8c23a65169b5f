// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod db;
mod filters;
mod limits;
mod pagination;
mod query_error;
mod row_decode;
mod schema;

pub use db::chemicals::{get_chemical, get_chemical_by_rid, get_curated_chemical, list_chemicals};
pub use db::distinct::list_distinct;
pub use db::documents::{get_document, list_documents};
pub use db::presences::{get_presence_tag, list_presence_tags};
pub use db::products::{get_product, list_products};
pub use db::pucs::{get_puc, list_pucs};
pub use filters::{ChemicalFilter, DocumentFilter, PresenceTagFilter, ProductFilter, PucFilter};
pub use limits::PageLimits;
pub use pagination::{
    num_pages, resolve_page, Page, PageRequest, PageSelector, PageWindow, INVALID_PAGE,
};
pub use query_error::{QueryError, QueryErrorCode};
pub use schema::{missing_tables, REQUIRED_TABLES, SCHEMA_SQL};

pub const CRATE_NAME: &str = "factotum-ws-query";
