// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use factotum_ws_core::parse_bool;
use factotum_ws_model::{CasNumber, DistinctAttribute, Dtxsid, Upc, DTXSID_PREFIX};
use factotum_ws_query::{
    ChemicalFilter, DocumentFilter, PageLimits, PageRequest, PageSelector, PresenceTagFilter,
    ProductFilter, PucFilter, INVALID_PAGE,
};

use crate::errors::ApiError;

pub const PAGE_PARAM: &str = "page";
pub const PAGE_SIZE_PARAM: &str = "page_size";
pub const LAST_PAGE: &str = "last";

/// Collapses repeated keys; the last value wins.
#[must_use]
pub fn query_map(pairs: &[(String, String)]) -> BTreeMap<String, String> {
    pairs.iter().cloned().collect()
}

/// Blank values mean the filter is not applied.
fn non_blank<'a>(query: &'a BTreeMap<String, String>, name: &str) -> Option<&'a str> {
    query
        .get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

fn dtxsid_param(query: &BTreeMap<String, String>, name: &str) -> Result<Option<Dtxsid>, ApiError> {
    non_blank(query, name)
        .map(|raw| {
            Dtxsid::parse(raw).map_err(|e| ApiError::invalid_param(name, raw, &e.to_string()))
        })
        .transpose()
}

fn id_param(query: &BTreeMap<String, String>, name: &str) -> Result<Option<i64>, ApiError> {
    non_blank(query, name)
        .map(|raw| {
            raw.parse::<i64>()
                .map_err(|_| ApiError::invalid_param(name, raw, "expected an integer"))
        })
        .transpose()
}

fn bool_param(query: &BTreeMap<String, String>, name: &str) -> Result<Option<bool>, ApiError> {
    non_blank(query, name)
        .map(|raw| {
            parse_bool(raw).ok_or_else(|| ApiError::invalid_param(name, raw, "expected a boolean"))
        })
        .transpose()
}

/// `page_size` never fails: unusable values fall back to the default and
/// oversized ones are clamped. A bad `page` is a missing page, not a bad request.
pub fn parse_page_request(
    query: &BTreeMap<String, String>,
    limits: &PageLimits,
) -> Result<PageRequest, ApiError> {
    let requested = non_blank(query, PAGE_SIZE_PARAM).and_then(|raw| raw.parse::<u64>().ok());
    let size = limits.effective_size(requested);
    let selector = match non_blank(query, PAGE_PARAM) {
        None => PageSelector::Number(1),
        Some(LAST_PAGE) => PageSelector::Last,
        Some(raw) => raw
            .parse::<u64>()
            .map(PageSelector::Number)
            .map_err(|_| ApiError::not_found(INVALID_PAGE))?,
    };
    Ok(PageRequest { selector, size })
}

pub fn parse_puc_filter(query: &BTreeMap<String, String>) -> Result<PucFilter, ApiError> {
    Ok(PucFilter {
        chemical: dtxsid_param(query, "chemical")?,
    })
}

pub fn parse_product_filter(query: &BTreeMap<String, String>) -> Result<ProductFilter, ApiError> {
    let upc = non_blank(query, "upc")
        .map(|raw| Upc::parse(raw).map_err(|e| ApiError::invalid_param("upc", raw, &e.to_string())))
        .transpose()?;
    Ok(ProductFilter {
        chemical: dtxsid_param(query, "chemical")?,
        upc,
        puc: id_param(query, "puc")?,
    })
}

pub fn parse_chemical_filter(
    query: &BTreeMap<String, String>,
) -> Result<ChemicalFilter, ApiError> {
    let cas = non_blank(query, "cas")
        .map(|raw| {
            CasNumber::parse(raw).map_err(|e| ApiError::invalid_param("cas", raw, &e.to_string()))
        })
        .transpose()?;
    Ok(ChemicalFilter {
        puc: id_param(query, "puc")?,
        sid: dtxsid_param(query, "sid")?,
        cas,
        curated: bool_param(query, "curated")?,
        document: id_param(query, "document")?,
    })
}

pub fn parse_document_filter(
    query: &BTreeMap<String, String>,
) -> Result<DocumentFilter, ApiError> {
    Ok(DocumentFilter {
        chemical: dtxsid_param(query, "chemical")?,
        product: id_param(query, "product")?,
    })
}

pub fn parse_presence_filter(
    query: &BTreeMap<String, String>,
) -> Result<PresenceTagFilter, ApiError> {
    Ok(PresenceTagFilter {
        kind: non_blank(query, "kind").map(ToString::to_string),
        chemical: dtxsid_param(query, "chemical")?,
    })
}

/// Numeric resource id from the path; anything else names no resource.
pub fn parse_path_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::not_found("No resource matches the given query."))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChemicalLookup {
    Id(i64),
    Sid(Dtxsid),
    Rid(String),
}

pub fn parse_chemical_lookup(raw: &str) -> Result<ChemicalLookup, ApiError> {
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        return parse_path_id(raw).map(ChemicalLookup::Id);
    }
    if raw.starts_with(DTXSID_PREFIX) {
        return Dtxsid::parse(raw)
            .map(ChemicalLookup::Sid)
            .map_err(|_| ApiError::not_found("No chemical matches the given query."));
    }
    if raw.trim().is_empty() {
        return Err(ApiError::not_found("No chemical matches the given query."));
    }
    Ok(ChemicalLookup::Rid(raw.to_string()))
}

pub fn parse_distinct_attribute(raw: &str) -> Result<DistinctAttribute, ApiError> {
    DistinctAttribute::parse(raw)
        .ok_or_else(|| ApiError::not_found(format!("unknown distinct attribute: {raw}")))
}
