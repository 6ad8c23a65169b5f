// SPDX-License-Identifier: Apache-2.0

use factotum_ws_model::{CasNumber, Dtxsid, Upc};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PucFilter {
    /// Also scopes `num_products` to products containing the chemical.
    pub chemical: Option<Dtxsid>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub chemical: Option<Dtxsid>,
    pub upc: Option<Upc>,
    pub puc: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChemicalFilter {
    pub puc: Option<i64>,
    pub sid: Option<Dtxsid>,
    /// Matches the raw CAS or the curated one.
    pub cas: Option<CasNumber>,
    pub curated: Option<bool>,
    pub document: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFilter {
    pub chemical: Option<Dtxsid>,
    pub product: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresenceTagFilter {
    pub kind: Option<String>,
    pub chemical: Option<Dtxsid>,
}
