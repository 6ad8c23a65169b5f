// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PucDto {
    pub id: i64,
    pub level_1_category: String,
    pub level_2_category: String,
    pub level_3_category: String,
    pub definition: String,
    pub kind: String,
    pub name: String,
    pub num_products: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    pub upc: String,
    pub manufacturer: Option<String>,
    pub brand: Option<String>,
    pub puc_id: Option<i64>,
    pub document_id: Option<i64>,
}

/// Raw chemical with identity fields resolved curated-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChemicalDto {
    pub id: i64,
    pub sid: Option<String>,
    pub rid: Option<String>,
    pub name: Option<String>,
    pub cas: Option<String>,
    pub datadocument_id: i64,
}

/// Curated chemical addressed by its DTXSID; `id` is the DTXSID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CuratedChemicalDto {
    pub id: String,
    pub sid: String,
    pub name: Option<String>,
    pub cas: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChemicalDetailDto {
    Raw(ChemicalDto),
    Curated(CuratedChemicalDto),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IngredientDto {
    pub id: i64,
    pub sid: Option<String>,
    pub rid: Option<String>,
    pub name: Option<String>,
    pub cas: Option<String>,
    pub min_weight_fraction: Option<f64>,
    pub max_weight_fraction: Option<f64>,
    /// Repeated from the parent document.
    pub data_type: Option<DataTypeDto>,
    pub source: Option<DataSourceDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataTypeDto {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataSourceDto {
    pub name: String,
    pub url: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentDto {
    pub id: i64,
    pub title: String,
    pub subtitle: Option<String>,
    pub organization: Option<String>,
    pub date: Option<String>,
    pub url: Option<String>,
    pub data_type: Option<DataTypeDto>,
    pub source: Option<DataSourceDto>,
    pub product_ids: Vec<i64>,
    pub chemicals: Vec<IngredientDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChemicalPresenceDto {
    pub id: i64,
    pub name: String,
    pub definition: Option<String>,
    pub kind: Option<String>,
}

/// One row of the distinct-attribute listing, keyed by the attribute name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DistinctValueDto {
    Sid { sid: String },
    TrueCas { true_cas: String },
    TrueChemname { true_chemname: String },
}
