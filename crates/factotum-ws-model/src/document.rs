// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::RawChem;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentType {
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSource {
    pub title: String,
    pub url: Option<String>,
    pub description: Option<String>,
}

/// Source document from which product and chemical facts were extracted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataDocument {
    pub id: i64,
    pub title: String,
    pub subtitle: Option<String>,
    pub organization: Option<String>,
    pub date: Option<String>,
    pub url: Option<String>,
    pub document_type: Option<DocumentType>,
    pub data_source: Option<DataSource>,
    pub product_ids: Vec<i64>,
    pub chemicals: Vec<RawChem>,
}
