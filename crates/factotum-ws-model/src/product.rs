// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub upc: String,
    pub manufacturer: Option<String>,
    pub brand_name: Option<String>,
    /// Assigned top-level PUC, if curation picked one.
    pub uber_puc_id: Option<i64>,
    /// Lowest linked document id.
    pub first_document_id: Option<i64>,
}
