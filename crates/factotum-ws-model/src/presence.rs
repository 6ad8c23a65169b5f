// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Tag marking evidence of chemical use in an extracted list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChemicalPresenceTag {
    pub id: i64,
    pub name: String,
    pub definition: Option<String>,
    pub kind: Option<String>,
}
