// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Curated chemical columns that can be listed as distinct values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistinctAttribute {
    Sid,
    TrueCas,
    TrueChemname,
}

impl DistinctAttribute {
    pub const ALL: [Self; 3] = [Self::Sid, Self::TrueCas, Self::TrueChemname];

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == raw)
    }

    /// Path segment and response field name; also the lookup column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sid => "sid",
            Self::TrueCas => "true_cas",
            Self::TrueChemname => "true_chemname",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Sid => "DTXSID",
            Self::TrueCas => "True CAS",
            Self::TrueChemname => "True chemical name",
        }
    }
}
