// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// How a PUC groups products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PucKind {
    #[serde(rename = "UN")]
    Unknown,
    #[serde(rename = "FO")]
    Formulation,
    #[serde(rename = "AR")]
    Article,
    #[serde(rename = "OC")]
    Occupational,
}

impl PucKind {
    pub const ALL: [Self; 4] = [
        Self::Unknown,
        Self::Formulation,
        Self::Article,
        Self::Occupational,
    ];

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Unknown => "UN",
            Self::Formulation => "FO",
            Self::Article => "AR",
            Self::Occupational => "OC",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Formulation => "formulations",
            Self::Article => "articles",
            Self::Occupational => "occupational",
        }
    }

    /// Unrecognised codes read as `Unknown`; the curation side owns the column.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|k| k.code() == code.trim())
            .unwrap_or(Self::Unknown)
    }
}

/// Product Use Category: three levels of classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puc {
    pub id: i64,
    pub gen_cat: String,
    pub prod_fam: String,
    pub prod_type: String,
    pub description: String,
    pub kind: PucKind,
    pub num_products: u64,
}

impl Puc {
    /// Non-empty levels joined by `" - "`.
    #[must_use]
    pub fn display_name(&self) -> String {
        [&self.gen_cat, &self.prod_fam, &self.prod_type]
            .into_iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" - ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn puc(gen_cat: &str, prod_fam: &str, prod_type: &str) -> Puc {
        Puc {
            id: 1,
            gen_cat: gen_cat.to_string(),
            prod_fam: prod_fam.to_string(),
            prod_type: prod_type.to_string(),
            description: String::new(),
            kind: PucKind::Formulation,
            num_products: 0,
        }
    }

    #[test]
    fn display_name_skips_empty_levels() {
        assert_eq!(
            puc("Personal care", "hair styling and care", "shampoo").display_name(),
            "Personal care - hair styling and care - shampoo"
        );
        assert_eq!(puc("Vehicle", "", "").display_name(), "Vehicle");
        assert_eq!(puc("Vehicle", " ", "wax").display_name(), "Vehicle - wax");
    }

    #[test]
    fn kind_codes_round_trip() {
        for kind in PucKind::ALL {
            assert_eq!(PucKind::from_code(kind.code()), kind);
        }
        assert_eq!(PucKind::from_code("ZZ"), PucKind::Unknown);
    }
}
