// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Canonical (curated) chemical identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DsstoxLookup {
    pub id: i64,
    pub sid: String,
    pub true_cas: Option<String>,
    pub true_chemname: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightFraction {
    pub lower: Option<f64>,
    pub central: Option<f64>,
    pub upper: Option<f64>,
}

fn is_blank(v: Option<f64>) -> bool {
    v.map_or(true, |x| x == 0.0)
}

impl WeightFraction {
    /// A single reported value lives in `central`; the range bounds are then blank.
    #[must_use]
    pub fn min(&self) -> Option<f64> {
        if is_blank(self.lower) && is_blank(self.upper) {
            self.central
        } else {
            self.lower
        }
    }

    #[must_use]
    pub fn max(&self) -> Option<f64> {
        if is_blank(self.lower) && is_blank(self.upper) {
            self.central
        } else {
            self.upper
        }
    }
}

/// A chemical record as extracted from a data document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawChem {
    pub id: i64,
    pub rid: Option<String>,
    pub raw_chem_name: Option<String>,
    pub raw_cas: Option<String>,
    pub extracted_text_id: i64,
    pub dsstox: Option<DsstoxLookup>,
    /// Present only for composition records.
    pub weight_fraction: Option<WeightFraction>,
}

impl RawChem {
    #[must_use]
    pub fn is_curated(&self) -> bool {
        self.dsstox.is_some()
    }

    #[must_use]
    pub fn sid(&self) -> Option<&str> {
        self.dsstox.as_ref().map(|d| d.sid.as_str())
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match &self.dsstox {
            Some(d) => d.true_chemname.as_deref(),
            None => self.raw_chem_name.as_deref(),
        }
    }

    #[must_use]
    pub fn cas(&self) -> Option<&str> {
        match &self.dsstox {
            Some(d) => d.true_cas.as_deref(),
            None => self.raw_cas.as_deref(),
        }
    }
}
