// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod chemical;
mod distinct;
mod document;
mod ids;
mod presence;
mod product;
mod puc;

pub use chemical::{DsstoxLookup, RawChem, WeightFraction};
pub use distinct::DistinctAttribute;
pub use document::{DataDocument, DataSource, DocumentType};
pub use ids::{CasNumber, Dtxsid, ParseError, Upc, CODE_MAX_LEN, DTXSID_PREFIX};
pub use presence::ChemicalPresenceTag;
pub use product::Product;
pub use puc::{Puc, PucKind};

pub const CRATE_NAME: &str = "factotum-ws-model";
