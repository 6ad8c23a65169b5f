// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod convert;
pub mod dto;
pub mod envelope;
pub mod error_mapping;
mod errors;
pub mod openapi;
pub mod params;

pub use dto::{
    ChemicalDetailDto, ChemicalDto, ChemicalPresenceDto, CuratedChemicalDto, DataSourceDto,
    DataTypeDto, DistinctValueDto, DocumentDto, IngredientDto, ProductDto, PucDto,
};
pub use envelope::{Meta, PageLinks, Paginated, Paging, RequestUrl};
pub use error_mapping::{map_error, ApiErrorMapping, API_ERROR_SCHEMA_REF};
pub use errors::{ApiError, ApiErrorCode, API_ERROR_CODES};
pub use openapi::{openapi_spec, OPENAPI_PATH};
pub use params::{
    parse_chemical_filter, parse_chemical_lookup, parse_distinct_attribute,
    parse_document_filter, parse_page_request, parse_path_id, parse_presence_filter,
    parse_product_filter, parse_puc_filter, query_map, ChemicalLookup,
};

pub const CRATE_NAME: &str = "factotum-ws-api";
