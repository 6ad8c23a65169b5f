// SPDX-License-Identifier: Apache-2.0

use factotum_ws_model::{DistinctAttribute, PucKind};
use factotum_ws_query::PageLimits;
use serde_json::{json, Map, Value};

use crate::envelope::RequestUrl;
use crate::error_mapping::API_ERROR_SCHEMA_REF;
use crate::errors::API_ERROR_CODES;
use crate::params::{PAGE_PARAM, PAGE_SIZE_PARAM};

pub const OPENAPI_PATH: &str = "/openapi/";

const TITLE: &str = "Factotum Web Services";
const VERSION: &str = "v0";
const DESCRIPTION: &str = "The Factotum Web Services API is a service that provides data about \
Product Usage Category (PUC), consumer products, and the chemicals related to PUCs and products.";
const LIST_SUFFIX: &str = " This API retrieves a paginated response of these objects.";

struct Param {
    name: &'static str,
    location: &'static str,
    kind: &'static str,
    description: &'static str,
    example: &'static str,
}

const fn query(
    name: &'static str,
    kind: &'static str,
    description: &'static str,
    example: &'static str,
) -> Param {
    Param {
        name,
        location: "query",
        kind,
        description,
        example,
    }
}

const fn path(name: &'static str, description: &'static str, example: &'static str) -> Param {
    Param {
        name,
        location: "path",
        kind: "string",
        description,
        example,
    }
}

struct Endpoint {
    path: &'static str,
    operation_id: &'static str,
    tag: &'static str,
    description: &'static str,
    list: bool,
    params: &'static [Param],
    schema: &'static str,
}

const CHEMICAL_DTXSID: &str = "A chemical DTXSID to filter against.";

const ENDPOINTS: &[Endpoint] = &[
    Endpoint {
        path: "/pucs/",
        operation_id: "listPUCs",
        tag: "pucs",
        description: "A PUC (Product Usage Category) is a classification of products.",
        list: true,
        params: &[query(
            "chemical",
            "string",
            "A chemical DTXSID to filter products against.",
            "DTXSID6026296",
        )],
        schema: "PUC",
    },
    Endpoint {
        path: "/pucs/{id}/",
        operation_id: "retrievePUC",
        tag: "pucs",
        description: "A PUC (Product Usage Category) is a classification of products.",
        list: false,
        params: &[path("id", "A unique integer value identifying this PUC.", "1")],
        schema: "PUC",
    },
    Endpoint {
        path: "/products/",
        operation_id: "listProducts",
        tag: "products",
        description: "A consumer product with its assigned PUC and source document.",
        list: true,
        params: &[
            query(
                "chemical",
                "string",
                "A chemical DTXSID to filter products against.",
                "DTXSID6026296",
            ),
            query("upc", "string", "A Product UPC to filter products against.", "stub_47"),
            query("puc", "integer", "A `puc_id` to filter products against.", "1"),
        ],
        schema: "Product",
    },
    Endpoint {
        path: "/products/{id}/",
        operation_id: "retrieveProduct",
        tag: "products",
        description: "A consumer product with its assigned PUC and source document.",
        list: false,
        params: &[path("id", "A unique integer value identifying this product.", "1")],
        schema: "Product",
    },
    Endpoint {
        path: "/chemicals/",
        operation_id: "listChemicals",
        tag: "chemicals",
        description: "A chemical record as extracted from a data document, resolved to its curated identity when one exists.",
        list: true,
        params: &[
            query("puc", "integer", "A `puc_id` to filter chemicals against.", "1"),
            query(
                "sid",
                "string",
                "A curated chemical DTXSID to filter chemicals against.",
                "DTXSID6026296",
            ),
            query(
                "cas",
                "string",
                "A CAS number matched against the raw or the curated CAS.",
                "7732-18-5",
            ),
            query(
                "curated",
                "boolean",
                "Restrict to chemicals with (true) or without (false) a curated identity.",
                "true",
            ),
            query("document", "integer", "A data document id to filter chemicals against.", "1"),
        ],
        schema: "Chemical",
    },
    Endpoint {
        path: "/chemicals/{id_or_code}/",
        operation_id: "retrieveChemical",
        tag: "chemicals",
        description: "A raw chemical by numeric id or registry id (RID), or a curated chemical by DTXSID.",
        list: false,
        params: &[path("id_or_code", "A raw chemical id, an RID, or a DTXSID.", "DTXSID6026296")],
        schema: "ChemicalDetail",
    },
    Endpoint {
        path: "/chemicals/distinct/{attribute}/",
        operation_id: "listDistinctChemicalAttribute",
        tag: "chemicals",
        description: "Distinct values of one curated chemical attribute (sid, true_cas or true_chemname), sorted ascending.",
        list: true,
        params: &[path("attribute", "One of sid, true_cas, true_chemname.", "sid")],
        schema: "ChemicalDistinct",
    },
    Endpoint {
        path: "/documents/",
        operation_id: "listDocuments",
        tag: "documents",
        description: "A source document with its data type, data source, linked products and extracted chemicals.",
        list: true,
        params: &[
            query("chemical", "string", CHEMICAL_DTXSID, "DTXSID6026296"),
            query("product", "integer", "A product id to filter documents against.", "1"),
        ],
        schema: "Document",
    },
    Endpoint {
        path: "/documents/{id}/",
        operation_id: "retrieveDocument",
        tag: "documents",
        description: "A source document with its data type, data source, linked products and extracted chemicals.",
        list: false,
        params: &[path("id", "A unique integer value identifying this document.", "1")],
        schema: "Document",
    },
    Endpoint {
        path: "/chemicalpresences/",
        operation_id: "listChemicalPresences",
        tag: "chemicalpresences",
        description: "A tag marking evidence of chemical use.",
        list: true,
        params: &[
            query("kind", "string", "A tag kind name to filter tags against.", "General use"),
            query("chemical", "string", CHEMICAL_DTXSID, "DTXSID6026296"),
        ],
        schema: "ChemicalPresence",
    },
    Endpoint {
        path: "/chemicalpresences/{id}/",
        operation_id: "retrieveChemicalPresence",
        tag: "chemicalpresences",
        description: "A tag marking evidence of chemical use.",
        list: false,
        params: &[path("id", "A unique integer value identifying this tag.", "1")],
        schema: "ChemicalPresence",
    },
];

const PY_CODE_SAMPLE: &str = "import requests\n\nr = requests.get(\"{url}\")\nr.json()";
const SHELL_CODE_SAMPLE: &str = "curl \"{url}\"";
const RUBY_CODE_SAMPLE: &str = "require \"net/http\"\nrequire \"json\"\n\nuri = URI(\"{url}\")\nresponse = Net::HTTP.get(uri)\nJSON.parse(response)";
const R_CODE_SAMPLE: &str = "library(httr)\n\nresponse <- GET(\"{url}\")\ncontent(response, \"parsed\")";

fn code_samples(example_url: &str) -> Value {
    let samples = [
        ("Python", PY_CODE_SAMPLE),
        ("Shell", SHELL_CODE_SAMPLE),
        ("Ruby", RUBY_CODE_SAMPLE),
        ("R", R_CODE_SAMPLE),
    ];
    Value::Array(
        samples
            .iter()
            .map(|(lang, tpl)| json!({"lang": lang, "source": tpl.replace("{url}", example_url)}))
            .collect(),
    )
}

fn expand_path(template: &str, params: &[Param]) -> String {
    params
        .iter()
        .filter(|p| p.location == "path")
        .fold(template.to_string(), |acc, p| {
            acc.replace(&format!("{{{}}}", p.name), p.example)
        })
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {"application/json": {"schema": {
            "type": "object",
            "properties": {"error": {"$ref": API_ERROR_SCHEMA_REF}},
            "required": ["error"]
        }}}
    })
}

fn page_params(limits: &PageLimits) -> Vec<Value> {
    vec![
        json!({
            "name": PAGE_PARAM,
            "required": false,
            "in": "query",
            "description": "A page number within the paginated result set, or `last`.",
            "schema": {"type": "integer"}
        }),
        json!({
            "name": PAGE_SIZE_PARAM,
            "required": false,
            "in": "query",
            "description": "Number of results to return per page.",
            "schema": {
                "type": "integer",
                "default": limits.default_page_size,
                "minimum": 1,
                "maximum": limits.max_page_size
            }
        }),
    ]
}

fn paginated_schema(item: Value, url: &RequestUrl, limits: &PageLimits) -> Value {
    let num_pages = 4_u64;
    let page_size = limits.default_page_size;
    let count = page_size * num_pages + page_size * 3 / 4;
    json!({
        "type": "object",
        "properties": {
            "paging": {
                "type": "object",
                "description": "paging information",
                "properties": {
                    "links": {
                        "type": "object",
                        "description": "pagination links",
                        "properties": {
                            "current": {"type": "string", "description": "a link to the current page", "example": url.page_link(1)},
                            "first": {"type": "string", "description": "a link to the first page", "example": url.page_link(1)},
                            "last": {"type": "string", "description": "a link to the last page", "example": url.page_link(num_pages)},
                            "next": {"type": "string", "nullable": true, "description": "a link to the next page", "example": url.page_link(2)},
                            "previous": {"type": "string", "nullable": true, "description": "a link to the previous page", "example": Value::Null}
                        }
                    },
                    "page": {"type": "integer", "description": "the current page number", "example": 1},
                    "pages": {"type": "integer", "description": "the total number of pages", "example": num_pages},
                    "size": {"type": "integer", "description": "the number of objects returned on this page", "example": page_size}
                }
            },
            "data": {"type": "array", "items": item},
            "meta": {
                "type": "object",
                "description": "information regarding the response",
                "properties": {
                    "count": {"type": "integer", "description": "the total number of objects on all pages", "example": count}
                }
            }
        }
    })
}

fn operation(endpoint: &Endpoint, base_url: &str, limits: &PageLimits) -> Value {
    let example_url = format!(
        "{}{}",
        base_url.trim_end_matches('/'),
        expand_path(endpoint.path, endpoint.params)
    );
    let item = json!({"$ref": format!("#/components/schemas/{}", endpoint.schema)});

    let mut parameters: Vec<Value> = endpoint
        .params
        .iter()
        .map(|p| {
            let mut schema = json!({"type": p.kind});
            if endpoint.operation_id == "listDistinctChemicalAttribute" && p.location == "path" {
                schema["enum"] = json!(DistinctAttribute::ALL.map(DistinctAttribute::as_str));
            }
            json!({
                "name": p.name,
                "in": p.location,
                "required": p.location == "path",
                "description": p.description,
                "example": p.example,
                "schema": schema
            })
        })
        .collect();

    let mut responses = Map::new();
    let description;
    if endpoint.list {
        parameters.extend(page_params(limits));
        let url = RequestUrl::new(
            base_url,
            &expand_path(endpoint.path, endpoint.params),
            Vec::new(),
        );
        responses.insert(
            "200".to_string(),
            json!({
                "description": "the requested objects",
                "content": {"application/json": {"schema": paginated_schema(item, &url, limits)}}
            }),
        );
        description = format!("{}{LIST_SUFFIX}", endpoint.description);
        responses.insert("400".to_string(), error_response("malformed filter value"));
        responses.insert("404".to_string(), error_response("invalid page"));
    } else {
        responses.insert(
            "200".to_string(),
            json!({
                "description": "the requested object",
                "content": {"application/json": {"schema": item}}
            }),
        );
        description = endpoint.description.to_string();
        responses.insert("404".to_string(), error_response("not found"));
    }
    responses.insert("500".to_string(), error_response("database failure"));
    responses.insert("503".to_string(), error_response("database busy or timed out"));

    json!({
        "operationId": endpoint.operation_id,
        "tags": [endpoint.tag],
        "description": description,
        "parameters": parameters,
        "responses": responses,
        "x-code-samples": code_samples(&example_url)
    })
}

fn nullable_string(description: &str) -> Value {
    json!({"type": "string", "nullable": true, "description": description})
}

fn component_schemas() -> Value {
    let chemical_fields = json!({
        "id": {"type": "integer", "description": "The unique numeric identifier for the raw chemical."},
        "sid": nullable_string("The DTXSID of the curated chemical, when one has been assigned."),
        "rid": nullable_string("The DSSTox registry id of the raw chemical."),
        "name": nullable_string("The curated chemical name, or the raw name when uncurated."),
        "cas": nullable_string("The curated CAS number, or the raw CAS when uncurated.")
    });
    let mut chemical = chemical_fields.clone();
    chemical["datadocument_id"] =
        json!({"type": "integer", "description": "The data document the chemical was extracted from."});
    let mut ingredient = chemical_fields;
    ingredient["min_weight_fraction"] =
        json!({"type": "number", "nullable": true, "description": "minimum weight fraction"});
    ingredient["max_weight_fraction"] =
        json!({"type": "number", "nullable": true, "description": "maximum weight fraction"});
    ingredient["data_type"] = json!({
        "allOf": [{"$ref": "#/components/schemas/DataType"}],
        "nullable": true,
        "description": "The type of the document the chemical was extracted from."
    });
    ingredient["source"] = json!({
        "allOf": [{"$ref": "#/components/schemas/DataSource"}],
        "nullable": true,
        "description": "The source of the document the chemical was extracted from."
    });

    let distinct: Vec<Value> = DistinctAttribute::ALL
        .iter()
        .map(|a| {
            json!({
                "type": "object",
                "properties": {a.as_str(): {"type": "string", "description": a.description()}},
                "required": [a.as_str()]
            })
        })
        .collect();

    json!({
        "ApiError": {
            "type": "object",
            "additionalProperties": false,
            "required": ["code", "message", "details", "request_id"],
            "properties": {
                "code": {"$ref": "#/components/schemas/ApiErrorCode"},
                "message": {"type": "string"},
                "details": {"type": "object"},
                "request_id": {"type": "string"}
            }
        },
        "ApiErrorCode": {"type": "string", "enum": API_ERROR_CODES},
        "Chemical": {"type": "object", "properties": chemical},
        "ChemicalDetail": {"oneOf": [
            {"$ref": "#/components/schemas/Chemical"},
            {"$ref": "#/components/schemas/CuratedChemical"}
        ]},
        "ChemicalDistinct": {"oneOf": distinct},
        "ChemicalPresence": {
            "type": "object",
            "properties": {
                "id": {"type": "integer"},
                "name": {"type": "string", "description": "Tag name."},
                "definition": nullable_string("Tag definition."),
                "kind": nullable_string("Tag kind name.")
            }
        },
        "CuratedChemical": {
            "type": "object",
            "properties": {
                "id": {"type": "string", "description": "The DTXSID."},
                "sid": {"type": "string", "description": "The DTXSID."},
                "name": nullable_string("The curated chemical name."),
                "cas": nullable_string("The curated CAS number.")
            }
        },
        "DataSource": {
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "url": nullable_string("Publisher URL."),
                "description": nullable_string("Publisher description.")
            }
        },
        "DataType": {
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "description": nullable_string("Data type description.")
            }
        },
        "Document": {
            "type": "object",
            "properties": {
                "id": {"type": "integer"},
                "title": {"type": "string"},
                "subtitle": nullable_string("Document subtitle."),
                "organization": nullable_string("Publishing organization."),
                "date": nullable_string("Publication date."),
                "url": nullable_string("Link to the original document."),
                "data_type": {"allOf": [{"$ref": "#/components/schemas/DataType"}], "nullable": true},
                "source": {"allOf": [{"$ref": "#/components/schemas/DataSource"}], "nullable": true},
                "product_ids": {"type": "array", "items": {"type": "integer"}},
                "chemicals": {"type": "array", "items": {"$ref": "#/components/schemas/Ingredient"}}
            }
        },
        "Ingredient": {"type": "object", "properties": ingredient},
        "PUC": {
            "type": "object",
            "properties": {
                "id": {"type": "integer", "description": "The unique numeric identifier for the PUC, used to cross-reference data obtained from other Factotum APIs."},
                "level_1_category": {"type": "string", "description": "High-level product sector, such as personal care products or vehicle-related products."},
                "level_2_category": {"type": "string", "description": "Unique product families under each of the product sectors."},
                "level_3_category": {"type": "string", "description": "Specific product types in a product family."},
                "definition": {"type": "string", "description": "Definition or description of products that may be assigned to the PUC."},
                "kind": {"type": "string", "enum": PucKind::ALL.map(PucKind::code), "description": "A means by which PUCs can be grouped, e.g. formulations or articles."},
                "name": {"type": "string", "description": "The non-empty category levels joined by ' - '."},
                "num_products": {"type": "integer", "minimum": 0, "description": "Distinct products assigned to the PUC, scoped to the chemical filter when one is given."}
            }
        },
        "Product": {
            "type": "object",
            "properties": {
                "id": {"type": "integer", "description": "The unique numeric identifier for the product, used to cross-reference data obtained from other Factotum APIs."},
                "name": {"type": "string", "description": "Name of the product."},
                "upc": {"type": "string", "description": "The Universal Product Code; 'stub#' when unknown."},
                "manufacturer": nullable_string("Manufacturer of the product, if known."),
                "brand": nullable_string("Brand name for the product, if known."),
                "puc_id": {"type": "integer", "nullable": true, "description": "The PUC assigned to the product, if one has been assigned."},
                "document_id": {"type": "integer", "nullable": true, "description": "The original data document associated with the product."}
            }
        }
    })
}

/// OpenAPI 3 document; `base_url` seeds link examples and code samples.
#[must_use]
pub fn openapi_spec(base_url: &str, limits: &PageLimits) -> Value {
    let mut paths = Map::new();
    for endpoint in ENDPOINTS {
        paths.insert(
            endpoint.path.to_string(),
            json!({"get": operation(endpoint, base_url, limits)}),
        );
    }
    json!({
        "openapi": "3.0.2",
        "info": {
            "title": TITLE,
            "version": VERSION,
            "description": DESCRIPTION
        },
        "servers": [{"url": base_url.trim_end_matches('/')}],
        "paths": paths,
        "components": {"schemas": component_schemas()}
    })
}
