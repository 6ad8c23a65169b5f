// SPDX-License-Identifier: Apache-2.0

//! Resource endpoints. Each handler parses filters and paging from the
//! query, runs one unit of database work and wraps the rows in the paging
//! envelope.

use axum::extract::State;
use axum::response::Response;
use factotum_ws_api::{
    parse_chemical_filter, parse_chemical_lookup, parse_distinct_attribute, parse_document_filter,
    parse_page_request, parse_path_id, parse_presence_filter, parse_product_filter,
    parse_puc_filter, ApiError, ChemicalDetailDto, ChemicalDto, ChemicalLookup,
    ChemicalPresenceDto, CuratedChemicalDto, DistinctValueDto, DocumentDto, Paginated,
    ProductDto, PucDto,
};
use factotum_ws_query::{
    get_chemical, get_chemical_by_rid, get_curated_chemical, get_document, get_presence_tag,
    get_product, get_puc, list_chemicals, list_distinct, list_documents, list_presence_tags,
    list_products, list_pucs, QueryError,
};
use rusqlite::Connection;

use crate::http::request_context::{PathSegment, RequestContext};
use crate::http::response_contract::{db_error_to_api, json_response};
use crate::AppState;

pub(crate) const NO_MATCH: &str = "No resource matches the given query.";

pub(crate) async fn run_query<T, F>(state: &AppState, work: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&Connection) -> Result<T, QueryError> + Send + 'static,
{
    state
        .db
        .run(work)
        .await
        .map_err(|e| db_error_to_api(e, state.api.debug))
}

fn found<T>(row: Option<T>, message: &str) -> Result<T, ApiError> {
    row.ok_or_else(|| ApiError::not_found(message))
}

pub(crate) async fn list_pucs_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Response {
    let result = async {
        let filter = parse_puc_filter(&ctx.query)?;
        let req = parse_page_request(&ctx.query, &state.api.page_limits)?;
        let page = run_query(&state, move |conn| list_pucs(conn, &filter, &req)).await?;
        Ok::<_, ApiError>(json_response(Paginated::from_page(
            page.map(PucDto::from),
            &ctx.url,
        )))
    }
    .await;
    ctx.respond(result)
}

pub(crate) async fn puc_detail_handler(
    State(state): State<AppState>,
    PathSegment(id): PathSegment,
    ctx: RequestContext,
) -> Response {
    let result = async {
        let id = parse_path_id(&id)?;
        let puc = found(run_query(&state, move |conn| get_puc(conn, id)).await?, NO_MATCH)?;
        Ok::<_, ApiError>(json_response(PucDto::from(puc)))
    }
    .await;
    ctx.respond(result)
}

pub(crate) async fn list_products_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Response {
    let result = async {
        let filter = parse_product_filter(&ctx.query)?;
        let req = parse_page_request(&ctx.query, &state.api.page_limits)?;
        let page = run_query(&state, move |conn| list_products(conn, &filter, &req)).await?;
        Ok::<_, ApiError>(json_response(Paginated::from_page(
            page.map(ProductDto::from),
            &ctx.url,
        )))
    }
    .await;
    ctx.respond(result)
}

pub(crate) async fn product_detail_handler(
    State(state): State<AppState>,
    PathSegment(id): PathSegment,
    ctx: RequestContext,
) -> Response {
    let result = async {
        let id = parse_path_id(&id)?;
        let product = found(
            run_query(&state, move |conn| get_product(conn, id)).await?,
            NO_MATCH,
        )?;
        Ok::<_, ApiError>(json_response(ProductDto::from(product)))
    }
    .await;
    ctx.respond(result)
}

pub(crate) async fn list_chemicals_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Response {
    let result = async {
        let filter = parse_chemical_filter(&ctx.query)?;
        let req = parse_page_request(&ctx.query, &state.api.page_limits)?;
        let page = run_query(&state, move |conn| list_chemicals(conn, &filter, &req)).await?;
        Ok::<_, ApiError>(json_response(Paginated::from_page(
            page.map(ChemicalDto::from),
            &ctx.url,
        )))
    }
    .await;
    ctx.respond(result)
}

/// Digits name a raw chemical, a DTXSID names a curated one, anything else
/// is a registry id.
pub(crate) async fn chemical_detail_handler(
    State(state): State<AppState>,
    PathSegment(id_or_code): PathSegment,
    ctx: RequestContext,
) -> Response {
    const NO_CHEMICAL: &str = "No chemical matches the given query.";
    let result = async {
        let detail = match parse_chemical_lookup(&id_or_code)? {
            ChemicalLookup::Id(id) => {
                let row = run_query(&state, move |conn| get_chemical(conn, id)).await?;
                ChemicalDetailDto::Raw(ChemicalDto::from(found(row, NO_CHEMICAL)?))
            }
            ChemicalLookup::Sid(sid) => {
                let row = run_query(&state, move |conn| get_curated_chemical(conn, &sid)).await?;
                ChemicalDetailDto::Curated(CuratedChemicalDto::from(found(row, NO_CHEMICAL)?))
            }
            ChemicalLookup::Rid(rid) => {
                let row = run_query(&state, move |conn| get_chemical_by_rid(conn, &rid)).await?;
                ChemicalDetailDto::Raw(ChemicalDto::from(found(row, NO_CHEMICAL)?))
            }
        };
        Ok::<_, ApiError>(json_response(detail))
    }
    .await;
    ctx.respond(result)
}

pub(crate) async fn distinct_chemicals_handler(
    State(state): State<AppState>,
    PathSegment(attribute): PathSegment,
    ctx: RequestContext,
) -> Response {
    let result = async {
        let attribute = parse_distinct_attribute(&attribute)?;
        let req = parse_page_request(&ctx.query, &state.api.page_limits)?;
        let page = run_query(&state, move |conn| list_distinct(conn, attribute, &req)).await?;
        Ok::<_, ApiError>(json_response(Paginated::from_page(
            page.map(|value| DistinctValueDto::new(attribute, value)),
            &ctx.url,
        )))
    }
    .await;
    ctx.respond(result)
}

pub(crate) async fn list_documents_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Response {
    let result = async {
        let filter = parse_document_filter(&ctx.query)?;
        let req = parse_page_request(&ctx.query, &state.api.page_limits)?;
        let page = run_query(&state, move |conn| list_documents(conn, &filter, &req)).await?;
        Ok::<_, ApiError>(json_response(Paginated::from_page(
            page.map(DocumentDto::from),
            &ctx.url,
        )))
    }
    .await;
    ctx.respond(result)
}

pub(crate) async fn document_detail_handler(
    State(state): State<AppState>,
    PathSegment(id): PathSegment,
    ctx: RequestContext,
) -> Response {
    let result = async {
        let id = parse_path_id(&id)?;
        let document = found(
            run_query(&state, move |conn| get_document(conn, id)).await?,
            NO_MATCH,
        )?;
        Ok::<_, ApiError>(json_response(DocumentDto::from(document)))
    }
    .await;
    ctx.respond(result)
}

pub(crate) async fn list_presences_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Response {
    let result = async {
        let filter = parse_presence_filter(&ctx.query)?;
        let req = parse_page_request(&ctx.query, &state.api.page_limits)?;
        let page =
            run_query(&state, move |conn| list_presence_tags(conn, &filter, &req)).await?;
        Ok::<_, ApiError>(json_response(Paginated::from_page(
            page.map(ChemicalPresenceDto::from),
            &ctx.url,
        )))
    }
    .await;
    ctx.respond(result)
}

pub(crate) async fn presence_detail_handler(
    State(state): State<AppState>,
    PathSegment(id): PathSegment,
    ctx: RequestContext,
) -> Response {
    let result = async {
        let id = parse_path_id(&id)?;
        let tag = found(
            run_query(&state, move |conn| get_presence_tag(conn, id)).await?,
            NO_MATCH,
        )?;
        Ok::<_, ApiError>(json_response(ChemicalPresenceDto::from(tag)))
    }
    .await;
    ctx.respond(result)
}

pub(crate) async fn not_found_handler(ctx: RequestContext) -> Response {
    ctx.respond(Err(ApiError::not_found(NO_MATCH)))
}
