// SPDX-License-Identifier: Apache-2.0

use factotum_ws_model::ChemicalPresenceTag;
use rusqlite::{types::Value, Connection};

use super::{text, ListPlan};
use crate::filters::PresenceTagFilter;
use crate::pagination::{Page, PageRequest};
use crate::query_error::QueryError;
use crate::row_decode::{presence_tag_from_row, PRESENCE_TAG_COLUMNS, PRESENCE_TAG_FROM};

pub fn list_presence_tags(
    conn: &Connection,
    filter: &PresenceTagFilter,
    req: &PageRequest,
) -> Result<Page<ChemicalPresenceTag>, QueryError> {
    let mut plan = ListPlan::new(PRESENCE_TAG_FROM);
    if let Some(kind) = &filter.kind {
        plan.filter("k.name = ?", [text(kind)]);
    }
    if let Some(sid) = &filter.chemical {
        plan.filter(
            "t.id IN (SELECT pt.tag_id FROM dashboard_extractedlistpresencetotag pt \
             JOIN dashboard_rawchem rc ON rc.id = pt.content_object_id \
             JOIN dashboard_dsstoxlookup dx ON dx.id = rc.dsstox_id WHERE dx.sid = ?)",
            [text(sid.as_str())],
        );
    }
    plan.fetch_page(
        conn,
        PRESENCE_TAG_COLUMNS,
        &[],
        "COUNT(*)",
        "t.id ASC",
        req,
        presence_tag_from_row,
    )
}

pub fn get_presence_tag(
    conn: &Connection,
    id: i64,
) -> Result<Option<ChemicalPresenceTag>, QueryError> {
    let mut plan = ListPlan::new(PRESENCE_TAG_FROM);
    plan.filter("t.id = ?", [Value::Integer(id)]);
    plan.fetch_first(
        conn,
        PRESENCE_TAG_COLUMNS,
        &[],
        "t.id ASC",
        presence_tag_from_row,
    )
}
