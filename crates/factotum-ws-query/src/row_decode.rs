// SPDX-License-Identifier: Apache-2.0

use factotum_ws_model::{
    ChemicalPresenceTag, DataDocument, DataSource, DocumentType, DsstoxLookup, Product, Puc,
    PucKind, RawChem, WeightFraction,
};
use rusqlite::Row;

pub(crate) const PUC_COLUMNS: &str =
    "p.id, p.gen_cat, p.prod_fam, p.prod_type, p.description, p.kind";

pub(crate) fn puc_from_row(row: &Row<'_>) -> rusqlite::Result<Puc> {
    let kind: String = row.get(5)?;
    let num_products: i64 = row.get(6)?;
    Ok(Puc {
        id: row.get(0)?,
        gen_cat: row.get(1)?,
        prod_fam: row.get(2)?,
        prod_type: row.get(3)?,
        description: row.get(4)?,
        kind: PucKind::from_code(&kind),
        num_products: u64::try_from(num_products).unwrap_or(0),
    })
}

pub(crate) const PRODUCT_COLUMNS: &str = "p.id, p.title, p.upc, p.manufacturer, p.brand_name, \
     (SELECT MIN(pp.puc_id) FROM dashboard_producttopuc pp WHERE pp.product_id = p.id AND pp.is_uber_puc = 1), \
     (SELECT MIN(pd.document_id) FROM dashboard_productdocument pd WHERE pd.product_id = p.id)";

pub(crate) fn product_from_row(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        title: row.get(1)?,
        upc: row.get(2)?,
        manufacturer: row.get(3)?,
        brand_name: row.get(4)?,
        uber_puc_id: row.get(5)?,
        first_document_id: row.get(6)?,
    })
}

pub(crate) const CHEMICAL_COLUMNS: &str = "rc.id, rc.rid, rc.raw_chem_name, rc.raw_cas, rc.extracted_text_id, \
     d.id, d.sid, d.true_cas, d.true_chemname, \
     ec.rawchem_ptr_id, ec.lower_wf_analysis, ec.central_wf_analysis, ec.upper_wf_analysis";

pub(crate) const CHEMICAL_FROM: &str = "FROM dashboard_rawchem rc \
     LEFT JOIN dashboard_dsstoxlookup d ON d.id = rc.dsstox_id \
     LEFT JOIN dashboard_extractedchemical ec ON ec.rawchem_ptr_id = rc.id";

pub(crate) fn chemical_from_row(row: &Row<'_>) -> rusqlite::Result<RawChem> {
    let dsstox_id: Option<i64> = row.get(5)?;
    let dsstox = match dsstox_id {
        Some(id) => Some(DsstoxLookup {
            id,
            sid: row.get(6)?,
            true_cas: row.get(7)?,
            true_chemname: row.get(8)?,
        }),
        None => None,
    };
    let composition: Option<i64> = row.get(9)?;
    let weight_fraction = match composition {
        Some(_) => Some(WeightFraction {
            lower: row.get(10)?,
            central: row.get(11)?,
            upper: row.get(12)?,
        }),
        None => None,
    };
    Ok(RawChem {
        id: row.get(0)?,
        rid: row.get(1)?,
        raw_chem_name: row.get(2)?,
        raw_cas: row.get(3)?,
        extracted_text_id: row.get(4)?,
        dsstox,
        weight_fraction,
    })
}

pub(crate) const DSSTOX_COLUMNS: &str = "d.id, d.sid, d.true_cas, d.true_chemname";

pub(crate) fn dsstox_from_row(row: &Row<'_>) -> rusqlite::Result<DsstoxLookup> {
    Ok(DsstoxLookup {
        id: row.get(0)?,
        sid: row.get(1)?,
        true_cas: row.get(2)?,
        true_chemname: row.get(3)?,
    })
}

pub(crate) const DOCUMENT_COLUMNS: &str = "dd.id, dd.title, dd.subtitle, dd.organization, dd.date, dd.url, \
     dt.id, dt.title, dt.description, ds.id, ds.title, ds.url, ds.description";

pub(crate) const DOCUMENT_FROM: &str = "FROM dashboard_datadocument dd \
     LEFT JOIN dashboard_documenttype dt ON dt.id = dd.document_type_id \
     LEFT JOIN dashboard_datagroup dg ON dg.id = dd.data_group_id \
     LEFT JOIN dashboard_datasource ds ON ds.id = dg.data_source_id";

/// Products and chemicals are attached by the caller.
pub(crate) fn document_from_row(row: &Row<'_>) -> rusqlite::Result<DataDocument> {
    let type_id: Option<i64> = row.get(6)?;
    let document_type = match type_id {
        Some(_) => Some(DocumentType {
            title: row.get(7)?,
            description: row.get(8)?,
        }),
        None => None,
    };
    let source_id: Option<i64> = row.get(9)?;
    let data_source = match source_id {
        Some(_) => Some(DataSource {
            title: row.get(10)?,
            url: row.get(11)?,
            description: row.get(12)?,
        }),
        None => None,
    };
    Ok(DataDocument {
        id: row.get(0)?,
        title: row.get(1)?,
        subtitle: row.get(2)?,
        organization: row.get(3)?,
        date: row.get(4)?,
        url: row.get(5)?,
        document_type,
        data_source,
        product_ids: Vec::new(),
        chemicals: Vec::new(),
    })
}

pub(crate) const PRESENCE_TAG_COLUMNS: &str = "t.id, t.name, t.definition, k.name";

pub(crate) const PRESENCE_TAG_FROM: &str = "FROM dashboard_extractedlistpresencetag t \
     LEFT JOIN dashboard_extractedlistpresencetagkind k ON k.id = t.kind_id";

pub(crate) fn presence_tag_from_row(row: &Row<'_>) -> rusqlite::Result<ChemicalPresenceTag> {
    Ok(ChemicalPresenceTag {
        id: row.get(0)?,
        name: row.get(1)?,
        definition: row.get(2)?,
        kind: row.get(3)?,
    })
}
