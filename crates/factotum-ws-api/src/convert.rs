// SPDX-License-Identifier: Apache-2.0

use factotum_ws_model::{
    ChemicalPresenceTag, DataDocument, DataSource, DistinctAttribute, DocumentType, DsstoxLookup,
    Product, Puc, RawChem,
};

use crate::dto::{
    ChemicalDto, ChemicalPresenceDto, CuratedChemicalDto, DataSourceDto, DataTypeDto,
    DistinctValueDto, DocumentDto, IngredientDto, ProductDto, PucDto,
};

fn owned(v: Option<&str>) -> Option<String> {
    v.map(ToString::to_string)
}

impl From<Puc> for PucDto {
    fn from(puc: Puc) -> Self {
        let name = puc.display_name();
        Self {
            id: puc.id,
            level_1_category: puc.gen_cat,
            level_2_category: puc.prod_fam,
            level_3_category: puc.prod_type,
            definition: puc.description,
            kind: puc.kind.code().to_string(),
            name,
            num_products: puc.num_products,
        }
    }
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.title,
            upc: p.upc,
            manufacturer: p.manufacturer,
            brand: p.brand_name,
            puc_id: p.uber_puc_id,
            document_id: p.first_document_id,
        }
    }
}

impl From<&RawChem> for ChemicalDto {
    fn from(c: &RawChem) -> Self {
        Self {
            id: c.id,
            sid: owned(c.sid()),
            rid: c.rid.clone(),
            name: owned(c.name()),
            cas: owned(c.cas()),
            datadocument_id: c.extracted_text_id,
        }
    }
}

impl From<RawChem> for ChemicalDto {
    fn from(c: RawChem) -> Self {
        Self::from(&c)
    }
}

impl From<DsstoxLookup> for CuratedChemicalDto {
    fn from(d: DsstoxLookup) -> Self {
        Self {
            id: d.sid.clone(),
            sid: d.sid,
            name: d.true_chemname,
            cas: d.true_cas,
        }
    }
}

impl IngredientDto {
    /// One chemical of a document, labelled with that document's type and source.
    #[must_use]
    pub fn in_document(
        c: &RawChem,
        data_type: Option<&DataTypeDto>,
        source: Option<&DataSourceDto>,
    ) -> Self {
        let wf = c.weight_fraction.unwrap_or_default();
        Self {
            id: c.id,
            sid: owned(c.sid()),
            rid: c.rid.clone(),
            name: owned(c.name()),
            cas: owned(c.cas()),
            min_weight_fraction: wf.min(),
            max_weight_fraction: wf.max(),
            data_type: data_type.cloned(),
            source: source.cloned(),
        }
    }
}

impl From<DocumentType> for DataTypeDto {
    fn from(t: DocumentType) -> Self {
        Self {
            name: t.title,
            description: t.description,
        }
    }
}

impl From<DataSource> for DataSourceDto {
    fn from(s: DataSource) -> Self {
        Self {
            name: s.title,
            url: s.url,
            description: s.description,
        }
    }
}

impl From<DataDocument> for DocumentDto {
    fn from(d: DataDocument) -> Self {
        let data_type = d.document_type.map(DataTypeDto::from);
        let source = d.data_source.map(DataSourceDto::from);
        let chemicals = d
            .chemicals
            .iter()
            .map(|c| IngredientDto::in_document(c, data_type.as_ref(), source.as_ref()))
            .collect();
        Self {
            id: d.id,
            title: d.title,
            subtitle: d.subtitle,
            organization: d.organization,
            date: d.date,
            url: d.url,
            data_type,
            source,
            product_ids: d.product_ids,
            chemicals,
        }
    }
}

impl From<ChemicalPresenceTag> for ChemicalPresenceDto {
    fn from(t: ChemicalPresenceTag) -> Self {
        Self {
            id: t.id,
            name: t.name,
            definition: t.definition,
            kind: t.kind,
        }
    }
}

impl DistinctValueDto {
    #[must_use]
    pub fn new(attribute: DistinctAttribute, value: String) -> Self {
        match attribute {
            DistinctAttribute::Sid => Self::Sid { sid: value },
            DistinctAttribute::TrueCas => Self::TrueCas { true_cas: value },
            DistinctAttribute::TrueChemname => Self::TrueChemname {
                true_chemname: value,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use factotum_ws_model::{PucKind, WeightFraction};
    use serde_json::json;

    fn chem(dsstox: Option<DsstoxLookup>) -> RawChem {
        RawChem {
            id: 5,
            rid: Some("DTXRID5".to_string()),
            raw_chem_name: Some("aqua".to_string()),
            raw_cas: Some("7732-18-5".to_string()),
            extracted_text_id: 9,
            dsstox,
            weight_fraction: Some(WeightFraction {
                lower: Some(0.1),
                central: None,
                upper: Some(0.3),
            }),
        }
    }

    #[test]
    fn puc_aliases_columns_and_derives_name() {
        let dto = PucDto::from(Puc {
            id: 3,
            gen_cat: "Arts and crafts".to_string(),
            prod_fam: "paints".to_string(),
            prod_type: String::new(),
            description: "Craft paints.".to_string(),
            kind: PucKind::Formulation,
            num_products: 12,
        });
        assert_eq!(
            serde_json::to_value(&dto).expect("json"),
            json!({
                "id": 3,
                "level_1_category": "Arts and crafts",
                "level_2_category": "paints",
                "level_3_category": "",
                "definition": "Craft paints.",
                "kind": "FO",
                "name": "Arts and crafts - paints",
                "num_products": 12
            })
        );
    }

    #[test]
    fn chemical_switches_between_raw_and_curated_identity() {
        let raw = ChemicalDto::from(chem(None));
        assert_eq!(raw.sid, None);
        assert_eq!(raw.name.as_deref(), Some("aqua"));
        assert_eq!(raw.datadocument_id, 9);

        let curated = ChemicalDto::from(chem(Some(DsstoxLookup {
            id: 1,
            sid: "DTXSID6026296".to_string(),
            true_cas: Some("7732-18-5".to_string()),
            true_chemname: Some("Water".to_string()),
        })));
        assert_eq!(curated.sid.as_deref(), Some("DTXSID6026296"));
        assert_eq!(curated.name.as_deref(), Some("Water"));
    }

    #[test]
    fn ingredient_carries_weight_fraction_range() {
        let dto = IngredientDto::in_document(&chem(None), None, None);
        assert_eq!(dto.min_weight_fraction, Some(0.1));
        assert_eq!(dto.max_weight_fraction, Some(0.3));
        assert_eq!(dto.data_type, None);

        let data_type = DataTypeDto {
            name: "Composition".to_string(),
            description: None,
        };
        let dto = IngredientDto::in_document(&chem(None), Some(&data_type), None);
        assert_eq!(
            serde_json::to_value(&dto).expect("json")["data_type"],
            json!({"name": "Composition", "description": null})
        );
        assert_eq!(dto.source, None);
    }

    #[test]
    fn distinct_rows_are_keyed_by_attribute() {
        let row = DistinctValueDto::new(DistinctAttribute::TrueCas, "50-00-0".to_string());
        assert_eq!(
            serde_json::to_value(row).expect("json"),
            json!({"true_cas": "50-00-0"})
        );
    }
}
