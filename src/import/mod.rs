//! The ingestion pipeline: Mapper → Transformer → Validator →
//! Duplicate Detector. One call per uploaded file; pure over the
//! parsed sheet and the supplied record set.

pub mod dedup;
pub mod mapper;
pub mod summary;
pub mod transform;
pub mod validate;

use log::info;
use uuid::Uuid;

use crate::models::{DuplicateRecord, ParsedSheet, Sitio, SitioDraft, ValidationError};

/// Everything one import run produces. Valid rows come out as fully
/// assembled records with fresh ids; invalid rows stay drafts so the
/// caller can surface what was actually read.
#[derive(Debug, Default)]
pub struct ImportOutcome {
    pub valid: Vec<Sitio>,
    pub invalid: Vec<SitioDraft>,
    pub errors: Vec<ValidationError>,
    pub duplicates: Vec<DuplicateRecord>,
}

pub fn run_import(
    sheet: &ParsedSheet,
    mappings: &[crate::models::ColumnMapping],
    existing: &[Sitio],
) -> ImportOutcome {
    let drafts: Vec<SitioDraft> = sheet
        .rows
        .iter()
        .map(|row| transform::transform_row(row, mappings))
        .collect();
    let batch = validate::validate_batch(drafts);
    let duplicates = dedup::find_duplicates(&batch.valid, existing);
    let valid: Vec<Sitio> = batch
        .valid
        .iter()
        .map(|draft| draft.assemble(Uuid::new_v4().to_string()))
        .collect();
    info!(
        "import: {} rows, {} valid, {} invalid, {} duplicates",
        sheet.rows.len(),
        valid.len(),
        batch.invalid.len(),
        duplicates.len()
    );
    ImportOutcome {
        valid,
        invalid: batch.invalid,
        errors: batch.errors,
        duplicates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CellValue;
    use std::collections::HashMap;

    fn sheet(headers: &[&str], rows: Vec<Vec<CellValue>>) -> ParsedSheet {
        let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        let rows = rows
            .into_iter()
            .map(|cells| {
                headers
                    .iter()
                    .cloned()
                    .zip(cells)
                    .collect::<HashMap<_, _>>()
            })
            .collect();
        ParsedSheet { headers, rows }
    }

    #[test]
    fn end_to_end_run_partitions_and_flags_duplicates() {
        let s = sheet(
            &[
                "CODING-MUNICIPALITY",
                "BARANGAY",
                "SITIO",
                "POPULATION - Male",
                "POPULATION - Female",
            ],
            vec![
                vec![
                    CellValue::Text("Banga".into()),
                    CellValue::Text("Liwanay".into()),
                    CellValue::Text("Proper Lampaco".into()),
                    CellValue::Number(224.0),
                    CellValue::Number(188.0),
                ],
                // Missing barangay: invalid
                vec![
                    CellValue::Text("Banga".into()),
                    CellValue::Empty,
                    CellValue::Text("Upper Lampaco".into()),
                    CellValue::Number(50.0),
                    CellValue::Number(40.0),
                ],
            ],
        );
        let mappings = mapper::auto_map_columns(&s.headers);
        let existing = vec![Sitio {
            id: "old".into(),
            municipality: "banga".into(),
            barangay: "liwanay".into(),
            name: "proper lampaco".into(),
            ..Default::default()
        }];
        let outcome = run_import(&s, &mappings, &existing);
        assert_eq!(outcome.valid.len(), 1);
        assert_eq!(outcome.invalid.len(), 1);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].row, 2);
        assert_eq!(outcome.duplicates.len(), 1);

        let accepted = &outcome.valid[0];
        assert!(!accepted.id.is_empty());
        assert_eq!(accepted.population, 412);
        assert_eq!(accepted.demographics.as_ref().unwrap().total, 412);
    }
}
