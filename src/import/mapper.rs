//! Header-to-field resolution for uploaded spreadsheets.

use strsim::jaro_winkler;

use crate::catalog::{required_fields, FieldDef, SitioField, FIELD_CATALOG};
use crate::models::ColumnMapping;

/// Resolve each source header against the field catalog: exact
/// case-insensitive match on the expected header first, then a
/// substring match in either direction against the human label.
/// The first catalog entry found wins; catalog order is the tie-break.
///
/// The result is advisory. Callers may remap `sitio_field` per column
/// before transformation, so `auto_matched` records how the mapping was
/// produced, not whether it is mapped.
pub fn auto_map_columns(headers: &[String]) -> Vec<ColumnMapping> {
    headers
        .iter()
        .map(|header| match match_header(header) {
            Some(def) => ColumnMapping {
                csv_header: header.clone(),
                sitio_field: Some(def.field),
                is_required: def.required,
                auto_matched: true,
            },
            None => ColumnMapping {
                csv_header: header.clone(),
                sitio_field: None,
                is_required: false,
                auto_matched: false,
            },
        })
        .collect()
}

fn match_header(header: &str) -> Option<&'static FieldDef> {
    let h = header.trim().to_lowercase();
    if h.is_empty() {
        return None;
    }
    if let Some(def) = FIELD_CATALOG
        .iter()
        .find(|d| d.csv_header.to_lowercase() == h)
    {
        return Some(def);
    }
    FIELD_CATALOG.iter().find(|d| {
        let label = d.label.to_lowercase();
        h.contains(&label) || label.contains(&h)
    })
}

/// Advisory suggestion for a header the auto-map left unmapped, scored
/// by Jaro-Winkler against both the label and the expected header.
/// Meant for the manual-remap surface; never applied automatically.
pub fn suggest_field(header: &str, threshold: f64) -> Option<(SitioField, f64)> {
    let h = header.trim().to_lowercase();
    if h.is_empty() {
        return None;
    }
    let mut best: Option<(SitioField, f64)> = None;
    for def in FIELD_CATALOG {
        let score = jaro_winkler(&h, &def.label.to_lowercase())
            .max(jaro_winkler(&h, &def.csv_header.to_lowercase()));
        if score >= threshold && best.map_or(true, |(_, b)| score > b) {
            best = Some((def.field, score));
        }
    }
    best
}

/// Required catalog fields no column maps to, in catalog order. A
/// nonempty result means the upload cannot produce acceptable records.
pub fn missing_required_fields(mappings: &[ColumnMapping]) -> Vec<SitioField> {
    required_fields()
        .into_iter()
        .filter(|f| !mappings.iter().any(|m| m.sitio_field == Some(*f)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_match_is_case_insensitive() {
        let maps = auto_map_columns(&headers(&["coding-municipality", "Barangay", "SITIO"]));
        assert_eq!(maps[0].sitio_field, Some(SitioField::Municipality));
        assert!(maps[0].is_required);
        assert!(maps[0].auto_matched);
        assert_eq!(maps[1].sitio_field, Some(SitioField::Barangay));
        assert_eq!(maps[2].sitio_field, Some(SitioField::Name));
    }

    #[test]
    fn label_substring_matches_both_directions() {
        // Label contained in the header
        let maps = auto_map_columns(&headers(&["MUNICIPALITY NAME"]));
        assert_eq!(maps[0].sitio_field, Some(SitioField::Municipality));
        // Header contained in the label
        let maps = auto_map_columns(&headers(&["Crop"]));
        assert_eq!(maps[0].sitio_field, Some(SitioField::TopCrops));
    }

    #[test]
    fn extra_numbered_column_falls_back_to_label() {
        // Not in the catalog verbatim, but the label still matches
        let maps = auto_map_columns(&headers(&["TOP CROP 4"]));
        assert_eq!(maps[0].sitio_field, Some(SitioField::TopCrops));
    }

    #[test]
    fn unknown_header_stays_unmapped() {
        let maps = auto_map_columns(&headers(&["REMARKS OF ENCODER"]));
        assert_eq!(maps[0].sitio_field, None);
        assert!(!maps[0].auto_matched);
        assert!(!maps[0].is_required);
    }

    #[test]
    fn empty_header_never_matches() {
        let maps = auto_map_columns(&headers(&["", "   "]));
        assert!(maps.iter().all(|m| m.sitio_field.is_none()));
    }

    #[test]
    fn suggestion_for_misspelled_header() {
        let hit = suggest_field("LATITUED", 0.78);
        assert_eq!(hit.map(|(f, _)| f), Some(SitioField::Latitude));
        assert!(suggest_field("ZZZZZZ", 0.78).is_none());
    }

    #[test]
    fn reports_missing_required_fields_in_catalog_order() {
        let maps = auto_map_columns(&headers(&["SITIO", "POPULATION"]));
        assert_eq!(
            missing_required_fields(&maps),
            vec![SitioField::Municipality, SitioField::Barangay]
        );
    }
}
