//! Folds one raw row through the column mappings into a `SitioDraft`.

use std::collections::HashMap;

use crate::catalog::SitioField;
use crate::models::{CellValue, Scalar, SitioDraft};

/// Build a draft record from one raw row. Unmapped columns and empty
/// cells are skipped so defaults are never overwritten; mapping order
/// determines list order for multi-column "Top N" fields. Gap-filling
/// derivations run once at the end.
pub fn transform_row(
    row: &HashMap<String, CellValue>,
    mappings: &[crate::models::ColumnMapping],
) -> SitioDraft {
    let mut draft = SitioDraft::default();
    for mapping in mappings {
        let Some(field) = mapping.sitio_field else {
            continue;
        };
        let Some(cell) = row.get(&mapping.csv_header) else {
            continue;
        };
        let Some(value) = Scalar::coerce(cell) else {
            continue;
        };
        apply_field(&mut draft, field, value);
    }
    draft.derive_totals();
    draft
}

fn apply_field(draft: &mut SitioDraft, field: SitioField, value: Scalar) {
    match field {
        // String lists: set-like insert, insertion order preserved
        SitioField::TopCrops => push_unique(&mut draft.agriculture.top_crops, value),
        SitioField::LivestockKinds => push_unique(&mut draft.livestock, value),
        SitioField::DomesticAnimalKinds => push_unique(&mut draft.domestic_animals, value),
        SitioField::Organizations => push_unique(&mut draft.community_empowerment, value),

        // Tagged lists: register the category, counts stay zero
        SitioField::Employments => draft.economic.register_employment(&value.display_text()),
        SitioField::IncomeBrackets => {
            draft.economic.register_income_bracket(&value.display_text())
        }
        SitioField::HousingQuality => draft.housing.register_quality(&value.display_text()),
        SitioField::HousingOwnership => draft.housing.register_ownership(&value.display_text()),

        // Scalars: direct assign of the coerced value
        SitioField::Municipality => draft.municipality = Some(value),
        SitioField::Barangay => draft.barangay = Some(value),
        SitioField::Name => draft.name = Some(value),
        SitioField::Population => draft.population = Some(value),
        SitioField::Households => draft.households = Some(value),
        SitioField::Latitude => draft.latitude = Some(value),
        SitioField::Longitude => draft.longitude = Some(value),
        SitioField::NeedScore => draft.need_score = Some(value),
        SitioField::DemoMale => draft.demographics.male = Some(value),
        SitioField::DemoFemale => draft.demographics.female = Some(value),
        SitioField::DemoTotal => draft.demographics.total = Some(value),
        SitioField::DemoAge0_14 => draft.demographics.age_0_14 = Some(value),
        SitioField::DemoAge15_64 => draft.demographics.age_15_64 = Some(value),
        SitioField::DemoAge65Plus => draft.demographics.age_65_plus = Some(value),
        SitioField::SchoolDistanceKm => draft.social_services.school_distance_km = Some(value),
        SitioField::HealthStationDistanceKm => {
            draft.social_services.health_station_distance_km = Some(value)
        }
        SitioField::HasDaycare => draft.social_services.has_daycare = Some(value),
        SitioField::FarmAreaHa => draft.agriculture.farm_area_ha = Some(value),
        SitioField::WaterSource => draft.water_sanitation.water_source = Some(value),
        SitioField::ToiletHouseholds => draft.water_sanitation.toilet_households = Some(value),
        SitioField::MealsPerDay => draft.food_security.meals_per_day = Some(value),
        SitioField::FoodShortage => draft.food_security.experiences_shortage = Some(value),
        SitioField::HasElectricity => draft.utilities.has_electricity = Some(value),
        SitioField::CellularSignal => draft.utilities.cellular_signal = Some(value),
    }
}

fn push_unique(list: &mut Vec<String>, value: Scalar) {
    let text = value.display_text();
    if !list.contains(&text) {
        list.push(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::mapper::auto_map_columns;
    use crate::models::ColumnMapping;

    fn row(cells: &[(&str, CellValue)]) -> HashMap<String, CellValue> {
        cells
            .iter()
            .map(|(h, v)| (h.to_string(), v.clone()))
            .collect()
    }

    fn mapped(header: &str, field: SitioField) -> ColumnMapping {
        ColumnMapping {
            csv_header: header.to_string(),
            sitio_field: Some(field),
            is_required: false,
            auto_matched: true,
        }
    }

    #[test]
    fn full_auto_mapped_row_with_derived_totals() {
        let headers: Vec<String> = [
            "CODING-MUNICIPALITY",
            "BARANGAY",
            "SITIO",
            "POPULATION - Male",
            "POPULATION - Female",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let mappings = auto_map_columns(&headers);
        let r = row(&[
            ("CODING-MUNICIPALITY", CellValue::Text("Banga".into())),
            ("BARANGAY", CellValue::Text("Liwanay".into())),
            ("SITIO", CellValue::Text("Proper Lampaco".into())),
            ("POPULATION - Male", CellValue::Number(224.0)),
            ("POPULATION - Female", CellValue::Number(188.0)),
        ]);
        let draft = transform_row(&r, &mappings);
        assert_eq!(draft.demographics.male, Some(Scalar::Number(224.0)));
        assert_eq!(draft.demographics.female, Some(Scalar::Number(188.0)));
        assert_eq!(draft.demographics.total, Some(Scalar::Number(412.0)));
        assert_eq!(draft.population, Some(Scalar::Number(412.0)));
        assert_eq!(draft.name, Some(Scalar::Text("Proper Lampaco".into())));
    }

    #[test]
    fn top_n_columns_feed_one_list_in_mapping_order() {
        let mappings = vec![
            mapped("TOP CROP 1", SitioField::TopCrops),
            mapped("TOP CROP 2", SitioField::TopCrops),
            mapped("TOP CROP 3", SitioField::TopCrops),
        ];
        let r = row(&[
            ("TOP CROP 1", CellValue::Text("Corn".into())),
            ("TOP CROP 2", CellValue::Text("Coconut".into())),
            ("TOP CROP 3", CellValue::Text("Corn".into())),
        ]);
        let draft = transform_row(&r, &mappings);
        assert_eq!(draft.agriculture.top_crops, vec!["Corn", "Coconut"]);
    }

    #[test]
    fn tagged_columns_register_categories_only() {
        let mappings = vec![
            mapped("MAIN LIVELIHOOD 1", SitioField::Employments),
            mapped("MAIN LIVELIHOOD 2", SitioField::Employments),
            mapped("INCOME BRACKET 1", SitioField::IncomeBrackets),
        ];
        let r = row(&[
            ("MAIN LIVELIHOOD 1", CellValue::Text("Farming".into())),
            ("MAIN LIVELIHOOD 2", CellValue::Text("Fishing".into())),
            ("INCOME BRACKET 1", CellValue::Text("Below 5,000".into())),
        ]);
        let draft = transform_row(&r, &mappings);
        assert_eq!(draft.economic.employments.len(), 2);
        assert!(draft.economic.employments.iter().all(|e| e.count == 0));
        assert_eq!(draft.economic.income_brackets[0].bracket, "Below 5,000");
        assert_eq!(draft.economic.income_brackets[0].households, 0);
    }

    #[test]
    fn empty_cells_and_unmapped_columns_are_skipped() {
        let mappings = vec![
            mapped("POPULATION", SitioField::Population),
            ColumnMapping {
                csv_header: "REMARKS".into(),
                sitio_field: None,
                is_required: false,
                auto_matched: false,
            },
        ];
        let r = row(&[
            ("POPULATION", CellValue::Empty),
            ("REMARKS", CellValue::Text("ignore me".into())),
        ]);
        let draft = transform_row(&r, &mappings);
        assert_eq!(draft, SitioDraft::default());
    }

    #[test]
    fn explicit_total_is_not_overridden() {
        let mappings = vec![
            mapped("POPULATION - Male", SitioField::DemoMale),
            mapped("POPULATION - Female", SitioField::DemoFemale),
            mapped("POPULATION - Total", SitioField::DemoTotal),
            mapped("POPULATION", SitioField::Population),
        ];
        let r = row(&[
            ("POPULATION - Male", CellValue::Number(10.0)),
            ("POPULATION - Female", CellValue::Number(12.0)),
            ("POPULATION - Total", CellValue::Number(25.0)),
            ("POPULATION", CellValue::Number(30.0)),
        ]);
        let draft = transform_row(&r, &mappings);
        assert_eq!(draft.demographics.total, Some(Scalar::Number(25.0)));
        assert_eq!(draft.population, Some(Scalar::Number(30.0)));
    }

    #[test]
    fn boolean_and_text_coercions_reach_the_draft() {
        let mappings = vec![
            mapped("WITH ELECTRICITY", SitioField::HasElectricity),
            mapped("CELLULAR SIGNAL", SitioField::CellularSignal),
        ];
        let r = row(&[
            ("WITH ELECTRICITY", CellValue::Text("Yes".into())),
            ("CELLULAR SIGNAL", CellValue::Text(" Weak ".into())),
        ]);
        let draft = transform_row(&r, &mappings);
        assert_eq!(draft.utilities.has_electricity, Some(Scalar::Bool(true)));
        assert_eq!(
            draft.utilities.cellular_signal,
            Some(Scalar::Text("Weak".into()))
        );
    }
}
