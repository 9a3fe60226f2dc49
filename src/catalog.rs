//! Static field catalog: the closed set of canonical record fields the
//! importer knows how to fill, with the source-column labels provincial
//! encoders actually use. Changing it is a deployment-time change.

use std::fmt;

/// Canonical field addresses as a closed enum. The catalog enumerates
/// every valid dot-path at build time, so path resolution is a lookup
/// table instead of runtime string splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SitioField {
    Municipality,
    Barangay,
    Name,
    Population,
    Households,
    Latitude,
    Longitude,
    NeedScore,
    DemoMale,
    DemoFemale,
    DemoTotal,
    DemoAge0_14,
    DemoAge15_64,
    DemoAge65Plus,
    SchoolDistanceKm,
    HealthStationDistanceKm,
    HasDaycare,
    Employments,
    IncomeBrackets,
    TopCrops,
    FarmAreaHa,
    WaterSource,
    ToiletHouseholds,
    LivestockKinds,
    MealsPerDay,
    FoodShortage,
    HousingQuality,
    HousingOwnership,
    DomesticAnimalKinds,
    Organizations,
    HasElectricity,
    CellularSignal,
}

/// How the transformer treats a field's incoming values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldClass {
    /// Coerce and assign.
    Scalar,
    /// Append to a deduplicated string list.
    StringList,
    /// Register a category entry with a zeroed companion count.
    TaggedList,
}

impl SitioField {
    /// Dot-delimited canonical path within the record shape.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Municipality => "municipality",
            Self::Barangay => "barangay",
            Self::Name => "name",
            Self::Population => "population",
            Self::Households => "households",
            Self::Latitude => "coordinates.lat",
            Self::Longitude => "coordinates.lng",
            Self::NeedScore => "need_score",
            Self::DemoMale => "demographics.male",
            Self::DemoFemale => "demographics.female",
            Self::DemoTotal => "demographics.total",
            Self::DemoAge0_14 => "demographics.age_0_14",
            Self::DemoAge15_64 => "demographics.age_15_64",
            Self::DemoAge65Plus => "demographics.age_65_plus",
            Self::SchoolDistanceKm => "social_services.school_distance_km",
            Self::HealthStationDistanceKm => "social_services.health_station_distance_km",
            Self::HasDaycare => "social_services.has_daycare",
            Self::Employments => "economic.employments",
            Self::IncomeBrackets => "economic.income_brackets",
            Self::TopCrops => "agriculture.top_crops",
            Self::FarmAreaHa => "agriculture.farm_area_ha",
            Self::WaterSource => "water_sanitation.water_source",
            Self::ToiletHouseholds => "water_sanitation.toilet_households",
            Self::LivestockKinds => "livestock.kinds",
            Self::MealsPerDay => "food_security.meals_per_day",
            Self::FoodShortage => "food_security.experiences_shortage",
            Self::HousingQuality => "housing.quality",
            Self::HousingOwnership => "housing.ownership",
            Self::DomesticAnimalKinds => "domestic_animals.kinds",
            Self::Organizations => "community_empowerment.organizations",
            Self::HasElectricity => "utilities.has_electricity",
            Self::CellularSignal => "utilities.cellular_signal",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        FIELD_CATALOG
            .iter()
            .map(|d| d.field)
            .find(|f| f.path() == path)
    }

    pub fn class(&self) -> FieldClass {
        match self {
            Self::TopCrops | Self::LivestockKinds | Self::DomesticAnimalKinds | Self::Organizations => {
                FieldClass::StringList
            }
            Self::Employments
            | Self::IncomeBrackets
            | Self::HousingQuality
            | Self::HousingOwnership => FieldClass::TaggedList,
            _ => FieldClass::Scalar,
        }
    }
}

impl fmt::Display for SitioField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// One catalog row: a canonical field, the human label encoders see,
/// the exact header the provincial template uses, and whether an import
/// is unusable without it.
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    pub field: SitioField,
    pub label: &'static str,
    pub csv_header: &'static str,
    pub required: bool,
}

/// Catalog order is the auto-map tie-break: earlier entries win when a
/// header would fuzzy-match more than one label. Multi-column "Top N"
/// entries intentionally share one canonical field.
pub const FIELD_CATALOG: &[FieldDef] = &[
    FieldDef {
        field: SitioField::Municipality,
        label: "Municipality",
        csv_header: "CODING-MUNICIPALITY",
        required: true,
    },
    FieldDef {
        field: SitioField::Barangay,
        label: "Barangay",
        csv_header: "BARANGAY",
        required: true,
    },
    FieldDef {
        field: SitioField::Name,
        label: "Sitio Name",
        csv_header: "SITIO",
        required: true,
    },
    FieldDef {
        field: SitioField::Population,
        label: "Total Population",
        csv_header: "POPULATION",
        required: false,
    },
    FieldDef {
        field: SitioField::Households,
        label: "Number of Households",
        csv_header: "HOUSEHOLDS",
        required: false,
    },
    FieldDef {
        field: SitioField::Latitude,
        label: "Latitude",
        csv_header: "LATITUDE",
        required: false,
    },
    FieldDef {
        field: SitioField::Longitude,
        label: "Longitude",
        csv_header: "LONGITUDE",
        required: false,
    },
    FieldDef {
        field: SitioField::NeedScore,
        label: "Need Score",
        csv_header: "NEED SCORE",
        required: false,
    },
    FieldDef {
        field: SitioField::DemoMale,
        label: "Population Male",
        csv_header: "POPULATION - Male",
        required: false,
    },
    FieldDef {
        field: SitioField::DemoFemale,
        label: "Population Female",
        csv_header: "POPULATION - Female",
        required: false,
    },
    FieldDef {
        field: SitioField::DemoTotal,
        label: "Population Total",
        csv_header: "POPULATION - Total",
        required: false,
    },
    FieldDef {
        field: SitioField::DemoAge0_14,
        label: "Age 0-14",
        csv_header: "AGE GROUP 0-14",
        required: false,
    },
    FieldDef {
        field: SitioField::DemoAge15_64,
        label: "Age 15-64",
        csv_header: "AGE GROUP 15-64",
        required: false,
    },
    FieldDef {
        field: SitioField::DemoAge65Plus,
        label: "Age 65 and Over",
        csv_header: "AGE GROUP 65+",
        required: false,
    },
    FieldDef {
        field: SitioField::SchoolDistanceKm,
        label: "Distance to School",
        csv_header: "DISTANCE TO NEAREST SCHOOL (KM)",
        required: false,
    },
    FieldDef {
        field: SitioField::HealthStationDistanceKm,
        label: "Distance to Health Station",
        csv_header: "DISTANCE TO HEALTH STATION (KM)",
        required: false,
    },
    FieldDef {
        field: SitioField::HasDaycare,
        label: "Daycare Center",
        csv_header: "WITH DAYCARE CENTER",
        required: false,
    },
    FieldDef {
        field: SitioField::Employments,
        label: "Main Livelihood",
        csv_header: "MAIN LIVELIHOOD 1",
        required: false,
    },
    FieldDef {
        field: SitioField::Employments,
        label: "Main Livelihood",
        csv_header: "MAIN LIVELIHOOD 2",
        required: false,
    },
    FieldDef {
        field: SitioField::Employments,
        label: "Main Livelihood",
        csv_header: "MAIN LIVELIHOOD 3",
        required: false,
    },
    FieldDef {
        field: SitioField::IncomeBrackets,
        label: "Income Bracket",
        csv_header: "INCOME BRACKET 1",
        required: false,
    },
    FieldDef {
        field: SitioField::IncomeBrackets,
        label: "Income Bracket",
        csv_header: "INCOME BRACKET 2",
        required: false,
    },
    FieldDef {
        field: SitioField::TopCrops,
        label: "Top Crop",
        csv_header: "TOP CROP 1",
        required: false,
    },
    FieldDef {
        field: SitioField::TopCrops,
        label: "Top Crop",
        csv_header: "TOP CROP 2",
        required: false,
    },
    FieldDef {
        field: SitioField::TopCrops,
        label: "Top Crop",
        csv_header: "TOP CROP 3",
        required: false,
    },
    FieldDef {
        field: SitioField::FarmAreaHa,
        label: "Farm Area",
        csv_header: "FARM AREA (HA)",
        required: false,
    },
    FieldDef {
        field: SitioField::WaterSource,
        label: "Water Source",
        csv_header: "MAIN WATER SOURCE",
        required: false,
    },
    FieldDef {
        field: SitioField::ToiletHouseholds,
        label: "Households with Toilet",
        csv_header: "HH WITH SANITARY TOILET",
        required: false,
    },
    FieldDef {
        field: SitioField::LivestockKinds,
        label: "Livestock",
        csv_header: "LIVESTOCK 1",
        required: false,
    },
    FieldDef {
        field: SitioField::LivestockKinds,
        label: "Livestock",
        csv_header: "LIVESTOCK 2",
        required: false,
    },
    FieldDef {
        field: SitioField::LivestockKinds,
        label: "Livestock",
        csv_header: "LIVESTOCK 3",
        required: false,
    },
    FieldDef {
        field: SitioField::MealsPerDay,
        label: "Meals per Day",
        csv_header: "MEALS PER DAY",
        required: false,
    },
    FieldDef {
        field: SitioField::FoodShortage,
        label: "Food Shortage",
        csv_header: "EXPERIENCES FOOD SHORTAGE",
        required: false,
    },
    FieldDef {
        field: SitioField::HousingQuality,
        label: "Housing Quality",
        csv_header: "HOUSE QUALITY",
        required: false,
    },
    FieldDef {
        field: SitioField::HousingOwnership,
        label: "Housing Ownership",
        csv_header: "HOUSE OWNERSHIP",
        required: false,
    },
    FieldDef {
        field: SitioField::DomesticAnimalKinds,
        label: "Domestic Animal",
        csv_header: "DOMESTIC ANIMAL 1",
        required: false,
    },
    FieldDef {
        field: SitioField::DomesticAnimalKinds,
        label: "Domestic Animal",
        csv_header: "DOMESTIC ANIMAL 2",
        required: false,
    },
    FieldDef {
        field: SitioField::Organizations,
        label: "Community Organization",
        csv_header: "COMMUNITY ORGANIZATION 1",
        required: false,
    },
    FieldDef {
        field: SitioField::Organizations,
        label: "Community Organization",
        csv_header: "COMMUNITY ORGANIZATION 2",
        required: false,
    },
    FieldDef {
        field: SitioField::HasElectricity,
        label: "Electricity",
        csv_header: "WITH ELECTRICITY",
        required: false,
    },
    FieldDef {
        field: SitioField::CellularSignal,
        label: "Cellular Signal",
        csv_header: "CELLULAR SIGNAL",
        required: false,
    },
];

/// Every required canonical field, in catalog order.
pub fn required_fields() -> Vec<SitioField> {
    let mut out = Vec::new();
    for def in FIELD_CATALOG {
        if def.required && !out.contains(&def.field) {
            out.push(def.field);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn headers_are_unique() {
        let mut seen = HashSet::new();
        for def in FIELD_CATALOG {
            assert!(seen.insert(def.csv_header), "duplicate {}", def.csv_header);
        }
    }

    #[test]
    fn paths_round_trip() {
        for def in FIELD_CATALOG {
            assert_eq!(SitioField::from_path(def.field.path()), Some(def.field));
        }
        assert_eq!(SitioField::from_path("no.such.path"), None);
    }

    #[test]
    fn required_set_is_the_natural_key() {
        assert_eq!(
            required_fields(),
            vec![
                SitioField::Municipality,
                SitioField::Barangay,
                SitioField::Name
            ]
        );
    }

    #[test]
    fn list_fields_are_classified() {
        assert_eq!(SitioField::TopCrops.class(), FieldClass::StringList);
        assert_eq!(SitioField::Employments.class(), FieldClass::TaggedList);
        assert_eq!(SitioField::Population.class(), FieldClass::Scalar);
    }
}
