use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::catalog::SitioField;

/// One cell as delivered by the file-parsing layer: a string, a number,
/// or nothing. Blank text and missing cells are both `Empty` by the time
/// a row reaches the transformer.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

/// A parsed spreadsheet: ordered headers plus one map per row.
#[derive(Debug, Clone, Default)]
pub struct ParsedSheet {
    pub headers: Vec<String>,
    pub rows: Vec<HashMap<String, CellValue>>,
}

/// A coerced scalar value held by a draft record. Keeping the coercion
/// outcome (instead of forcing a concrete numeric type) lets validation
/// report "must be a number" findings on mistyped cells.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Number(f64),
    Bool(bool),
    Text(String),
}

impl Scalar {
    /// Coerce a raw cell into a scalar. Returns `None` for empty cells,
    /// which callers must skip so defaults are never overwritten.
    pub fn coerce(cell: &CellValue) -> Option<Scalar> {
        match cell {
            CellValue::Empty => None,
            CellValue::Number(n) => Some(Scalar::Number(*n)),
            CellValue::Text(s) => {
                let t = s.trim();
                if t.is_empty() {
                    return None;
                }
                match t {
                    "Yes" | "yes" | "TRUE" | "true" => Some(Scalar::Bool(true)),
                    "No" | "no" | "FALSE" | "false" => Some(Scalar::Bool(false)),
                    _ => match t.parse::<f64>() {
                        Ok(n) => Some(Scalar::Number(n)),
                        Err(_) => Some(Scalar::Text(t.to_string())),
                    },
                }
            }
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Render the scalar the way it would appear in a cell. Whole
    /// numbers print without a trailing ".0" so they behave as list
    /// entries and key parts.
    pub fn display_text(&self) -> String {
        match self {
            Scalar::Text(s) => s.clone(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
        }
    }
}

// --- Assembled domain record ---

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Demographics {
    pub male: u32,
    pub female: u32,
    pub total: u32,
    pub age_0_14: u32,
    pub age_15_64: u32,
    pub age_65_plus: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SocialServices {
    pub school_distance_km: f64,
    pub health_station_distance_km: f64,
    pub has_daycare: bool,
}

/// A category observed in the source data with its (later-surveyed)
/// member count. Import only registers categories; counts stay zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryCount {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncomeBracketCount {
    pub bracket: String,
    pub households: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct EconomicCondition {
    pub employments: Vec<CategoryCount>,
    pub income_brackets: Vec<IncomeBracketCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Agriculture {
    pub top_crops: Vec<String>,
    pub farm_area_ha: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct WaterSanitation {
    pub water_source: String,
    pub toilet_households: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Livestock {
    pub kinds: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FoodSecurity {
    pub meals_per_day: u32,
    pub experiences_shortage: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Housing {
    pub quality: Vec<CategoryCount>,
    pub ownership: Vec<CategoryCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DomesticAnimals {
    pub kinds: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CommunityEmpowerment {
    pub organizations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Utilities {
    pub has_electricity: bool,
    pub cellular_signal: String,
}

/// A sitio community profile. Sections are optional as a whole; a
/// present section is always its complete zero-initialized shape, never
/// a partially-built one.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Sitio {
    pub id: String,
    pub name: String,
    pub municipality: String,
    pub barangay: String,
    pub population: u32,
    pub households: u32,
    pub coordinates: Coordinates,
    pub need_score: Option<f64>,
    pub demographics: Option<Demographics>,
    pub social_services: Option<SocialServices>,
    pub economic: Option<EconomicCondition>,
    pub agriculture: Option<Agriculture>,
    pub water_sanitation: Option<WaterSanitation>,
    pub livestock: Option<Livestock>,
    pub food_security: Option<FoodSecurity>,
    pub housing: Option<Housing>,
    pub domestic_animals: Option<DomesticAnimals>,
    pub community_empowerment: Option<CommunityEmpowerment>,
    pub utilities: Option<Utilities>,
}

// --- Per-row working record ---

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemographicsDraft {
    pub male: Option<Scalar>,
    pub female: Option<Scalar>,
    pub total: Option<Scalar>,
    pub age_0_14: Option<Scalar>,
    pub age_15_64: Option<Scalar>,
    pub age_65_plus: Option<Scalar>,
}

impl DemographicsDraft {
    pub fn any_set(&self) -> bool {
        self.male.is_some()
            || self.female.is_some()
            || self.total.is_some()
            || self.age_0_14.is_some()
            || self.age_15_64.is_some()
            || self.age_65_plus.is_some()
    }

    pub fn set_count(&self) -> usize {
        [
            &self.male,
            &self.female,
            &self.total,
            &self.age_0_14,
            &self.age_15_64,
            &self.age_65_plus,
        ]
        .iter()
        .filter(|s| s.is_some())
        .count()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SocialServicesDraft {
    pub school_distance_km: Option<Scalar>,
    pub health_station_distance_km: Option<Scalar>,
    pub has_daycare: Option<Scalar>,
}

impl SocialServicesDraft {
    pub fn any_set(&self) -> bool {
        self.school_distance_km.is_some()
            || self.health_station_distance_km.is_some()
            || self.has_daycare.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EconomicDraft {
    pub employments: Vec<CategoryCount>,
    pub income_brackets: Vec<IncomeBracketCount>,
}

impl EconomicDraft {
    /// Register an employment category seen in this row. Counts are
    /// surveyed later; import never sets them.
    pub fn register_employment(&mut self, kind: &str) {
        if !self.employments.iter().any(|e| e.kind == kind) {
            self.employments.push(CategoryCount {
                kind: kind.to_string(),
                count: 0,
            });
        }
    }

    pub fn register_income_bracket(&mut self, bracket: &str) {
        if !self.income_brackets.iter().any(|b| b.bracket == bracket) {
            self.income_brackets.push(IncomeBracketCount {
                bracket: bracket.to_string(),
                households: 0,
            });
        }
    }

    pub fn any_set(&self) -> bool {
        !self.employments.is_empty() || !self.income_brackets.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgricultureDraft {
    pub top_crops: Vec<String>,
    pub farm_area_ha: Option<Scalar>,
}

impl AgricultureDraft {
    pub fn any_set(&self) -> bool {
        !self.top_crops.is_empty() || self.farm_area_ha.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaterSanitationDraft {
    pub water_source: Option<Scalar>,
    pub toilet_households: Option<Scalar>,
}

impl WaterSanitationDraft {
    pub fn any_set(&self) -> bool {
        self.water_source.is_some() || self.toilet_households.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodSecurityDraft {
    pub meals_per_day: Option<Scalar>,
    pub experiences_shortage: Option<Scalar>,
}

impl FoodSecurityDraft {
    pub fn any_set(&self) -> bool {
        self.meals_per_day.is_some() || self.experiences_shortage.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HousingDraft {
    pub quality: Vec<CategoryCount>,
    pub ownership: Vec<CategoryCount>,
}

impl HousingDraft {
    pub fn register_quality(&mut self, kind: &str) {
        if !self.quality.iter().any(|e| e.kind == kind) {
            self.quality.push(CategoryCount {
                kind: kind.to_string(),
                count: 0,
            });
        }
    }

    pub fn register_ownership(&mut self, kind: &str) {
        if !self.ownership.iter().any(|e| e.kind == kind) {
            self.ownership.push(CategoryCount {
                kind: kind.to_string(),
                count: 0,
            });
        }
    }

    pub fn any_set(&self) -> bool {
        !self.quality.is_empty() || !self.ownership.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UtilitiesDraft {
    pub has_electricity: Option<Scalar>,
    pub cellular_signal: Option<Scalar>,
}

impl UtilitiesDraft {
    pub fn any_set(&self) -> bool {
        self.has_electricity.is_some() || self.cellular_signal.is_some()
    }
}

/// The working record one row is folded into. `default()` is the
/// zero-value skeleton: every section exists and every scalar slot is
/// explicitly unset, so the transformer never touches a missing nested
/// object and derivations can tell "unset" from "explicitly zero".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SitioDraft {
    pub name: Option<Scalar>,
    pub municipality: Option<Scalar>,
    pub barangay: Option<Scalar>,
    pub population: Option<Scalar>,
    pub households: Option<Scalar>,
    pub latitude: Option<Scalar>,
    pub longitude: Option<Scalar>,
    pub need_score: Option<Scalar>,
    pub demographics: DemographicsDraft,
    pub social_services: SocialServicesDraft,
    pub economic: EconomicDraft,
    pub agriculture: AgricultureDraft,
    pub water_sanitation: WaterSanitationDraft,
    pub livestock: Vec<String>,
    pub food_security: FoodSecurityDraft,
    pub housing: HousingDraft,
    pub domestic_animals: Vec<String>,
    pub community_empowerment: Vec<String>,
    pub utilities: UtilitiesDraft,
}

impl SitioDraft {
    /// Gap-filling derivations, run once after all columns are applied.
    /// They only fill unset slots and never override explicit values.
    pub fn derive_totals(&mut self) {
        if self.demographics.total.is_none() {
            if let (Some(m), Some(f)) = (
                self.demographics.male.as_ref().and_then(Scalar::as_number),
                self.demographics
                    .female
                    .as_ref()
                    .and_then(Scalar::as_number),
            ) {
                self.demographics.total = Some(Scalar::Number(m + f));
            }
        }
        if self.population.is_none() {
            if let Some(t) = self.demographics.total.as_ref().and_then(Scalar::as_number) {
                self.population = Some(Scalar::Number(t));
            }
        }
    }

    /// Build the strongly-typed record from a validated draft. Sections
    /// nothing touched stay absent; touched sections come out fully
    /// zero-initialized plus whatever the row supplied.
    pub fn assemble(&self, id: String) -> Sitio {
        let text = |s: &Option<Scalar>| s.as_ref().map(Scalar::display_text).unwrap_or_default();
        let count = |s: &Option<Scalar>| {
            s.as_ref()
                .and_then(Scalar::as_number)
                .map(|n| n.max(0.0).round() as u32)
                .unwrap_or(0)
        };
        let float = |s: &Option<Scalar>| s.as_ref().and_then(Scalar::as_number).unwrap_or(0.0);
        let flag = |s: &Option<Scalar>| s.as_ref().and_then(Scalar::as_bool).unwrap_or(false);

        Sitio {
            id,
            name: text(&self.name),
            municipality: text(&self.municipality),
            barangay: text(&self.barangay),
            population: count(&self.population),
            households: count(&self.households),
            coordinates: Coordinates {
                lat: float(&self.latitude),
                lng: float(&self.longitude),
            },
            need_score: self.need_score.as_ref().and_then(Scalar::as_number),
            demographics: self.demographics.any_set().then(|| Demographics {
                male: count(&self.demographics.male),
                female: count(&self.demographics.female),
                total: count(&self.demographics.total),
                age_0_14: count(&self.demographics.age_0_14),
                age_15_64: count(&self.demographics.age_15_64),
                age_65_plus: count(&self.demographics.age_65_plus),
            }),
            social_services: self.social_services.any_set().then(|| SocialServices {
                school_distance_km: float(&self.social_services.school_distance_km),
                health_station_distance_km: float(
                    &self.social_services.health_station_distance_km,
                ),
                has_daycare: flag(&self.social_services.has_daycare),
            }),
            economic: self.economic.any_set().then(|| EconomicCondition {
                employments: self.economic.employments.clone(),
                income_brackets: self.economic.income_brackets.clone(),
            }),
            agriculture: self.agriculture.any_set().then(|| Agriculture {
                top_crops: self.agriculture.top_crops.clone(),
                farm_area_ha: float(&self.agriculture.farm_area_ha),
            }),
            water_sanitation: self.water_sanitation.any_set().then(|| WaterSanitation {
                water_source: text(&self.water_sanitation.water_source),
                toilet_households: count(&self.water_sanitation.toilet_households),
            }),
            livestock: (!self.livestock.is_empty()).then(|| Livestock {
                kinds: self.livestock.clone(),
            }),
            food_security: self.food_security.any_set().then(|| FoodSecurity {
                meals_per_day: count(&self.food_security.meals_per_day),
                experiences_shortage: flag(&self.food_security.experiences_shortage),
            }),
            housing: self.housing.any_set().then(|| Housing {
                quality: self.housing.quality.clone(),
                ownership: self.housing.ownership.clone(),
            }),
            domestic_animals: (!self.domestic_animals.is_empty()).then(|| DomesticAnimals {
                kinds: self.domestic_animals.clone(),
            }),
            community_empowerment: (!self.community_empowerment.is_empty()).then(|| {
                CommunityEmpowerment {
                    organizations: self.community_empowerment.clone(),
                }
            }),
            utilities: self.utilities.any_set().then(|| Utilities {
                has_electricity: flag(&self.utilities.has_electricity),
                cellular_signal: text(&self.utilities.cellular_signal),
            }),
        }
    }
}

// --- Import bookkeeping types ---

/// One source column's resolution against the field catalog. Advisory:
/// callers may override `sitio_field` before transformation, which is
/// why `auto_matched` is tracked separately from "is mapped".
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMapping {
    pub csv_header: String,
    pub sitio_field: Option<SitioField>,
    pub is_required: bool,
    pub auto_matched: bool,
}

/// A row-scoped validation finding. Accumulated, never thrown.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// 1-based source row number.
    pub row: usize,
    pub field: String,
    pub message: String,
}

/// An incoming record colliding with an already-stored one on the
/// natural key.
#[derive(Debug, Clone)]
pub struct DuplicateRecord {
    pub existing: Sitio,
    pub incoming: SitioDraft,
    pub key: String,
}
