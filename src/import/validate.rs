//! Row-scoped validation rules and batch partitioning. Every rule is
//! independent and all of them run; findings accumulate as values and
//! are never thrown.

use std::collections::HashMap;

use crate::models::{Scalar, SitioDraft, ValidationError};

/// Tolerance for the male+female vs total cross-check.
const SEX_TOTAL_TOLERANCE: f64 = 1.0;
/// Tolerance for the age-band sum vs total cross-check.
const AGE_TOTAL_TOLERANCE: f64 = 2.0;

/// Validate one draft. `row` is the 1-based source row number carried
/// into every finding.
pub fn validate_sitio(draft: &SitioDraft, row: usize) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut push = |field: &str, message: &str| {
        errors.push(ValidationError {
            row,
            field: field.to_string(),
            message: message.to_string(),
        })
    };

    if is_blank(&draft.municipality) {
        push("municipality", "Municipality is required");
    }
    if is_blank(&draft.barangay) {
        push("barangay", "Barangay is required");
    }
    if is_blank(&draft.name) {
        push("name", "Sitio name is required");
    }

    if let Some(v) = &draft.population {
        if !v.as_number().is_some_and(|n| n >= 0.0) {
            push("population", "Population must be a non-negative number");
        }
    }
    if let Some(v) = &draft.households {
        if !v.as_number().is_some_and(|n| n >= 0.0) {
            push("households", "Households must be a non-negative number");
        }
    }
    if let Some(v) = &draft.latitude {
        if !v.as_number().is_some_and(|n| (-90.0..=90.0).contains(&n)) {
            push("coordinates.lat", "Latitude must be between -90 and 90");
        }
    }
    if let Some(v) = &draft.longitude {
        if !v.as_number().is_some_and(|n| (-180.0..=180.0).contains(&n)) {
            push("coordinates.lng", "Longitude must be between -180 and 180");
        }
    }
    // Out-of-range need scores land in the same error channel as hard
    // failures, distinguished only by the message prefix. Callers that
    // want a separate severity must parse the message.
    if let Some(v) = &draft.need_score {
        if !v.as_number().is_some_and(|n| (1.0..=10.0).contains(&n)) {
            push(
                "need_score",
                "Warning: Need score should be between 1 and 10",
            );
        }
    }

    let demo = &draft.demographics;
    if let (Some(male), Some(female), Some(total)) = (
        number(&demo.male),
        number(&demo.female),
        number(&demo.total),
    ) {
        if (male + female - total).abs() > SEX_TOTAL_TOLERANCE {
            push(
                "demographics.total",
                "Male plus female population does not match the recorded total",
            );
        }
    }
    if let (Some(young), Some(working), Some(senior), Some(total)) = (
        number(&demo.age_0_14),
        number(&demo.age_15_64),
        number(&demo.age_65_plus),
        number(&demo.total),
    ) {
        if (young + working + senior - total).abs() > AGE_TOTAL_TOLERANCE {
            push(
                "demographics.total",
                "Age group breakdown does not match the recorded total",
            );
        }
    }

    errors
}

fn is_blank(slot: &Option<Scalar>) -> bool {
    match slot {
        None => true,
        Some(s) => s.display_text().trim().is_empty(),
    }
}

fn number(slot: &Option<Scalar>) -> Option<f64> {
    slot.as_ref().and_then(Scalar::as_number)
}

/// Outcome of validating a whole upload: drafts partitioned by whether
/// they produced any finding, plus the flat error list.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub valid: Vec<SitioDraft>,
    pub invalid: Vec<SitioDraft>,
    pub errors: Vec<ValidationError>,
}

pub fn validate_batch(drafts: Vec<SitioDraft>) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    for (index, draft) in drafts.into_iter().enumerate() {
        let mut errors = validate_sitio(&draft, index + 1);
        if errors.is_empty() {
            outcome.valid.push(draft);
        } else {
            outcome.invalid.push(draft);
            outcome.errors.append(&mut errors);
        }
    }
    outcome
}

/// Weighted presence score in 0..=100: seven core fields at weight 2,
/// six demographic fields at weight 1, ten optional sections at 0.5.
pub fn calculate_completeness(draft: &SitioDraft) -> u32 {
    const CORE_WEIGHT: f64 = 2.0;
    const DEMO_WEIGHT: f64 = 1.0;
    const SECTION_WEIGHT: f64 = 0.5;
    const MAX: f64 = 7.0 * CORE_WEIGHT + 6.0 * DEMO_WEIGHT + 10.0 * SECTION_WEIGHT;

    let mut score = 0.0;
    for slot in [
        &draft.name,
        &draft.municipality,
        &draft.barangay,
        &draft.population,
        &draft.households,
        &draft.latitude,
        &draft.longitude,
    ] {
        if !is_blank(slot) {
            score += CORE_WEIGHT;
        }
    }
    score += draft.demographics.set_count() as f64 * DEMO_WEIGHT;
    let sections = [
        draft.social_services.any_set(),
        draft.economic.any_set(),
        draft.agriculture.any_set(),
        draft.water_sanitation.any_set(),
        !draft.livestock.is_empty(),
        draft.food_security.any_set(),
        draft.housing.any_set(),
        !draft.domestic_animals.is_empty(),
        !draft.community_empowerment.is_empty(),
        draft.utilities.any_set(),
    ];
    score += sections.iter().filter(|p| **p).count() as f64 * SECTION_WEIGHT;

    (score / MAX * 100.0).round() as u32
}

/// Frequency view over a batch's findings.
#[derive(Debug, Default)]
pub struct ErrorSummary {
    pub by_field: HashMap<String, usize>,
    pub by_row: HashMap<usize, usize>,
    /// Up to five fields by descending error count; ties keep
    /// first-occurrence order.
    pub top_fields: Vec<(String, usize)>,
}

pub fn error_summary(errors: &[ValidationError]) -> ErrorSummary {
    let mut first_seen: Vec<String> = Vec::new();
    let mut by_field: HashMap<String, usize> = HashMap::new();
    let mut by_row: HashMap<usize, usize> = HashMap::new();
    for e in errors {
        if !by_field.contains_key(&e.field) {
            first_seen.push(e.field.clone());
        }
        *by_field.entry(e.field.clone()).or_insert(0) += 1;
        *by_row.entry(e.row).or_insert(0) += 1;
    }
    let mut top_fields: Vec<(String, usize)> = first_seen
        .into_iter()
        .map(|f| {
            let count = by_field[&f];
            (f, count)
        })
        .collect();
    // Stable sort preserves first-occurrence order within equal counts
    top_fields.sort_by(|a, b| b.1.cmp(&a.1));
    top_fields.truncate(5);
    ErrorSummary {
        by_field,
        by_row,
        top_fields,
    }
}
