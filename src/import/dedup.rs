//! Duplicate detection against the stored record set. Identity is
//! exact key equality only; there is no fuzzy identity matching.

use crate::models::{DuplicateRecord, Scalar, Sitio, SitioDraft};

/// Lower-cased, trimmed `municipality-barangay-name` composite key.
pub fn natural_key(municipality: &str, barangay: &str, name: &str) -> String {
    format!(
        "{}-{}-{}",
        municipality.trim().to_lowercase(),
        barangay.trim().to_lowercase(),
        name.trim().to_lowercase()
    )
}

/// Anything that can yield the composite identity key. `None` means the
/// record cannot be keyed and duplicate detection skips it silently.
pub trait NaturalKey {
    fn natural_key(&self) -> Option<String>;
}

impl NaturalKey for Sitio {
    fn natural_key(&self) -> Option<String> {
        if self.municipality.trim().is_empty()
            || self.barangay.trim().is_empty()
            || self.name.trim().is_empty()
        {
            return None;
        }
        Some(natural_key(&self.municipality, &self.barangay, &self.name))
    }
}

impl NaturalKey for SitioDraft {
    fn natural_key(&self) -> Option<String> {
        let part = |slot: &Option<Scalar>| -> Option<String> {
            let text = slot.as_ref()?.display_text();
            if text.trim().is_empty() {
                None
            } else {
                Some(text)
            }
        };
        let municipality = part(&self.municipality)?;
        let barangay = part(&self.barangay)?;
        let name = part(&self.name)?;
        Some(natural_key(&municipality, &barangay, &name))
    }
}

/// Flag every keyable incoming draft whose key collides with a stored
/// record. Linear scan per draft; batches are file-upload-bounded.
pub fn find_duplicates(incoming: &[SitioDraft], existing: &[Sitio]) -> Vec<DuplicateRecord> {
    let mut duplicates = Vec::new();
    for draft in incoming {
        let Some(key) = draft.natural_key() else {
            continue;
        };
        if let Some(hit) = existing
            .iter()
            .find(|s| s.natural_key().as_deref() == Some(key.as_str()))
        {
            duplicates.push(DuplicateRecord {
                existing: hit.clone(),
                incoming: draft.clone(),
                key,
            });
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(municipality: &str, barangay: &str, name: &str) -> Sitio {
        Sitio {
            id: "s-1".into(),
            municipality: municipality.into(),
            barangay: barangay.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    fn draft(municipality: &str, barangay: &str, name: &str) -> SitioDraft {
        let mut d = SitioDraft::default();
        d.municipality = Some(Scalar::Text(municipality.into()));
        d.barangay = Some(Scalar::Text(barangay.into()));
        d.name = Some(Scalar::Text(name.into()));
        d
    }

    #[test]
    fn collision_is_case_and_whitespace_insensitive() {
        let existing = vec![stored("Banga", "Liwanay", "Proper Lampaco")];
        let incoming = vec![draft(" BANGA ", "liwanay", "PROPER LAMPACO")];
        let dupes = find_duplicates(&incoming, &existing);
        assert_eq!(dupes.len(), 1);
        assert_eq!(dupes[0].key, "banga-liwanay-proper lampaco");
    }

    #[test]
    fn changing_any_key_part_removes_the_match() {
        let existing = vec![stored("Banga", "Liwanay", "Proper Lampaco")];
        for incoming in [
            draft("Surallah", "Liwanay", "Proper Lampaco"),
            draft("Banga", "Rizal", "Proper Lampaco"),
            draft("Banga", "Liwanay", "Lower Lampaco"),
        ] {
            assert!(find_duplicates(&[incoming], &existing).is_empty());
        }
    }

    #[test]
    fn unkeyable_drafts_are_skipped() {
        let existing = vec![stored("Banga", "Liwanay", "Proper Lampaco")];
        let mut unkeyable = draft("Banga", "Liwanay", "Proper Lampaco");
        unkeyable.name = None;
        assert!(find_duplicates(&[unkeyable], &existing).is_empty());
    }

    #[test]
    fn one_duplicate_record_per_colliding_draft() {
        let existing = vec![
            stored("Banga", "Liwanay", "Proper Lampaco"),
            stored("Banga", "Liwanay", "Proper Lampaco"),
        ];
        let incoming = vec![draft("Banga", "Liwanay", "Proper Lampaco")];
        // First stored match wins; exactly one record emitted
        assert_eq!(find_duplicates(&incoming, &existing).len(), 1);
    }
}
