//! Persistence collaborator. The import core only ever reads from it
//! (duplicate detection); committing accepted records is the caller's
//! responsibility.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::models::Sitio;

pub trait RecordStore {
    fn load(&self) -> Result<Vec<Sitio>, StoreError>;
    fn save(&self, records: &[Sitio]) -> Result<(), StoreError>;
}

/// JSON-file-backed store. A missing file reads as an empty record set.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Sitio>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&data)?)
    }

    fn save(&self, records: &[Sitio]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let json = serde_json::to_string_pretty(records)?;
        // write atomically: write to tmp then rename
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json.as_bytes())?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("sitios.json"));
        let records = vec![Sitio {
            id: "s-1".into(),
            name: "Proper Lampaco".into(),
            municipality: "Banga".into(),
            barangay: "Liwanay".into(),
            population: 412,
            households: 80,
            ..Default::default()
        }];
        store.save(&records).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, records);
        // No leftover temp file
        assert!(!dir.path().join("sitios.json.tmp").exists());
    }
}
