use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Limits applied by the file-parsing layer before any row reaches the
/// import pipeline.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct ImportConfig {
    pub max_file_bytes: u64,
    /// How many error messages the summary surfaces to the user.
    pub error_preview_limit: usize,
    /// Jaro-Winkler cutoff for advisory header suggestions.
    pub suggestion_threshold: f64,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 10 * 1024 * 1024,
            error_preview_limit: 10,
            suggestion_threshold: 0.78,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub import: ImportConfig,
    /// Path of the JSON record store consulted for duplicates.
    #[serde(default)]
    pub store_path: Option<String>,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.import.max_file_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "import.max_file_bytes",
                reason: "must be > 0".into(),
            });
        }
        if self.import.error_preview_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "import.error_preview_limit",
                reason: "must be > 0".into(),
            });
        }
        if !(0.0..=1.0).contains(&self.import.suggestion_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "import.suggestion_threshold",
                reason: format!("{} not in 0..=1", self.import.suggestion_threshold),
            });
        }
        if let Some(path) = &self.store_path {
            if path.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: "store_path",
                });
            }
        }
        Ok(())
    }
}
