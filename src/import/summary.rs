//! User-facing run summary: counts plus a bounded error preview. The
//! core supplies the numbers and messages; presentation is the
//! caller's affair.

use crate::models::ValidationError;

#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub source: String,
    pub total_rows: usize,
    pub successful: usize,
    pub failed: usize,
    pub duplicates: usize,
    pub started_utc: chrono::DateTime<chrono::Utc>,
    pub ended_utc: chrono::DateTime<chrono::Utc>,
    pub duration_secs: f64,
    /// First N error messages, already formatted for display.
    pub error_preview: Vec<String>,
}

/// Builder for ImportSummary to simplify summary creation.
#[derive(Debug, Clone)]
pub struct ImportSummaryBuilder {
    source: String,
    total_rows: usize,
    successful: usize,
    failed: usize,
    duplicates: usize,
    started_utc: chrono::DateTime<chrono::Utc>,
    ended_utc: chrono::DateTime<chrono::Utc>,
    error_preview: Vec<String>,
}

impl ImportSummaryBuilder {
    pub fn new(source: &str) -> Self {
        let now = chrono::Utc::now();
        Self {
            source: source.to_string(),
            total_rows: 0,
            successful: 0,
            failed: 0,
            duplicates: 0,
            started_utc: now,
            ended_utc: now,
            error_preview: Vec::new(),
        }
    }

    pub fn with_counts(
        mut self,
        total_rows: usize,
        successful: usize,
        failed: usize,
        duplicates: usize,
    ) -> Self {
        self.total_rows = total_rows;
        self.successful = successful;
        self.failed = failed;
        self.duplicates = duplicates;
        self
    }

    pub fn with_timestamps(
        mut self,
        started: chrono::DateTime<chrono::Utc>,
        ended: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        self.started_utc = started;
        self.ended_utc = ended;
        self
    }

    /// Keep at most `limit` formatted error messages for display.
    pub fn with_error_preview(mut self, errors: &[ValidationError], limit: usize) -> Self {
        self.error_preview = errors
            .iter()
            .take(limit)
            .map(|e| format!("Row {}, {}: {}", e.row, e.field, e.message))
            .collect();
        self
    }

    pub fn build(self) -> ImportSummary {
        let duration_secs = (self.ended_utc - self.started_utc).num_milliseconds() as f64 / 1000.0;
        ImportSummary {
            source: self.source,
            total_rows: self.total_rows,
            successful: self.successful,
            failed: self.failed,
            duplicates: self.duplicates,
            started_utc: self.started_utc,
            ended_utc: self.ended_utc,
            duration_secs,
            error_preview: self.error_preview,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_is_bounded_and_formatted() {
        let errors: Vec<ValidationError> = (1..=4)
            .map(|row| ValidationError {
                row,
                field: "municipality".into(),
                message: "Municipality is required".into(),
            })
            .collect();
        let summary = ImportSummaryBuilder::new("upload.csv")
            .with_counts(10, 6, 4, 1)
            .with_error_preview(&errors, 2)
            .build();
        assert_eq!(summary.error_preview.len(), 2);
        assert_eq!(
            summary.error_preview[0],
            "Row 1, municipality: Municipality is required"
        );
        assert_eq!(summary.total_rows, 10);
        assert_eq!(summary.duplicates, 1);
    }
}
