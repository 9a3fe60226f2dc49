use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Structural file errors raised by the parsing layer before the
/// import core ever sees a row.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unsupported file type: .{extension} (expected csv, xlsx or xls)")]
    UnsupportedFileType { extension: String },
    #[error("file contains no data rows")]
    EmptyFile,
    #[error("file is {size} bytes, exceeding the {max} byte limit")]
    FileTooLarge { size: u64, max: u64 },
    #[error("malformed spreadsheet: {0}")]
    Malformed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Failures of the cumulative-percentage predicate. Diagnostic only;
/// the schedule functions never mutate their inputs to recover.
#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    #[error("month {month} is below the preceding month's cumulative value")]
    NotMonotonic { month: String },
    #[error("month {month} exceeds 100 percent ({value})")]
    AboveCeiling { month: String, value: f64 },
    #[error("final month must reach 100 percent, got {value}")]
    IncompleteFinal { value: f64 },
    #[error("month sequence is empty")]
    EmptyMonths,
}
