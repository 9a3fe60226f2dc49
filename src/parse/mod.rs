//! The file-parsing collaborator: turns an uploaded spreadsheet into a
//! `ParsedSheet` or fails with a structural error before the import
//! core runs. Supported dialects: CSV and Excel workbooks.

pub mod csv_file;
pub mod xlsx_file;

use std::path::Path;

use crate::config::ImportConfig;
use crate::error::ParseError;
use crate::models::ParsedSheet;

pub fn parse_sheet(path: &Path, config: &ImportConfig) -> Result<ParsedSheet, ParseError> {
    let size = std::fs::metadata(path)?.len();
    if size == 0 {
        return Err(ParseError::EmptyFile);
    }
    if size > config.max_file_bytes {
        return Err(ParseError::FileTooLarge {
            size,
            max: config.max_file_bytes,
        });
    }
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    let sheet = match extension.as_str() {
        "csv" => csv_file::parse_csv(path)?,
        "xlsx" | "xls" => xlsx_file::parse_workbook(path)?,
        other => {
            return Err(ParseError::UnsupportedFileType {
                extension: other.to_string(),
            })
        }
    };
    if sheet.rows.is_empty() {
        return Err(ParseError::EmptyFile);
    }
    Ok(sheet)
}

/// Shared cell coercion for text-bearing dialects: blank is empty,
/// numerics parse, everything else stays trimmed text.
pub(crate) fn cell_from_str(raw: &str) -> crate::models::CellValue {
    use crate::models::CellValue;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        CellValue::Empty
    } else if let Ok(n) = trimmed.parse::<f64>() {
        CellValue::Number(n)
    } else {
        CellValue::Text(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn rejects_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.pdf");
        std::fs::write(&path, b"%PDF-").unwrap();
        let err = parse_sheet(&path, &ImportConfig::default()).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedFileType { extension } if extension == "pdf"));
    }

    #[test]
    fn rejects_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.csv");
        std::fs::File::create(&path).unwrap();
        assert!(matches!(
            parse_sheet(&path, &ImportConfig::default()),
            Err(ParseError::EmptyFile)
        ));
    }

    #[test]
    fn rejects_header_only_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.csv");
        std::fs::write(&path, "SITIO,BARANGAY\n").unwrap();
        assert!(matches!(
            parse_sheet(&path, &ImportConfig::default()),
            Err(ParseError::EmptyFile)
        ));
    }

    #[test]
    fn rejects_oversized_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"SITIO\nA\n").unwrap();
        let config = ImportConfig {
            max_file_bytes: 4,
            ..Default::default()
        };
        assert!(matches!(
            parse_sheet(&path, &config),
            Err(ParseError::FileTooLarge { .. })
        ));
    }
}
