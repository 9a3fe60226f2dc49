use std::collections::HashMap;
use std::path::Path;

use crate::error::ParseError;
use crate::models::{CellValue, ParsedSheet};

use super::cell_from_str;

pub fn parse_csv(path: &Path) -> Result<ParsedSheet, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| ParseError::Malformed(e.to_string()))?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ParseError::Malformed(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ParseError::Malformed(e.to_string()))?;
        let mut row: HashMap<String, CellValue> = HashMap::with_capacity(headers.len());
        for (index, header) in headers.iter().enumerate() {
            // Short records leave trailing cells empty
            let cell = record.get(index).map(cell_from_str).unwrap_or(CellValue::Empty);
            row.insert(header.clone(), cell);
        }
        rows.push(row);
    }
    Ok(ParsedSheet { headers, rows })
}
