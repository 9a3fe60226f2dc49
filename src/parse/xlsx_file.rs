use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};

use crate::error::ParseError;
use crate::models::{CellValue, ParsedSheet};

/// Read the first worksheet of an Excel workbook: row one is the
/// header row, everything below is data.
pub fn parse_workbook(path: &Path) -> Result<ParsedSheet, ParseError> {
    let mut workbook: Sheets<_> =
        open_workbook_auto(path).map_err(|e| ParseError::Malformed(e.to_string()))?;
    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let Some(first_sheet) = sheet_names.first() else {
        return Err(ParseError::Malformed("workbook contains no sheets".into()));
    };
    let range = workbook
        .worksheet_range(first_sheet)
        .map_err(|e| ParseError::Malformed(e.to_string()))?;

    let mut row_iter = range.rows();
    let Some(header_cells) = row_iter.next() else {
        return Ok(ParsedSheet::default());
    };
    let headers: Vec<String> = header_cells
        .iter()
        .map(|c| c.to_string().trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for cells in row_iter {
        let mut row: HashMap<String, CellValue> = HashMap::with_capacity(headers.len());
        for (index, header) in headers.iter().enumerate() {
            let cell = cells.get(index).map(cell_value).unwrap_or(CellValue::Empty);
            row.insert(header.clone(), cell);
        }
        rows.push(row);
    }
    Ok(ParsedSheet { headers, rows })
}

fn cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        // Rendered as the literal forms the scalar coercion recognizes
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::String(s) => super::cell_from_str(s),
        // Serial date; downstream fields treat it as a plain number
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_values_map_to_the_parser_contract() {
        assert_eq!(cell_value(&Data::Empty), CellValue::Empty);
        assert_eq!(cell_value(&Data::Float(3.5)), CellValue::Number(3.5));
        assert_eq!(cell_value(&Data::Int(224)), CellValue::Number(224.0));
        assert_eq!(
            cell_value(&Data::Bool(true)),
            CellValue::Text("true".into())
        );
        assert_eq!(
            cell_value(&Data::String(" Proper Lampaco ".into())),
            CellValue::Text("Proper Lampaco".into())
        );
        assert_eq!(
            cell_value(&Data::String("412".into())),
            CellValue::Number(412.0)
        );
    }
}
