//! Workbook adapter: load the two input sheets through calamine.

use calamine::{Data, Range, Reader, open_workbook_auto};
use std::path::Path;

use crate::error::ConvertError;
use crate::mapping::{EVIDENCE_SHEET, POLICY_CARDS_SHEET};
use crate::sheet::{Cell, Sheet};

/// The two sheets the converter consumes.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    pub policy_cards: Sheet,
    pub evidence: Sheet,
}

impl Workbook {
    /// Open an `.xlsx`/`.xls`/`.ods` file and decode both required sheets.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ConvertError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let mut workbook = open_workbook_auto(path).map_err(|source| {
            ConvertError::OpenWorkbook {
                path: display.clone(),
                source,
            }
        })?;

        let names = workbook.sheet_names();
        for required in [POLICY_CARDS_SHEET, EVIDENCE_SHEET] {
            if !names.iter().any(|name| name == required) {
                return Err(ConvertError::MissingSheet {
                    path: display,
                    sheet: required.to_string(),
                });
            }
        }

        let mut load = |sheet: &str| -> Result<Sheet, ConvertError> {
            let range = workbook
                .worksheet_range(sheet)
                .map_err(|source| ConvertError::ReadSheet {
                    sheet: sheet.to_string(),
                    source,
                })?;
            let decoded = sheet_from_range(sheet, &range);
            tracing::debug!(sheet, rows = decoded.rows.len(), "loaded sheet");
            Ok(decoded)
        };

        Ok(Self {
            policy_cards: load(POLICY_CARDS_SHEET)?,
            evidence: load(EVIDENCE_SHEET)?,
        })
    }
}

/// First row is the header; every following row is data.
pub fn sheet_from_range(name: &str, range: &Range<Data>) -> Sheet {
    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|header| {
            header
                .iter()
                .map(|cell| cell_from_data(cell).as_text().unwrap_or_default())
                .collect()
        })
        .unwrap_or_default();
    let rows = rows
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();
    Sheet::new(name, headers, rows)
}

pub fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(text) => Cell::Text(text.clone()),
        Data::Int(value) => Cell::Int(*value),
        Data::Float(value) => Cell::Float(*value),
        Data::Bool(value) => Cell::Bool(*value),
        Data::DateTime(value) => value
            .as_datetime()
            .map(render_datetime)
            .map(Cell::Text)
            .unwrap_or(Cell::Float(value.as_f64())),
        Data::DateTimeIso(text) | Data::DurationIso(text) => Cell::Text(text.clone()),
    }
}

// Date cells without a time of day render as plain dates.
fn render_datetime(value: chrono::NaiveDateTime) -> String {
    if value.time() == chrono::NaiveTime::MIN {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
