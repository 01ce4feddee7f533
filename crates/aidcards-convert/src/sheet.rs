//! In-memory sheet model: a header row plus typed data rows.
//!
//! The workbook adapter fills these from calamine; tests build them directly.

use serde_json::Number;
use std::collections::BTreeMap;

use crate::error::ConvertError;

/// One spreadsheet cell after decoding.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Trimmed text content; `None` for empty or whitespace-only cells.
    pub fn as_text(&self) -> Option<String> {
        let rendered = match self {
            Self::Empty => return None,
            Self::Text(text) => text.trim().to_string(),
            Self::Int(value) => value.to_string(),
            Self::Float(value) => render_float(*value),
            Self::Bool(value) => value.to_string(),
        };
        if rendered.is_empty() {
            None
        } else {
            Some(rendered)
        }
    }

    /// Numeric content; text cells are parsed, anything else is `None`.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Self::Int(value) => Some(Number::from(*value)),
            Self::Float(value) => float_number(*value),
            Self::Text(text) => {
                let trimmed = text.trim();
                if let Ok(value) = trimmed.parse::<i64>() {
                    return Some(Number::from(value));
                }
                trimmed.parse::<f64>().ok().and_then(float_number)
            }
            Self::Empty | Self::Bool(_) => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.as_text().is_none()
    }
}

// Integral floats are how spreadsheets store whole numbers.
fn integral(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        Some(value as i64)
    } else {
        None
    }
}

fn render_float(value: f64) -> String {
    match integral(value) {
        Some(whole) => whole.to_string(),
        None => value.to_string(),
    }
}

fn float_number(value: f64) -> Option<Number> {
    match integral(value) {
        Some(whole) => Some(Number::from(whole)),
        None => Number::from_f64(value),
    }
}

/// A named sheet: headers plus data rows.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// Header name → column index, validated against a required column list.
#[derive(Debug, Clone)]
pub struct Columns {
    index: BTreeMap<String, usize>,
}

/// One data row viewed through its sheet's columns.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    cells: &'a [Cell],
    columns: &'a Columns,
}

impl Sheet {
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// Resolve required columns by trimmed header name, reporting every
    /// missing one at once.
    pub fn columns(&self, required: &[&str]) -> Result<Columns, ConvertError> {
        let mut index = BTreeMap::new();
        for (position, header) in self.headers.iter().enumerate() {
            index.entry(header.trim().to_string()).or_insert(position);
        }

        let missing: Vec<String> = required
            .iter()
            .filter(|column| !index.contains_key(**column))
            .map(|column| column.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ConvertError::MissingColumns {
                sheet: self.name.clone(),
                columns: missing,
            });
        }
        Ok(Columns { index })
    }

    /// Data rows that carry at least one non-blank cell.
    pub fn records<'a>(&'a self, columns: &'a Columns) -> impl Iterator<Item = Row<'a>> + 'a {
        self.rows
            .iter()
            .filter(|cells| cells.iter().any(|cell| !cell.is_blank()))
            .map(move |cells| Row { cells, columns })
    }
}

static EMPTY: Cell = Cell::Empty;

impl<'a> Row<'a> {
    /// Cell under `column`; short rows and unknown columns read as empty.
    pub fn cell(&self, column: &str) -> &'a Cell {
        self.columns
            .index
            .get(column)
            .and_then(|position| self.cells.get(*position))
            .unwrap_or(&EMPTY)
    }

    pub fn text(&self, column: &str) -> Option<String> {
        self.cell(column).as_text()
    }

    /// Text for mandatory-but-possibly-blank fields: blank becomes `""`.
    pub fn text_or_empty(&self, column: &str) -> String {
        self.text(column).unwrap_or_default()
    }
}
