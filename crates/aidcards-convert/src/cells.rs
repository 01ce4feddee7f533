//! Cell-level splitting helpers shared by every list-valued field.

use aidcards_model::ApplyPortal;
use regex::Regex;
use std::sync::OnceLock;

use crate::sheet::Cell;

const AFFIRMATIVE: &[&str] = &["true", "yes", "1", "是"];
const NEGATIVE: &[&str] = &["false", "no", "0", "否"];

fn comma_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[,\x{FF0C}]+").expect("comma regex must compile"))
}

/// Split on ASCII or full-width commas, trimming and dropping empties.
pub fn split_commas(text: &str) -> Vec<String> {
    comma_re()
        .split(text)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split on line breaks, trimming and dropping empties.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split(['\n', '\r'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse one portal per line: `name | url`, `name|url`, or a bare name.
pub fn parse_portals(text: &str) -> Vec<ApplyPortal> {
    split_lines(text)
        .into_iter()
        .map(|line| {
            let (name, url) = line
                .split_once(" | ")
                .or_else(|| line.split_once('|'))
                .unwrap_or((line.as_str(), ""));
            ApplyPortal {
                name: name.trim().to_string(),
                url: url.trim().to_string(),
            }
        })
        .collect()
}

/// Tri-state boolean: affirmative → true, negative → false, else unknown.
pub fn parse_tri_state(cell: &Cell) -> Option<bool> {
    match cell {
        Cell::Bool(value) => Some(*value),
        other => other.as_text().and_then(|text| tri_state_from_text(&text)),
    }
}

pub fn tri_state_from_text(text: &str) -> Option<bool> {
    let token = text.trim().to_lowercase();
    if AFFIRMATIVE.contains(&token.as_str()) {
        Some(true)
    } else if NEGATIVE.contains(&token.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// List helpers applied to a whole cell; blank cells give an empty list.
pub fn comma_list(cell: &Cell) -> Vec<String> {
    cell.as_text()
        .map(|text| split_commas(&text))
        .unwrap_or_default()
}

pub fn line_list(cell: &Cell) -> Vec<String> {
    cell.as_text()
        .map(|text| split_lines(&text))
        .unwrap_or_default()
}

pub fn portal_list(cell: &Cell) -> Vec<ApplyPortal> {
    cell.as_text()
        .map(|text| parse_portals(&text))
        .unwrap_or_default()
}
