// src/dataset/parse.rs
//
// Header-delimited CSV with per-cell type inference: a cell that looks like a
// number becomes one, everything else stays text, and an empty cell is absent
// (never zero). Column order and unanticipated columns are irrelevant here;
// the merge step decides what it cares about.

use std::collections::BTreeMap;

use once_cell::sync::OnceCell;

use crate::dataset::error::DatasetError;

/// A single parsed cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Num(f64),
    Text(String),
}

impl Cell {
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Cell::Num(v) => Some(*v),
            Cell::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(t) => Some(t),
            Cell::Num(_) => None,
        }
    }
}

/// One raw row: header name → cell. Absent keys mean the cell was empty or
/// the row was short.
pub type RawRow = BTreeMap<String, Cell>;

/// Integer / decimal / scientific notation, optional sign.
fn numeric_re() -> &'static regex::Regex {
    static RE_NUM: OnceCell<regex::Regex> = OnceCell::new();
    RE_NUM.get_or_init(|| {
        regex::Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$").unwrap()
    })
}

fn infer_cell(raw: &str) -> Option<Cell> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if numeric_re().is_match(trimmed) {
        if let Ok(v) = trimmed.parse::<f64>() {
            return Some(Cell::Num(v));
        }
    }
    Some(Cell::Text(trimmed.to_string()))
}

/// Parse header-delimited text into raw rows. Ragged rows are tolerated;
/// cells beyond the header width are ignored.
pub fn parse_table(text: &str) -> Result<Vec<RawRow>, DatasetError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let mut row = RawRow::new();
        for (i, field) in record.iter().enumerate() {
            let Some(header) = headers.get(i) else {
                break;
            };
            if header.is_empty() {
                continue;
            }
            if let Some(cell) = infer_cell(field) {
                row.insert(header.clone(), cell);
            }
        }
        if !row.is_empty() {
            rows.push(row);
        }
    }
    Ok(rows)
}
