// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory styled workbook model
//!
//! Reports are assembled into this owned representation and only
//! serialized once, at save time. Merging workbooks is therefore a pure
//! data operation: cells carry their style with them, so nothing is lost
//! when a sheet moves from one workbook to another.

/// Hard limit on xlsx sheet names
pub const MAX_SHEET_NAME: usize = 31;

/// A single cell value
#[derive(Clone, Debug, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }
}

/// Visual role of a cell, mapped to a concrete format at save time
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CellStyle {
    #[default]
    Default,
    /// Bold white on dark fill, used for column headers
    Header,
    /// Orange fill, used to flag rows needing review
    Warning,
    /// Italic accent text next to a flagged row
    WarningNote,
}

/// A value and the style it is rendered with
#[derive(Clone, Debug, PartialEq, Default)]
pub struct StyledCell {
    pub value: CellValue,
    pub style: CellStyle,
}

impl StyledCell {
    pub fn new(value: CellValue) -> Self {
        StyledCell {
            value,
            style: CellStyle::Default,
        }
    }

    pub fn styled(value: CellValue, style: CellStyle) -> Self {
        StyledCell { value, style }
    }
}

/// One worksheet: a header row plus data rows, rendered as a banded table
#[derive(Clone, Debug, PartialEq)]
pub struct Sheet {
    /// Worksheet tab name, at most [`MAX_SHEET_NAME`] characters
    pub name: String,
    /// Table object name, unique per workbook
    pub table_name: String,
    /// Column headers
    pub columns: Vec<String>,
    /// Data rows; rows may be longer than `columns` for trailing notes
    pub rows: Vec<Vec<StyledCell>>,
}

/// An ordered collection of sheets
#[derive(Clone, Debug, Default)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Workbook::default()
    }

    pub fn push_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

/// Clamp a candidate sheet name to the xlsx rules
///
/// Characters xlsx forbids in tab names are replaced by underscores and
/// the result is cut at 31 characters on a char boundary.
pub fn sanitize_sheet_name(candidate: &str) -> String {
    let cleaned: String = candidate
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' | '\'' => '_',
            other => other,
        })
        .collect();
    cleaned.chars().take(MAX_SHEET_NAME).collect()
}

/// Derive an xlsx table object name from a sheet name
///
/// Table names are stricter than tab names: ASCII letters, digits and
/// underscores only, starting with a letter or underscore. Accented and
/// other non-ASCII characters are dropped rather than transliterated.
pub fn table_name_for(sheet_name: &str) -> String {
    let mut name: String = sheet_name
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                Some(c)
            } else if c == ' ' || c == '-' {
                Some('_')
            } else {
                None
            }
        })
        .collect();
    if name.is_empty() || name.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        name.insert(0, 'T');
    }
    name
}
