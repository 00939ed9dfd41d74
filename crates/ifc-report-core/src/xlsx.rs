// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Workbook serialization to xlsx
//!
//! The only module that touches the xlsx writer. Each sheet lands with a
//! one-row, one-column margin (data region starts at Excel row 2, column
//! B) and is dressed as a banded table when it has data rows.

use crate::error::Result;
use crate::workbook::{CellStyle, CellValue, Sheet, StyledCell, Workbook};
use rust_xlsxwriter::{Color, Format, Table, TableColumn, TableStyle, Worksheet};
use std::fs;
use std::path::Path;

/// 0-based row of the header row (Excel row 2)
const FIRST_ROW: u32 = 1;
/// 0-based column of the first table column (Excel column B)
const FIRST_COL: u16 = 1;

/// Cell formats for the styles a [`StyledCell`] can carry
struct Palette {
    header: Format,
    warning: Format,
    warning_note: Format,
}

impl Palette {
    fn new() -> Self {
        Palette {
            header: Format::new()
                .set_bold()
                .set_font_color(Color::White)
                .set_background_color(Color::RGB(0x4472C4)),
            warning: Format::new().set_background_color(Color::RGB(0xFFC000)),
            warning_note: Format::new()
                .set_italic()
                .set_font_color(Color::RGB(0xC55A11)),
        }
    }

    fn for_style(&self, style: CellStyle) -> Option<&Format> {
        match style {
            CellStyle::Default => None,
            CellStyle::Header => Some(&self.header),
            CellStyle::Warning => Some(&self.warning),
            CellStyle::WarningNote => Some(&self.warning_note),
        }
    }
}

/// Serialize a workbook and write it to `path`
///
/// Parent directories are created as needed. An empty workbook is still
/// written; xlsx requires at least one sheet, so a blank one is inserted.
pub fn save_workbook(workbook: &Workbook, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let palette = Palette::new();
    let mut out = rust_xlsxwriter::Workbook::new();

    if workbook.is_empty() {
        out.add_worksheet();
    }
    for sheet in &workbook.sheets {
        let worksheet = out.add_worksheet();
        write_sheet(worksheet, sheet, &palette)?;
    }

    out.save(path)?;
    log::info!("wrote {}", path.display());
    Ok(())
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &Sheet, palette: &Palette) -> Result<()> {
    worksheet.set_name(&sheet.name)?;

    for (c, header) in sheet.columns.iter().enumerate() {
        worksheet.write_string_with_format(
            FIRST_ROW,
            FIRST_COL + c as u16,
            header,
            &palette.header,
        )?;
    }

    for (r, row) in sheet.rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            write_cell(worksheet, FIRST_ROW + 1 + r as u32, FIRST_COL + c as u16, cell, palette)?;
        }
    }

    // A table region needs at least one data row
    if !sheet.rows.is_empty() {
        let last_row = FIRST_ROW + sheet.rows.len() as u32;
        let last_col = FIRST_COL + (sheet.columns.len() as u16) - 1;
        let table = Table::new()
            .set_name(&sheet.table_name)
            .set_style(TableStyle::Medium2)
            .set_columns(
                &sheet
                    .columns
                    .iter()
                    .map(|name| TableColumn::new().set_header(name))
                    .collect::<Vec<_>>(),
            );
        worksheet.add_table(FIRST_ROW, FIRST_COL, last_row, last_col, &table)?;
    }

    for (c, width) in column_widths(sheet).into_iter().enumerate() {
        worksheet.set_column_width(FIRST_COL + c as u16, width)?;
    }

    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &StyledCell,
    palette: &Palette,
) -> Result<()> {
    let format = palette.for_style(cell.style);
    match (&cell.value, format) {
        (CellValue::Empty, Some(format)) => {
            worksheet.write_blank(row, col, format)?;
        }
        (CellValue::Empty, None) => {}
        (CellValue::Text(s), Some(format)) => {
            worksheet.write_string_with_format(row, col, s.as_str(), format)?;
        }
        (CellValue::Text(s), None) => {
            worksheet.write_string(row, col, s.as_str())?;
        }
        (CellValue::Int(i), Some(format)) => {
            worksheet.write_number_with_format(row, col, *i as f64, format)?;
        }
        (CellValue::Int(i), None) => {
            worksheet.write_number(row, col, *i as f64)?;
        }
        (CellValue::Float(f), Some(format)) => {
            worksheet.write_number_with_format(row, col, *f, format)?;
        }
        (CellValue::Float(f), None) => {
            worksheet.write_number(row, col, *f)?;
        }
    }
    Ok(())
}

/// Width per table column: widest of header and content, plus padding
fn column_widths(sheet: &Sheet) -> Vec<f64> {
    sheet
        .columns
        .iter()
        .enumerate()
        .map(|(c, header)| {
            let mut widest = header.chars().count();
            for row in &sheet.rows {
                if let Some(cell) = row.get(c) {
                    widest = widest.max(display_len(&cell.value));
                }
            }
            (widest + 2) as f64
        })
        .collect()
}

fn display_len(value: &CellValue) -> usize {
    match value {
        CellValue::Empty => 0,
        CellValue::Text(s) => s.chars().count(),
        CellValue::Int(i) => i.to_string().len(),
        CellValue::Float(f) => format!("{f}").len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::StyledCell;
    use tempfile::TempDir;

    fn sample_sheet() -> Sheet {
        Sheet {
            name: "Entités".to_string(),
            table_name: "EntitesTbl".to_string(),
            columns: vec!["Entité IFC".to_string(), "Nombre".to_string()],
            rows: vec![vec![
                StyledCell::new(CellValue::text("IFCWALL")),
                StyledCell::new(CellValue::Int(3)),
            ]],
        }
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/rapport.xlsx");

        let mut wb = Workbook::new();
        wb.push_sheet(sample_sheet());
        save_workbook(&wb, &path).unwrap();

        assert!(path.is_file());
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_save_empty_sheet_skips_table() {
        // A sheet with headers but no rows must still save cleanly
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vide.xlsx");

        let mut sheet = sample_sheet();
        sheet.rows.clear();
        let mut wb = Workbook::new();
        wb.push_sheet(sheet);
        save_workbook(&wb, &path).unwrap();

        assert!(path.is_file());
    }

    #[test]
    fn test_column_widths_cover_content() {
        let sheet = sample_sheet();
        let widths = column_widths(&sheet);
        // "Entité IFC" is 10 chars, "IFCWALL" is 7; header wins
        assert_eq!(widths[0], 12.0);
        // "Nombre" is 6 chars, "3" is 1
        assert_eq!(widths[1], 8.0);
    }
}
