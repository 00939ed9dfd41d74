// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Batch processing and workbook merging
//!
//! Drives report generation over a set of inputs. One bad input never
//! aborts the batch: its failure is recorded and the loop moves on. The
//! only whole-batch failure is a failed write of the merge destination.

use crate::assembler::build_report;
use crate::error::Result;
use crate::workbook::{sanitize_sheet_name, table_name_for, Workbook, MAX_SHEET_NAME};
use crate::xlsx::save_workbook;
use ifc_report_parser::open_model;
use rustc_hash::FxHashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Where batch outputs go, decided once before the loop
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputPolicy {
    /// One workbook next to each input, same stem, `.xlsx` extension
    BesideInput,
    /// One workbook per input inside the given directory
    IntoDirectory(PathBuf),
    /// All reports merged into a single workbook at the given path
    MergedInto(PathBuf),
}

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Number of inputs whose report made it into an output workbook
    pub written: usize,
    /// Inputs that failed, with the reason
    pub failures: Vec<(PathBuf, String)>,
}

/// Build the report workbook for a single input file
pub fn produce_report(path: &Path) -> Result<Workbook> {
    let size = fs::metadata(path)?.len();
    let model = open_model(path)?;
    Ok(build_report(&model, path, size))
}

/// Process every input under the given output policy
///
/// Per-input failures (unreadable file, malformed model, failed per-file
/// save) are collected in the summary. Only saving the merge destination
/// can fail the call itself.
pub fn produce_batch(inputs: &[PathBuf], policy: &OutputPolicy) -> Result<BatchSummary> {
    let mut summary = BatchSummary::default();
    let mut merged = Workbook::new();

    for input in inputs {
        log::info!("processing {}", input.display());
        let outcome = match policy {
            OutputPolicy::MergedInto(_) => produce_report(input)
                .map(|report| merge_into(&mut merged, report, &stem_of(input))),
            OutputPolicy::BesideInput => {
                produce_report(input).and_then(|report| {
                    save_workbook(&report, &input.with_extension("xlsx"))
                })
            }
            OutputPolicy::IntoDirectory(dir) => {
                produce_report(input).and_then(|report| {
                    save_workbook(&report, &dir.join(format!("{}.xlsx", stem_of(input))))
                })
            }
        };
        match outcome {
            Ok(()) => summary.written += 1,
            Err(err) => {
                log::error!("{}: {err}", input.display());
                summary.failures.push((input.clone(), err.to_string()));
            }
        }
    }

    if let OutputPolicy::MergedInto(dest) = policy {
        if !merged.is_empty() {
            save_workbook(&merged, dest)?;
        }
    }

    Ok(summary)
}

/// Append every sheet of `report`, qualified by the input's stem
///
/// Sheet and table names are qualified as `{name}_{stem}`, clamped to the
/// xlsx rules and de-duplicated against what the destination already
/// holds. Cell styles travel with the cells, nothing is re-derived.
pub fn merge_into(dest: &mut Workbook, report: Workbook, stem: &str) {
    let mut sheet_names: FxHashSet<String> =
        dest.sheets.iter().map(|s| s.name.clone()).collect();
    let mut table_names: FxHashSet<String> =
        dest.sheets.iter().map(|s| s.table_name.clone()).collect();

    for mut sheet in report.sheets {
        let qualified = sanitize_sheet_name(&format!("{}_{stem}", sheet.name));
        sheet.name = unique_name(&qualified, MAX_SHEET_NAME, &sheet_names);
        sheet_names.insert(sheet.name.clone());

        let table = format!("{}_{}", sheet.table_name, table_name_for(stem));
        sheet.table_name = unique_name(&table, usize::MAX, &table_names);
        table_names.insert(sheet.table_name.clone());

        dest.push_sheet(sheet);
    }
}

fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Make `candidate` unique against `taken`, keeping it within `max_len`
fn unique_name(candidate: &str, max_len: usize, taken: &FxHashSet<String>) -> String {
    if !taken.contains(candidate) {
        return candidate.to_string();
    }
    for n in 2usize.. {
        let suffix = format!("_{n}");
        let keep = max_len.saturating_sub(suffix.len());
        let mut name: String = candidate.chars().take(keep).collect();
        name.push_str(&suffix);
        if !taken.contains(&name) {
            return name;
        }
    }
    unreachable!("counter space exhausted");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::{CellStyle, CellValue, Sheet, StyledCell};

    fn report_with_sheet(name: &str, table: &str) -> Workbook {
        let mut wb = Workbook::new();
        wb.push_sheet(Sheet {
            name: name.to_string(),
            table_name: table.to_string(),
            columns: vec!["Propriété".to_string(), "Valeur".to_string()],
            rows: vec![vec![
                StyledCell::styled(CellValue::text("fichier"), CellStyle::Warning),
                StyledCell::new(CellValue::text("a.ifc")),
            ]],
        });
        wb
    }

    #[test]
    fn test_merge_qualifies_names() {
        let mut dest = Workbook::new();
        merge_into(&mut dest, report_with_sheet("Résumé", "ResumeTbl"), "tour_a");

        assert_eq!(dest.sheets[0].name, "Résumé_tour_a");
        assert_eq!(dest.sheets[0].table_name, "ResumeTbl_tour_a");
    }

    #[test]
    fn test_merge_preserves_styles() {
        let mut dest = Workbook::new();
        merge_into(&mut dest, report_with_sheet("Résumé", "ResumeTbl"), "a");

        let cell = &dest.sheets[0].rows[0][0];
        assert_eq!(cell.style, CellStyle::Warning);
        assert_eq!(cell.value, CellValue::text("fichier"));
    }

    #[test]
    fn test_merge_deduplicates_collisions() {
        // Two inputs whose long stems collide after the 31-char cut
        let stem = "immeuble_haussmannien_lot_3_phase_2";
        let mut dest = Workbook::new();
        merge_into(&mut dest, report_with_sheet("Résumé", "ResumeTbl"), stem);
        merge_into(&mut dest, report_with_sheet("Résumé", "ResumeTbl"), stem);

        assert_eq!(dest.sheets.len(), 2);
        assert_ne!(dest.sheets[0].name, dest.sheets[1].name);
        assert!(dest.sheets[1].name.chars().count() <= MAX_SHEET_NAME);
        assert_ne!(dest.sheets[0].table_name, dest.sheets[1].table_name);
    }

    #[test]
    fn test_merge_truncates_long_names() {
        let mut dest = Workbook::new();
        merge_into(
            &mut dest,
            report_with_sheet("Arborescence", "ArborescenceTbl"),
            "residence_les_jardins_du_parc",
        );
        assert!(dest.sheets[0].name.chars().count() <= MAX_SHEET_NAME);
        assert!(dest.sheets[0].name.starts_with("Arborescence_"));
    }
}
