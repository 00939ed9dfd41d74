// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end batch tests over real files on disk

use ifc_report_core::{produce_batch, produce_report, OutputPolicy};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_ifc(dir: &Path, name: &str, data_section: &str) -> PathBuf {
    let content = format!(
        "ISO-10303-21;\nHEADER;\nFILE_SCHEMA(('IFC4'));\nENDSEC;\nDATA;\n{data_section}ENDSEC;\nEND-ISO-10303-21;\n"
    );
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

const SMALL_MODEL: &str = "\
#1=IFCPROJECT('p',$,'Projet',$,$,$,$,$,$);
#2=IFCSITE('s',$,'Terrain',$,$,$,$,$,.ELEMENT.,(48,52,0),(2,21,0),35.0,$,$);
#3=IFCBUILDINGSTOREY('n',$,'RDC',$,$,$,$,$,.ELEMENT.,0.);
#4=IFCRELAGGREGATES('r',$,$,$,#1,(#2));
#5=IFCWALL('w',$,'Mur',$,$,$,$,$);
";

#[test]
fn test_single_report_has_four_sheets() {
    let dir = TempDir::new().unwrap();
    let input = write_ifc(dir.path(), "tour.ifc", SMALL_MODEL);

    let report = produce_report(&input).unwrap();
    let names: Vec<&str> = report.sheets.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Résumé", "Niveaux", "Arborescence", "Entités"]);
}

#[test]
fn test_batch_beside_input() {
    let dir = TempDir::new().unwrap();
    let a = write_ifc(dir.path(), "a.ifc", SMALL_MODEL);
    let b = write_ifc(dir.path(), "b.ifc", SMALL_MODEL);

    let summary = produce_batch(&[a, b], &OutputPolicy::BesideInput).unwrap();
    assert_eq!(summary.written, 2);
    assert!(summary.failures.is_empty());
    assert!(dir.path().join("a.xlsx").is_file());
    assert!(dir.path().join("b.xlsx").is_file());
}

#[test]
fn test_batch_into_directory() {
    let dir = TempDir::new().unwrap();
    let input = write_ifc(dir.path(), "tour.ifc", SMALL_MODEL);
    let out = dir.path().join("sorties");

    let summary = produce_batch(
        std::slice::from_ref(&input),
        &OutputPolicy::IntoDirectory(out.clone()),
    )
    .unwrap();
    assert_eq!(summary.written, 1);
    assert!(out.join("tour.xlsx").is_file());
}

#[test]
fn test_one_bad_input_does_not_abort_the_batch() {
    let dir = TempDir::new().unwrap();
    let a = write_ifc(dir.path(), "a.ifc", SMALL_MODEL);
    let bad = dir.path().join("corrompu.ifc");
    fs::write(&bad, "pas un fichier STEP").unwrap();
    let c = write_ifc(dir.path(), "c.ifc", SMALL_MODEL);

    let summary = produce_batch(&[a, bad.clone(), c], &OutputPolicy::BesideInput).unwrap();
    assert_eq!(summary.written, 2);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].0, bad);
    assert!(dir.path().join("a.xlsx").is_file());
    assert!(dir.path().join("c.xlsx").is_file());
    assert!(!dir.path().join("corrompu.xlsx").exists());
}

#[test]
fn test_merge_writes_one_workbook() {
    let dir = TempDir::new().unwrap();
    let a = write_ifc(dir.path(), "a.ifc", SMALL_MODEL);
    let b = write_ifc(dir.path(), "b.ifc", SMALL_MODEL);
    let dest = dir.path().join("rapport_ifc.xlsx");

    let summary = produce_batch(&[a, b], &OutputPolicy::MergedInto(dest.clone())).unwrap();
    assert_eq!(summary.written, 2);
    assert!(dest.is_file());
    assert!(!dir.path().join("a.xlsx").exists());
}

#[test]
fn test_merge_of_two_inputs_yields_eight_unique_sheets() {
    let dir = TempDir::new().unwrap();
    let a = write_ifc(dir.path(), "a.ifc", SMALL_MODEL);
    let b = write_ifc(dir.path(), "b.ifc", SMALL_MODEL);

    let mut merged = ifc_report_core::Workbook::new();
    ifc_report_core::merge_into(&mut merged, produce_report(&a).unwrap(), "a");
    ifc_report_core::merge_into(&mut merged, produce_report(&b).unwrap(), "b");

    assert_eq!(merged.sheets.len(), 8);
    let mut names: Vec<&str> = merged.sheets.iter().map(|s| s.name.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), 8);
    assert!(merged.sheets.iter().any(|s| s.name == "Résumé_a"));
    assert!(merged.sheets.iter().any(|s| s.name == "Entités_b"));
}

#[test]
fn test_merge_with_all_inputs_bad_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("corrompu.ifc");
    fs::write(&bad, "rien").unwrap();
    let dest = dir.path().join("rapport_ifc.xlsx");

    let summary = produce_batch(&[bad], &OutputPolicy::MergedInto(dest.clone())).unwrap();
    assert_eq!(summary.written, 0);
    assert_eq!(summary.failures.len(), 1);
    assert!(!dest.exists());
}

#[test]
fn test_missing_file_is_reported_with_path() {
    let dir = TempDir::new().unwrap();
    let ghost = dir.path().join("fantome.ifc");

    let summary = produce_batch(
        std::slice::from_ref(&ghost),
        &OutputPolicy::BesideInput,
    )
    .unwrap();
    assert_eq!(summary.written, 0);
    assert_eq!(summary.failures[0].0, ghost);
}
