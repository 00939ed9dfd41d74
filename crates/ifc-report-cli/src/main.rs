// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command line front end for the IFC report pipeline
//!
//! Takes an IFC file or a directory of IFC files and writes one styled
//! xlsx report per input, or a single consolidated workbook with
//! `--merge`.

use anyhow::{bail, Context};
use clap::Parser;
use ifc_report_core::xlsx::save_workbook;
use ifc_report_core::{produce_batch, produce_report, BatchSummary, OutputPolicy};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Default file name of the consolidated workbook
const MERGE_FILE_NAME: &str = "rapport_ifc.xlsx";

#[derive(Parser, Debug)]
#[command(name = "ifc-report", version, about = "Export IFC model reports to xlsx")]
struct Cli {
    /// IFC file or directory to process
    src: PathBuf,

    /// Output file (single input or --merge) or output directory (batch)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Recurse into subdirectories when SRC is a directory
    #[arg(short, long)]
    recursive: bool,

    /// Combine all reports into a single workbook
    #[arg(long)]
    merge: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if cli.src.is_file() {
        let target = cli
            .output
            .clone()
            .unwrap_or_else(|| cli.src.with_extension("xlsx"));
        let report = produce_report(&cli.src)
            .with_context(|| format!("failed to process {}", cli.src.display()))?;
        save_workbook(&report, &target)
            .with_context(|| format!("failed to write {}", target.display()))?;
        println!("  ✔ {}", target.display());
        return Ok(());
    }

    if !cli.src.is_dir() {
        bail!("source path not found: {}", cli.src.display());
    }

    let inputs = discover_ifcs(&cli.src, cli.recursive);
    if inputs.is_empty() {
        bail!("no .ifc file found under {}", cli.src.display());
    }
    println!("▶ processing {} IFC file(s)", inputs.len());

    let policy = if cli.merge {
        OutputPolicy::MergedInto(
            cli.output
                .clone()
                .unwrap_or_else(|| cli.src.join(MERGE_FILE_NAME)),
        )
    } else {
        match &cli.output {
            Some(dir) => OutputPolicy::IntoDirectory(dir.clone()),
            None => OutputPolicy::BesideInput,
        }
    };

    let summary = produce_batch(&inputs, &policy)?;
    print_summary(&summary);

    if summary.written == 0 {
        bail!("no report could be produced");
    }
    Ok(())
}

/// Collect `.ifc` files under `folder`, sorted by path
///
/// The extension match is case-insensitive so `.IFC` exports are picked
/// up too.
fn discover_ifcs(folder: &Path, recursive: bool) -> Vec<PathBuf> {
    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut files: Vec<PathBuf> = WalkDir::new(folder)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("ifc"))
        })
        .collect();
    files.sort();
    files
}

fn print_summary(summary: &BatchSummary) {
    println!(
        "✅ done: {} succeeded, {} failed",
        summary.written,
        summary.failures.len()
    );
    for (path, reason) in &summary.failures {
        eprintln!("  ✖ {}: {reason}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_discover_is_case_insensitive_and_sorted() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.IFC"), "x").unwrap();
        fs::write(dir.path().join("a.ifc"), "x").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let found = discover_ifcs(dir.path(), false);
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.ifc", "b.IFC"]);
    }

    #[test]
    fn test_discover_recursion_is_opt_in() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("niveau1");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("profond.ifc"), "x").unwrap();
        fs::write(dir.path().join("plat.ifc"), "x").unwrap();

        assert_eq!(discover_ifcs(dir.path(), false).len(), 1);
        assert_eq!(discover_ifcs(dir.path(), true).len(), 2);
    }
}
