// Copyright 2026 objid contributors
// SPDX-License-Identifier: Apache-2.0

//! Check declared object ids against consumption data and id ranges.
//!
//! Consumption data is what the back end has recorded as handed out, as a
//! JSON object from kind to ids:
//!
//! ```json
//! { "codeunit": [50100, 50101], "table": [50100] }
//! ```
//!
//! Every declared id missing from it is reported as not synchronized, and
//! every id outside the manifest's ranges as out of range. Kinds running out
//! of ids are listed at the end.

use camino::{Utf8Path, Utf8PathBuf};
use miette::{Context, IntoDiagnostic, Result};
use objid_core::queries::consumption::{IdRange, check_remaining};
use objid_core::queries::diagnostic_provider::{out_of_range_ids, unsynchronized_ids};
use std::collections::BTreeMap;
use std::fs;
use tracing::{info, instrument};

use super::{FileScan, initial_symbols, manifest, scan_files};
use crate::diagnostic::ScanDiagnostic;

/// Ids recorded as consumed, per object kind.
pub type Consumption = BTreeMap<String, Vec<u32>>;

/// Check `path` and report problems.
///
/// Returns the number of diagnostics reported.
#[instrument(skip_all, fields(path = %path))]
pub fn run(path: &str, consumption_path: &str, defines: &[String]) -> Result<usize> {
    let path = Utf8PathBuf::from(path);
    let manifest = manifest::load_for(&path)?;
    let consumption = load_consumption(Utf8Path::new(consumption_path))?;
    let symbols = initial_symbols(&manifest, defines);
    let ranges = manifest.ranges();

    let scans = scan_files(&path, &symbols)?;
    let diagnostics = collect_diagnostics(&scans, &consumption, &ranges);
    let reported = diagnostics.len();
    for diagnostic in diagnostics {
        // Rendered by the installed miette hook.
        eprintln!("{:?}", miette::Report::new(diagnostic));
    }

    for warning in check_remaining(&ranges, &consumption) {
        println!(
            "{}: {} {} ids left ({} used)",
            manifest.display_name(),
            warning.remaining,
            warning.kind,
            warning.consumed
        );
    }

    info!(files = scans.len(), diagnostics = reported, "Checked");
    Ok(reported)
}

/// Read consumption data from a JSON file.
pub fn load_consumption(path: &Utf8Path) -> Result<Consumption> {
    let content = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read consumption data '{path}'"))?;
    serde_json::from_str(&content)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to parse consumption data '{path}'"))
}

/// Id diagnostics for the scanned files: unsynchronized ids, then
/// out-of-range ids, file by file.
///
/// Lexer recovery notes are not included; `scan_files` logs them.
#[must_use]
pub fn collect_diagnostics(
    scans: &[FileScan],
    consumption: &Consumption,
    ranges: &[IdRange],
) -> Vec<ScanDiagnostic> {
    let mut all = Vec::new();
    for scan in scans {
        let file = scan.file.as_str();
        let declarations = &scan.outcome.declarations;
        all.extend(
            unsynchronized_ids(declarations, consumption)
                .iter()
                .chain(&out_of_range_ids(declarations, ranges))
                .map(|d| ScanDiagnostic::from_core_diagnostic(d, file, &scan.source)),
        );
    }
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use objid_core::source_analysis::{SymbolTable, scan};
    use tempfile::TempDir;

    fn file_scan(file: &str, source: &str) -> FileScan {
        FileScan {
            file: Utf8PathBuf::from(file),
            source: source.to_string(),
            outcome: scan(source, SymbolTable::new()),
        }
    }

    #[test]
    fn test_collect_diagnostics() {
        let scans = [file_scan(
            "a.al",
            "codeunit 50100 A { }\ncodeunit 50101 B { }\ncodeunit 70000 C { }",
        )];
        let consumption = Consumption::from([("codeunit".to_string(), vec![50100, 70000])]);
        let ranges = [IdRange::new(50000, 59999)];

        let messages: Vec<_> = collect_diagnostics(&scans, &consumption, &ranges)
            .into_iter()
            .map(|d| d.message)
            .collect();
        assert_eq!(
            messages,
            [
                "codeunit 50101 is not synchronized",
                "codeunit 70000 is outside the app's id ranges",
            ]
        );
    }

    #[test]
    fn test_collect_diagnostics_ignores_lex_notes() {
        let scans = [file_scan("a.al", "#endif\ncodeunit 50100 A { }\n/* open")];
        assert!(!scans[0].outcome.issues.is_empty());

        let consumption = Consumption::from([("codeunit".to_string(), vec![50100])]);
        let diagnostics = collect_diagnostics(&scans, &consumption, &[IdRange::new(50000, 59999)]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_load_consumption() {
        let temp = TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(temp.path().join("consumption.json")).unwrap();
        fs::write(&path, r#"{"table": [1, 2], "codeunit": []}"#).unwrap();

        let consumption = load_consumption(&path).unwrap();
        assert_eq!(consumption["table"], [1, 2]);
        assert!(consumption["codeunit"].is_empty());
    }

    #[test]
    fn test_load_consumption_malformed() {
        let temp = TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(temp.path().join("consumption.json")).unwrap();
        fs::write(&path, "[1, 2]").unwrap();

        let err = load_consumption(&path).unwrap_err();
        assert!(format!("{err}").contains("Failed to parse consumption data"));
    }
}
