// Copyright 2026 objid contributors
// SPDX-License-Identifier: Apache-2.0

//! List the object declarations in a project.
//!
//! Prints one line per declaration:
//!
//! ```text
//! src/MyCU.Codeunit.al:1:1 codeunit 50100 MyCU implements IFoo
//! ```
//!
//! or, with `--json`, one object per file carrying its declarations and the
//! symbols the file tested.

use camino::{Utf8Path, Utf8PathBuf};
use miette::{IntoDiagnostic, Result};
use objid_core::declaration::ObjectDeclaration;
use serde::Serialize;
use std::fmt::Write as _;
use tracing::{info, instrument};

use super::{FileScan, initial_symbols, manifest, scan_files};

/// JSON shape of one scanned file.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileReport<'a> {
    file: &'a Utf8Path,
    declarations: &'a [ObjectDeclaration],
    checked_symbols: Vec<&'a str>,
}

/// Scan `path` and print its declarations.
#[instrument(skip_all, fields(path = %path))]
pub fn run(path: &str, defines: &[String], json: bool) -> Result<()> {
    let path = Utf8PathBuf::from(path);
    let manifest = manifest::load_for(&path)?;
    let symbols = initial_symbols(&manifest, defines);

    let scans = scan_files(&path, &symbols)?;
    let declarations: usize = scans.iter().map(|s| s.outcome.declarations.len()).sum();
    info!(files = scans.len(), declarations, app = manifest.display_name(), "Scanned");

    let output = if json {
        render_json(&scans)?
    } else {
        render_text(&scans)
    };
    print!("{output}");
    Ok(())
}

/// One line per declaration, in file then source order.
#[must_use]
pub fn render_text(scans: &[FileScan]) -> String {
    let mut output = String::new();
    for scan in scans {
        for decl in &scan.outcome.declarations {
            let _ = write!(output, "{}:{} {}", scan.file, decl.position, decl.kind);
            if let Some(id) = decl.id {
                let _ = write!(output, " {id}");
            }
            if let Some(name) = &decl.name {
                let _ = write!(output, " {name}");
            }
            if !decl.implements.is_empty() {
                let interfaces: Vec<&str> = decl.implements.iter().map(|i| i.as_str()).collect();
                let _ = write!(output, " implements {}", interfaces.join(", "));
            }
            if let Some(target) = &decl.extends {
                let _ = write!(output, " extends {target}");
            }
            output.push('\n');
        }
    }
    output
}

/// A pretty-printed JSON array with one entry per file.
pub fn render_json(scans: &[FileScan]) -> Result<String> {
    let reports: Vec<_> = scans
        .iter()
        .map(|scan| FileReport {
            file: &scan.file,
            declarations: &scan.outcome.declarations,
            checked_symbols: scan.outcome.symbols.checked().collect(),
        })
        .collect();
    let mut json = serde_json::to_string_pretty(&reports).into_diagnostic()?;
    json.push('\n');
    Ok(json)
}
