// Copyright 2026 objid contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI command implementations.

use camino::{Utf8Path, Utf8PathBuf};
use miette::{Context, IntoDiagnostic, Result};
use objid_core::source_analysis::{ScanOutcome, SymbolTable, scan};
use std::fs;
use tracing::{debug, warn};

pub mod check;
pub mod manifest;
pub mod scan;
pub mod sources;

use manifest::AppManifest;

/// One scanned source file.
#[derive(Debug)]
pub struct FileScan {
    /// Path of the file.
    pub file: Utf8PathBuf,
    /// Full text of the file.
    pub source: String,
    /// What the scanner found.
    pub outcome: ScanOutcome,
}

/// The symbols every file of an app starts with: the manifest's
/// `preprocessorSymbols` plus any given on the command line.
#[must_use]
pub fn initial_symbols(manifest: &AppManifest, defines: &[String]) -> SymbolTable {
    SymbolTable::with_defined(
        manifest
            .preprocessor_symbols
            .iter()
            .chain(defines)
            .map(String::as_str),
    )
}

/// Scans every source file at `path`, each from a fresh copy of `symbols`.
///
/// Lexer recovery notes are logged as warnings; they never stop the scan.
pub fn scan_files(path: &Utf8Path, symbols: &SymbolTable) -> Result<Vec<FileScan>> {
    let files = sources::find_source_files(path)?;
    debug!(count = files.len(), "Found source files");

    files
        .into_iter()
        .map(|file| {
            let source = fs::read_to_string(&file)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to read '{file}'"))?;
            let outcome = scan(&source, symbols.clone());
            for issue in &outcome.issues {
                warn!(file = %file, offset = issue.span.start(), "{issue}");
            }
            Ok(FileScan {
                file,
                source,
                outcome,
            })
        })
        .collect()
}
