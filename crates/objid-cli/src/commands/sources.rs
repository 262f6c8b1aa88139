// Copyright 2026 objid contributors
// SPDX-License-Identifier: Apache-2.0

//! Source file discovery.

use camino::{Utf8Path, Utf8PathBuf};
use miette::{Context, IntoDiagnostic, Result};
use std::fs;

/// Extension of application-language source files.
pub const SOURCE_EXTENSION: &str = "al";

/// Find the source files at `path`: the file itself, or every `.al` file
/// below a directory, sorted.
pub fn find_source_files(path: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let mut files = Vec::new();

    if path.is_file() {
        if has_source_extension(path) {
            files.push(path.to_path_buf());
        } else {
            miette::bail!("File '{}' is not a .{} source file", path, SOURCE_EXTENSION);
        }
    } else if path.is_dir() {
        collect_source_files_recursive(path, &mut files)?;
    } else {
        miette::bail!("Path '{}' does not exist", path);
    }

    files.sort();
    Ok(files)
}

fn has_source_extension(path: &Utf8Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SOURCE_EXTENSION))
}

/// Recursively collect all source files from a directory tree.
///
/// Symlinks are skipped to avoid potential infinite recursion from circular links.
fn collect_source_files_recursive(dir: &Utf8Path, files: &mut Vec<Utf8PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read directory '{dir}'"))?
    {
        let entry = entry.into_diagnostic()?;
        let file_type = entry.file_type().into_diagnostic()?;
        if file_type.is_symlink() {
            continue;
        }
        let entry_path = Utf8PathBuf::from_path_buf(entry.path())
            .map_err(|_| miette::miette!("Non-UTF-8 path"))?;

        if file_type.is_dir() {
            collect_source_files_recursive(&entry_path, files)?;
        } else if file_type.is_file() && has_source_extension(&entry_path) {
            files.push(entry_path);
        }
    }
    Ok(())
}
