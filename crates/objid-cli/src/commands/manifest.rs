// Copyright 2026 objid contributors
// SPDX-License-Identifier: Apache-2.0

//! App manifest parsing and project discovery.
//!
//! Reads the `app.json` manifest that defines an app's identity, the id
//! ranges its objects may use, and the preprocessor symbols its sources are
//! compiled with.

use camino::{Utf8Path, Utf8PathBuf};
use miette::{Context, IntoDiagnostic, Result};
use objid_core::queries::consumption::IdRange;
use serde::Deserialize;
use std::fs;
use tracing::debug;

/// File name of the app manifest.
pub const MANIFEST_FILE: &str = "app.json";

/// The fields of `app.json` the scanner cares about.
///
/// Every field is optional; unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppManifest {
    /// App id (a GUID).
    #[serde(default)]
    pub id: Option<String>,
    /// Human-readable app name.
    #[serde(default)]
    pub name: Option<String>,
    /// Id ranges object ids may be assigned from.
    #[serde(default)]
    pub id_ranges: Vec<IdRange>,
    /// Single id range, as written by older manifests.
    #[serde(default)]
    pub id_range: Option<IdRange>,
    /// Symbols defined for every source file of the app.
    #[serde(default)]
    pub preprocessor_symbols: Vec<String>,
}

impl AppManifest {
    /// All id ranges, including a legacy single `idRange`.
    #[must_use]
    pub fn ranges(&self) -> Vec<IdRange> {
        self.id_ranges
            .iter()
            .chain(self.id_range.as_ref())
            .cloned()
            .collect()
    }

    /// Name for messages: the app name, else its id, else a placeholder.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("<unnamed app>")
    }
}

/// Parse an `app.json` manifest file.
pub fn parse_manifest(path: &Utf8Path) -> Result<AppManifest> {
    let content = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read manifest '{path}'"))?;

    // Editors write a byte-order mark into app.json often enough to matter.
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    serde_json::from_str(content)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to parse manifest '{path}'"))
}

/// Look for `app.json` in the given directory and parse it if found.
///
/// Returns `None` if no manifest file exists. Returns an error if the file
/// exists but is malformed.
pub fn find_manifest(project_root: &Utf8Path) -> Result<Option<AppManifest>> {
    let manifest_path = project_root.join(MANIFEST_FILE);
    if manifest_path
        .try_exists()
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to stat manifest '{manifest_path}'"))?
    {
        parse_manifest(&manifest_path).map(Some)
    } else {
        Ok(None)
    }
}

/// Walks up from `start` to the innermost directory containing `app.json`.
///
/// `start` may be a file; the search begins at its directory.
#[must_use]
pub fn discover_project_root(start: &Utf8Path) -> Option<Utf8PathBuf> {
    let mut current = if start.is_file() {
        start.parent()?.to_path_buf()
    } else {
        start.to_path_buf()
    };
    loop {
        if current.join(MANIFEST_FILE).is_file() {
            debug!(root = %current, "Found app root");
            return Some(current);
        }
        if !current.pop() {
            debug!(dir = %start, "No app manifest found");
            return None;
        }
    }
}

/// Finds and loads the manifest governing `path`.
///
/// A path outside any app yields the empty manifest.
pub fn load_for(path: &Utf8Path) -> Result<AppManifest> {
    match discover_project_root(path) {
        Some(root) => Ok(find_manifest(&root)?.unwrap_or_default()),
        None => Ok(AppManifest::default()),
    }
}
