// Copyright 2026 objid contributors
// SPDX-License-Identifier: Apache-2.0

//! Diagnostic provider for declared object ids.
//!
//! Two checks run over the declarations of one source file:
//!
//! - an id the back end does not know about is *not synchronized*
//! - an id outside every range of the app's manifest is *out of range*
//!
//! Both report a [`Severity::Warning`](super::Severity::Warning) on the id
//! token, so an editor can underline exactly the number.
//!
//! # Examples
//!
//! ```
//! use std::collections::BTreeMap;
//! use objid_core::queries::diagnostic_provider::unsynchronized_ids;
//! use objid_core::source_analysis::{SymbolTable, scan};
//!
//! let outcome = scan("codeunit 50100 A { }\ncodeunit 50101 B { }", SymbolTable::new());
//! let consumption = BTreeMap::from([("codeunit".to_string(), vec![50100])]);
//!
//! let diagnostics = unsynchronized_ids(&outcome.declarations, &consumption);
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].message.as_str(), "codeunit 50101 is not synchronized");
//! ```

use std::collections::BTreeMap;

use ecow::eco_format;

use super::Diagnostic;
use super::consumption::{IdRange, in_any_range};
use crate::declaration::ObjectDeclaration;

/// Warns about every declared id its kind's consumption does not include.
///
/// Consumption kinds are matched ignoring case. Declarations without an id
/// are never reported.
#[must_use]
pub fn unsynchronized_ids(
    declarations: &[ObjectDeclaration],
    consumption: &BTreeMap<String, Vec<u32>>,
) -> Vec<Diagnostic> {
    declarations
        .iter()
        .filter_map(|declaration| {
            let id = declaration.id?;
            let consumed = consumption
                .iter()
                .find(|(kind, _)| kind.eq_ignore_ascii_case(&declaration.kind))
                .is_some_and(|(_, ids)| ids.contains(&id));
            (!consumed).then(|| {
                Diagnostic::warning(
                    eco_format!("{} {id} is not synchronized", declaration.kind),
                    declaration.id_span.unwrap_or_default(),
                )
                .with_hint("Synchronize object ids with the back end to record this id")
            })
        })
        .collect()
}

/// Warns about every declared id outside all of `ranges`.
///
/// An app without ranges reports nothing.
#[must_use]
pub fn out_of_range_ids(declarations: &[ObjectDeclaration], ranges: &[IdRange]) -> Vec<Diagnostic> {
    if ranges.is_empty() {
        return Vec::new();
    }
    declarations
        .iter()
        .filter_map(|declaration| {
            let id = declaration.id?;
            (!in_any_range(ranges, id)).then(|| {
                Diagnostic::warning(
                    eco_format!("{} {id} is outside the app's id ranges", declaration.kind),
                    declaration.id_span.unwrap_or_default(),
                )
            })
        })
        .collect()
}
