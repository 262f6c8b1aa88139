// Copyright 2026 objid contributors
// SPDX-License-Identifier: Apache-2.0

//! Object declarations found by the scanner.

use ecow::EcoString;
use serde::Serialize;

use crate::source_analysis::{Position, Span};

/// A top-level object declaration header.
///
/// Only the header is captured; the body is skipped by brace balancing.
/// Declarations have no identity beyond their fields: the same source can
/// yield several equal declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDeclaration {
    /// Lower-cased kind keyword: `codeunit`, `table`, `interface`, ...
    pub kind: EcoString,
    /// Numeric object id, for kinds that carry one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    /// Object name, with quoting removed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<EcoString>,
    /// Interfaces listed in an `implements` clause, in source order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub implements: Vec<EcoString>,
    /// Target of an `extends` or `customizes` clause.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<EcoString>,
    /// Where the kind keyword starts.
    pub position: Position,
    /// Byte span of the id token.
    #[serde(skip)]
    pub id_span: Option<Span>,
    /// Byte span of the name token.
    #[serde(skip)]
    pub name_span: Option<Span>,
}

impl ObjectDeclaration {
    /// Starts a declaration of the given kind at `position`.
    #[must_use]
    pub fn new(kind: impl Into<EcoString>, position: Position) -> Self {
        Self {
            kind: kind.into(),
            id: None,
            name: None,
            implements: Vec::new(),
            extends: None,
            position,
            id_span: None,
            name_span: None,
        }
    }
}
