// Copyright 2026 objid contributors
// SPDX-License-Identifier: Apache-2.0

//! The table of recognized object kinds.
//!
//! Each kind keyword maps to the ordered [`Step`]s that read its header.
//! Adding a kind is a matter of adding a row here; the scanner itself does
//! not know about individual kinds.

use crate::declaration::ObjectDeclaration;

/// One step of reading a declaration header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A non-zero numeric id: `50100`
    Id,
    /// A word or quoted identifier naming the object.
    Name,
    /// An optional `implements A, B` clause.
    Implements,
    /// A required `<keyword> Target` clause, e.g. `extends Customer`.
    Target(&'static str),
    /// A brace-balanced body, skipped opaquely.
    Body,
}

const WITH_INTERFACES: &[Step] = &[Step::Id, Step::Name, Step::Implements, Step::Body];
const NUMBERED: &[Step] = &[Step::Id, Step::Name, Step::Body];
const EXTENSION: &[Step] = &[Step::Id, Step::Name, Step::Target("extends"), Step::Body];
const NAMED: &[Step] = &[Step::Name, Step::Body];
const CUSTOMIZATION: &[Step] = &[Step::Name, Step::Target("customizes"), Step::Body];
const ANONYMOUS: &[Step] = &[Step::Body];

/// A recognized object kind and how to read it.
#[derive(Debug, PartialEq, Eq)]
pub struct ObjectKind {
    /// The lower-case kind keyword.
    pub keyword: &'static str,
    /// Header steps, in order.
    pub steps: &'static [Step],
}

const OBJECT_KINDS: &[ObjectKind] = &[
    ObjectKind::new("codeunit", WITH_INTERFACES),
    ObjectKind::new("enum", WITH_INTERFACES),
    ObjectKind::new("table", NUMBERED),
    ObjectKind::new("page", NUMBERED),
    ObjectKind::new("report", NUMBERED),
    ObjectKind::new("query", NUMBERED),
    ObjectKind::new("xmlport", NUMBERED),
    ObjectKind::new("permissionset", NUMBERED),
    ObjectKind::new("tableextension", EXTENSION),
    ObjectKind::new("pageextension", EXTENSION),
    ObjectKind::new("reportextension", EXTENSION),
    ObjectKind::new("enumextension", EXTENSION),
    ObjectKind::new("permissionsetextension", EXTENSION),
    ObjectKind::new("interface", NAMED),
    ObjectKind::new("controladdin", NAMED),
    ObjectKind::new("profile", NAMED),
    ObjectKind::new("entitlement", NAMED),
    ObjectKind::new("pagecustomization", CUSTOMIZATION),
    ObjectKind::new("dotnet", ANONYMOUS),
];

impl ObjectKind {
    const fn new(keyword: &'static str, steps: &'static [Step]) -> Self {
        Self { keyword, steps }
    }

    /// Looks up a kind keyword, ignoring case.
    ///
    /// ```
    /// use objid_core::source_analysis::ObjectKind;
    ///
    /// assert_eq!(ObjectKind::lookup("CodeUnit").map(|k| k.keyword), Some("codeunit"));
    /// assert!(ObjectKind::lookup("procedure").is_none());
    /// ```
    #[must_use]
    pub fn lookup(word: &str) -> Option<&'static Self> {
        OBJECT_KINDS
            .iter()
            .find(|kind| kind.keyword.eq_ignore_ascii_case(word))
    }

    /// Every recognized kind.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        OBJECT_KINDS
    }

    /// Returns `true` if the kind's header includes an id.
    #[must_use]
    pub fn has_id(&self) -> bool {
        self.steps.contains(&Step::Id)
    }

    /// Returns `true` if the kind's header includes a name.
    #[must_use]
    pub fn has_name(&self) -> bool {
        self.steps.contains(&Step::Name)
    }

    /// Returns `true` if a partially read declaration still carries every
    /// field this kind mandates, and so is worth emitting.
    #[must_use]
    pub fn is_complete(&self, declaration: &ObjectDeclaration) -> bool {
        (!self.has_id() || declaration.id.is_some())
            && (!self.has_name() || declaration.name.is_some())
    }
}
