// Copyright 2026 objid contributors
// SPDX-License-Identifier: Apache-2.0

//! Conditional-compilation symbols for one scan.

use std::collections::BTreeSet;

use ecow::EcoString;
use serde::Serialize;

/// The preprocessor symbols of a single scan.
///
/// `defined` holds the symbols currently in effect; it starts from whatever
/// the caller seeds (project-level symbols) and changes as `#define` and
/// `#undefine` lines are read. `checked` accumulates every symbol tested by
/// `#if` or `#elif`, whatever the outcome, and never shrinks.
///
/// Symbol names are case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolTable {
    defined: BTreeSet<EcoString>,
    checked: BTreeSet<EcoString>,
}

impl SymbolTable {
    /// Creates an empty symbol table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a symbol table with the given symbols already defined.
    ///
    /// ```
    /// use objid_core::source_analysis::SymbolTable;
    ///
    /// let symbols = SymbolTable::with_defined(["CLEAN24", "CLEAN25"]);
    /// assert!(symbols.is_defined("CLEAN24"));
    /// assert!(!symbols.is_defined("clean24"));
    /// ```
    #[must_use]
    pub fn with_defined<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<EcoString>,
    {
        Self {
            defined: symbols.into_iter().map(Into::into).collect(),
            checked: BTreeSet::new(),
        }
    }

    /// Defines a symbol. Returns `false` if it was already defined.
    pub fn define(&mut self, symbol: impl Into<EcoString>) -> bool {
        self.defined.insert(symbol.into())
    }

    /// Removes a symbol. Returns `false` if it was not defined.
    pub fn undefine(&mut self, symbol: &str) -> bool {
        self.defined.remove(symbol)
    }

    /// Returns `true` if the symbol is currently defined.
    #[must_use]
    pub fn is_defined(&self, symbol: &str) -> bool {
        self.defined.contains(symbol)
    }

    /// Records that a conditional tested this symbol.
    pub fn mark_checked(&mut self, symbol: impl Into<EcoString>) {
        self.checked.insert(symbol.into());
    }

    /// Currently defined symbols, in sorted order.
    pub fn defined(&self) -> impl Iterator<Item = &str> {
        self.defined.iter().map(EcoString::as_str)
    }

    /// Every symbol tested so far, in sorted order.
    pub fn checked(&self) -> impl Iterator<Item = &str> {
        self.checked.iter().map(EcoString::as_str)
    }
}
