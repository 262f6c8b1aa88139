// Copyright 2026 objid contributors
// SPDX-License-Identifier: Apache-2.0

//! Error diagnostics using miette.
//!
//! Converts objid-core diagnostics into miette-formatted reports with
//! source context and a label on the offending span. The reported miette
//! severity follows the core diagnostic's.

use std::fmt::Display;

use miette::{Diagnostic, LabeledSpan, SourceCode, SourceSpan};
use objid_core::queries::{Diagnostic as CoreDiagnostic, Severity};

/// A scan diagnostic with rich formatting.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ScanDiagnostic {
    /// Severity as miette renders it.
    pub severity: miette::Severity,
    /// Human-readable message.
    pub message: String,
    /// Source code for context
    pub src: miette::NamedSource<String>,
    /// Location of the problem
    pub span: SourceSpan,
    /// Label for the span
    pub label: String,
    /// How to fix the problem, if known.
    pub hint: Option<String>,
}

impl Diagnostic for ScanDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new("objid::scan"))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(self.severity)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        self.hint
            .as_ref()
            .map(|hint| Box::new(hint) as Box<dyn Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.src)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some(self.label.clone()),
            self.span,
        ))))
    }
}

impl ScanDiagnostic {
    /// Create a new diagnostic from an objid-core diagnostic.
    pub fn from_core_diagnostic(
        diagnostic: &CoreDiagnostic,
        source_path: &str,
        source: &str,
    ) -> Self {
        let (severity, label) = match diagnostic.severity {
            Severity::Error => (miette::Severity::Error, "error here"),
            Severity::Warning => (miette::Severity::Warning, "warning here"),
            Severity::Hint => (miette::Severity::Advice, "note"),
        };

        Self {
            severity,
            message: diagnostic.message.to_string(),
            src: miette::NamedSource::new(source_path, source.to_string()),
            span: diagnostic.span.into(),
            label: label.to_string(),
            hint: diagnostic.hint.as_ref().map(ToString::to_string),
        }
    }
}
