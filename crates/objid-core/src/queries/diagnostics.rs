// Copyright 2026 objid contributors
// SPDX-License-Identifier: Apache-2.0

use ecow::EcoString;
use serde::Serialize;

use crate::source_analysis::Span;

/// A diagnostic message (error, warning, or hint).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// The severity of the diagnostic.
    pub severity: Severity,
    /// The message.
    pub message: EcoString,
    /// The source location.
    pub span: Span,
    /// Optional hint for how to fix the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<EcoString>,
}

impl Diagnostic {
    /// Creates a new error diagnostic.
    #[must_use]
    pub fn error(message: impl Into<EcoString>, span: Span) -> Self {
        Self::new(Severity::Error, message, span)
    }

    /// Creates a new warning diagnostic.
    #[must_use]
    pub fn warning(message: impl Into<EcoString>, span: Span) -> Self {
        Self::new(Severity::Warning, message, span)
    }

    /// Creates a new hint diagnostic.
    #[must_use]
    pub fn hint(message: impl Into<EcoString>, span: Span) -> Self {
        Self::new(Severity::Hint, message, span)
    }

    /// Attaches a hint for how to fix the issue.
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<EcoString>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    fn new(severity: Severity, message: impl Into<EcoString>, span: Span) -> Self {
        Self {
            severity,
            message: message.into(),
            span,
            hint: None,
        }
    }
}

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Something is wrong.
    Error,
    /// Something should be addressed.
    Warning,
    /// Informational.
    Hint,
}
