// Copyright 2026 objid contributors
// SPDX-License-Identifier: Apache-2.0

//! Non-fatal observations made while lexing.
//!
//! The lexer never fails. When it has to recover (a literal runs to the end
//! of input, an `#endif` has nothing to close) it records a [`LexError`] and
//! carries on with exactly the tokens it would have produced anyway. Callers
//! may surface these as warnings; they integrate with [`miette`].

// Spurious warnings from miette derive macro expansion
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

use super::Span;

/// A recovery point hit during lexing.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind}")]
#[diagnostic(severity(Warning))]
pub struct LexError {
    /// The kind of lexical problem.
    #[source]
    pub kind: LexErrorKind,
    /// The source location of the problem.
    #[label("here")]
    pub span: Span,
}

impl LexError {
    /// Creates a new lexical error.
    #[must_use]
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The kind of lexical problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// A single-quoted string ran to end of input.
    #[error("unterminated string literal")]
    UnterminatedString,

    /// A double-quoted identifier ran to end of input.
    #[error("unterminated quoted identifier")]
    UnterminatedQuotedIdentifier,

    /// A block comment ran to end of input.
    #[error("unterminated block comment")]
    UnterminatedComment,

    /// `#endif` with no open conditional.
    #[error("#endif without matching #if")]
    UnmatchedEndif,

    /// `#elif` with no open conditional.
    #[error("#elif without matching #if")]
    UnmatchedElif,

    /// `#else` with no open conditional.
    #[error("#else without matching #if")]
    UnmatchedElse,

    /// A conditional was still open at end of input.
    #[error("#if without matching #endif")]
    UnclosedConditional,
}
