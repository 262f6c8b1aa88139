// Copyright 2026 objid contributors
// SPDX-License-Identifier: Apache-2.0

//! Conditional-compilation directives.
//!
//! A directive line has the form `#<name>[ <symbol>]`. The lexer hands the
//! text of the line to [`Directive::parse`] and applies the result to its
//! [`ConditionalStack`] and [`SymbolTable`]; directives are never surfaced
//! as tokens.
//!
//! # Visibility
//!
//! Every open `#if` chain contributes one [`ConditionalFrame`]. A token is
//! visible only when *all* frames on the stack are satisfied, so
//!
//! ```text
//! #if A
//! #if B
//! codeunit 50100 X { }   // visible iff A and B are both defined
//! #endif
//! #endif
//! ```
//!
//! Within one chain at most one branch is ever satisfied: once a branch
//! has been taken, every later `#elif`/`#else` in the chain is forced off.

use ecow::EcoString;
use tracing::trace;

use super::LexErrorKind;
use super::SymbolTable;

/// A parsed directive line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `#define SYMBOL`
    Define(EcoString),
    /// `#undefine SYMBOL`
    Undefine(EcoString),
    /// `#if SYMBOL`
    If(EcoString),
    /// `#elif SYMBOL`
    Elif(EcoString),
    /// `#else`
    Else,
    /// `#endif`
    Endif,
    /// Any other directive (`#region`, `#pragma`, ...), ignored.
    Other(EcoString),
}

impl Directive {
    /// Parses the text of a directive line, starting at the `#`.
    ///
    /// The name is case-folded. The symbol is the rest of the line with any
    /// trailing `//` comment removed and surrounding whitespace trimmed.
    ///
    /// ```
    /// use objid_core::source_analysis::Directive;
    ///
    /// assert_eq!(Directive::parse("#IF CLEAN24 // obsolete"), Directive::If("CLEAN24".into()));
    /// assert_eq!(Directive::parse("#endif"), Directive::Endif);
    /// ```
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let body = line.strip_prefix('#').unwrap_or(line);
        let (name, rest) = body
            .split_once(char::is_whitespace)
            .unwrap_or((body, ""));
        let rest = rest.split_once("//").map_or(rest, |(before, _)| before);
        let symbol = EcoString::from(rest.trim());

        match name.to_ascii_lowercase().as_str() {
            "define" => Self::Define(symbol),
            "undefine" => Self::Undefine(symbol),
            "if" => Self::If(symbol),
            "elif" => Self::Elif(symbol),
            "else" => Self::Else,
            "endif" => Self::Endif,
            other => Self::Other(other.into()),
        }
    }
}

/// One open `#if` chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionalFrame {
    /// Whether the current branch of the chain is active.
    pub satisfied: bool,
    /// Whether any branch of the chain so far has been active.
    pub was_satisfied_in_chain: bool,
}

impl ConditionalFrame {
    const fn opened(satisfied: bool) -> Self {
        Self {
            satisfied,
            was_satisfied_in_chain: satisfied,
        }
    }
}

/// The stack of open conditional chains.
#[derive(Debug, Clone, Default)]
pub struct ConditionalStack {
    frames: Vec<ConditionalFrame>,
}

impl ConditionalStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when every open frame is satisfied.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.frames.iter().all(|frame| frame.satisfied)
    }

    /// Number of open frames.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Applies a directive.
    ///
    /// Always succeeds in the sense that scanning continues; an `Err` reports
    /// a directive that had no open chain to act on and was ignored.
    ///
    /// # Errors
    ///
    /// Returns the [`LexErrorKind`] describing an unmatched `#elif`, `#else`
    /// or `#endif`.
    pub fn apply(
        &mut self,
        directive: &Directive,
        symbols: &mut SymbolTable,
    ) -> Result<(), LexErrorKind> {
        trace!(?directive, depth = self.frames.len(), "Applying directive");
        match directive {
            Directive::Define(symbol) => {
                if !symbol.is_empty() {
                    symbols.define(symbol.clone());
                }
            }
            Directive::Undefine(symbol) => {
                symbols.undefine(symbol);
            }
            Directive::If(symbol) => {
                let satisfied = symbols.is_defined(symbol);
                self.frames.push(ConditionalFrame::opened(satisfied));
                mark_checked(symbols, symbol);
            }
            Directive::Elif(symbol) => {
                mark_checked(symbols, symbol);
                let frame = self.frames.last_mut().ok_or(LexErrorKind::UnmatchedElif)?;
                if frame.was_satisfied_in_chain {
                    frame.satisfied = false;
                } else {
                    frame.satisfied = symbols.is_defined(symbol);
                    frame.was_satisfied_in_chain = frame.satisfied;
                }
            }
            Directive::Else => {
                let frame = self.frames.last_mut().ok_or(LexErrorKind::UnmatchedElse)?;
                if frame.was_satisfied_in_chain {
                    frame.satisfied = false;
                } else {
                    *frame = ConditionalFrame::opened(true);
                }
            }
            Directive::Endif => {
                self.frames.pop().ok_or(LexErrorKind::UnmatchedEndif)?;
            }
            Directive::Other(_) => {}
        }
        Ok(())
    }
}

fn mark_checked(symbols: &mut SymbolTable, symbol: &EcoString) {
    if !symbol.is_empty() {
        symbols.mark_checked(symbol.clone());
    }
}
