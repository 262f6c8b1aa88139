// Copyright 2026 objid contributors
// SPDX-License-Identifier: Apache-2.0

//! Token types produced by the lexer.
//!
//! # Token Structure
//!
//! Each token consists of:
//! - A [`TokenKind`] indicating the category of token
//! - The raw source text of the token, delimiters included
//! - A [`Position`] where the token starts, and its byte [`Span`]
//!
//! Directive lines (`#if`, `#define`, ...) never become tokens; the lexer
//! consumes them internally.

use std::borrow::Cow;
use std::fmt;

use ecow::EcoString;

use super::{Position, Span};

/// The category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A bare word: `codeunit`, `MyCodeunit`, `implements`
    Word,

    /// A numeric literal with at most one decimal point: `50100`, `1.5`
    Number,

    /// A single-quoted string literal: `'text'`, `'it''s'`
    String,

    /// A double-quoted identifier: `"My Codeunit"`, `"A ""B"""`
    QuotedIdentifier,

    /// Punctuation or an operator: `{`, `;`, `::`, `:=`, `+`
    Symbol,
}

impl TokenKind {
    /// The delimiter character of quoted token kinds.
    #[must_use]
    pub const fn delimiter(self) -> Option<char> {
        match self {
            Self::String => Some('\''),
            Self::QuotedIdentifier => Some('"'),
            Self::Word | Self::Number | Self::Symbol => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Word => "word",
            Self::Number => "number",
            Self::String => "string",
            Self::QuotedIdentifier => "quoted identifier",
            Self::Symbol => "symbol",
        };
        f.write_str(name)
    }
}

/// A visible token with its source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    text: EcoString,
    starts_at: Position,
    span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<EcoString>, starts_at: Position, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            starts_at,
            span,
        }
    }

    /// Returns the token kind.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Returns the raw source text, including any delimiters.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns where the token starts.
    #[must_use]
    pub const fn starts_at(&self) -> Position {
        self.starts_at
    }

    /// Returns the byte span of the token.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// Returns the token's value.
    ///
    /// Quoted tokens lose their delimiters and have doubled delimiters
    /// collapsed, so `"My ""Special"" Name"` yields `My "Special" Name`.
    /// Other tokens return their text unchanged.
    #[must_use]
    pub fn value(&self) -> Cow<'_, str> {
        match self.kind.delimiter() {
            Some(delimiter) => Cow::Owned(unquote(&self.text, delimiter)),
            None => Cow::Borrowed(&self.text),
        }
    }

    /// Returns `true` for a symbol token with exactly this text.
    #[must_use]
    pub fn is_symbol(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Symbol && self.text.as_str() == symbol
    }

    /// Returns `true` for a word matching `keyword` case-insensitively.
    #[must_use]
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Word && self.text.eq_ignore_ascii_case(keyword)
    }

    /// Returns `true` if the token can name something: a word or a quoted
    /// identifier.
    #[must_use]
    pub const fn is_identifier(&self) -> bool {
        matches!(self.kind, TokenKind::Word | TokenKind::QuotedIdentifier)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Strips the opening delimiter and decodes doubled delimiters up to the
/// closing one. An unterminated literal decodes to the end of its text.
fn unquote(text: &str, delimiter: char) -> String {
    let mut chars = text.chars().peekable();
    if chars.peek() == Some(&delimiter) {
        chars.next();
    }
    let mut value = String::with_capacity(text.len());
    while let Some(c) = chars.next() {
        if c == delimiter {
            if chars.peek() == Some(&delimiter) {
                chars.next();
                value.push(delimiter);
                continue;
            }
            break;
        }
        value.push(c);
    }
    value
}
