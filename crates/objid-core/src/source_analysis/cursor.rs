// Copyright 2026 objid contributors
// SPDX-License-Identifier: Apache-2.0

//! Positional character reader.
//!
//! The cursor walks the source one character at a time, keeping the byte
//! offset (for [`Span`]s) and the line/column (for [`Position`]s) in step.
//! It never fails: reading past the end yields `None` and leaves the cursor
//! at end of input.

use std::str::Chars;

use super::{Position, Span};

/// A character cursor over a source string.
#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    source: &'src str,
    /// Byte offset of the next character.
    offset: usize,
    line: u32,
    column: u32,
}

impl<'src> Cursor<'src> {
    /// Creates a cursor positioned at the start of `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            offset: 0,
            line: 0,
            column: 0,
        }
    }

    /// Consumes the next character and returns it.
    ///
    /// A `\n` moves to the start of the next line; any other character
    /// advances the column. Returns `None` at end of input.
    pub fn read(&mut self) -> Option<char> {
        let c = self.rest().next()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Returns the character `offset` positions ahead without consuming it.
    ///
    /// `peek(0)` is the character the next [`read`](Self::read) returns.
    #[must_use]
    pub fn peek(&self, offset: usize) -> Option<char> {
        self.rest().nth(offset)
    }

    /// Consumes characters while the predicate holds.
    pub fn read_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek(0).is_some_and(&predicate) {
            self.read();
        }
    }

    /// Returns `true` once every character has been read.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// Returns `true` if the next character starts a line terminator
    /// (`\n`, or the `\r` of `\r\n`).
    #[must_use]
    pub fn is_eol(&self) -> bool {
        matches!(self.peek(0), Some('\n' | '\r'))
    }

    /// Zero-based line of the next character.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Zero-based column of the next character.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Line/column of the next character.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Byte offset of the next character.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Span from `start` (a byte offset) to the current offset.
    #[must_use]
    pub fn span_from(&self, start: usize) -> Span {
        Span::from(start..self.offset)
    }

    /// Source text between `start` and the current offset.
    #[must_use]
    pub fn slice_from(&self, start: usize) -> &'src str {
        &self.source[start..self.offset]
    }

    fn rest(&self) -> Chars<'src> {
        self.source[self.offset..].chars()
    }
}
