// Copyright 2026 objid contributors
// SPDX-License-Identifier: Apache-2.0

//! Error-tolerant scanner for object declarations.
//!
//! The scanner pulls visible tokens from the [`Lexer`] and recognizes
//! top-level object declaration headers. It does not build a syntax tree:
//! bodies are skipped by brace balancing, and anything it does not
//! recognize is skipped a line at a time.
//!
//! # Design Philosophy
//!
//! - **Always produce a result** - malformed input yields fewer
//!   declarations, never an error
//! - **Partial headers count** - a declaration that breaks off after its
//!   mandated fields (id and/or name) is still emitted
//! - **Forward progress** - every iteration consumes at least one token
//!
//! Which steps a header runs is data, not code: see [`ObjectKind`].
//!
//! # Usage
//!
//! ```
//! use objid_core::source_analysis::{SymbolTable, scan};
//!
//! let outcome = scan("interface IFoo { }\ntable 18 Customer { }", SymbolTable::new());
//!
//! let names: Vec<_> = outcome
//!     .declarations
//!     .iter()
//!     .map(|d| d.name.as_deref().unwrap_or_default())
//!     .collect();
//! assert_eq!(names, ["IFoo", "Customer"]);
//! ```

use ecow::EcoString;
use tracing::debug;

use crate::declaration::ObjectDeclaration;
use crate::source_analysis::{LexError, Lexer, SymbolTable, Token, TokenKind};

mod kinds;


pub use kinds::{ObjectKind, Step};

/// Everything a completed scan produced.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Declarations in source order.
    pub declarations: Vec<ObjectDeclaration>,
    /// The symbol table after every directive was applied; `checked` lists
    /// the symbols the source tested.
    pub symbols: SymbolTable,
    /// Points where the lexer had to recover.
    pub issues: Vec<LexError>,
}

/// Scans `source` for object declarations, starting from `symbols`.
#[must_use]
pub fn scan(source: &str, symbols: SymbolTable) -> ScanOutcome {
    ObjectScanner::new(source, symbols).into_outcome()
}

/// Scans `source` for object declarations.
///
/// `symbols` seeds the defined symbols and receives the final table, so the
/// caller can read back which symbols the source tested.
pub fn parse_objects(source: &str, symbols: &mut SymbolTable) -> Vec<ObjectDeclaration> {
    let outcome = scan(source, std::mem::take(symbols));
    *symbols = outcome.symbols;
    outcome.declarations
}

/// A lazy scanner yielding declarations in source order.
#[derive(Debug)]
pub struct ObjectScanner<'src> {
    lexer: Lexer<'src>,
}

impl<'src> ObjectScanner<'src> {
    /// Creates a scanner over `source` with the given symbols defined.
    #[must_use]
    pub fn new(source: &'src str, symbols: SymbolTable) -> Self {
        Self {
            lexer: Lexer::with_symbols(source, symbols),
        }
    }

    /// Runs the scanner to the end and returns everything it produced.
    #[must_use]
    pub fn into_outcome(mut self) -> ScanOutcome {
        let declarations: Vec<_> = self.by_ref().collect();
        let (symbols, issues) = self.lexer.into_parts();
        debug!(
            declarations = declarations.len(),
            issues = issues.len(),
            "Scan finished"
        );
        ScanOutcome {
            declarations,
            symbols,
            issues,
        }
    }

    /// Reads one declaration whose kind keyword is the next token.
    ///
    /// Returns `None` if the header broke off before the kind's mandated
    /// fields were read.
    fn parse_object(&mut self, kind: &ObjectKind) -> Option<ObjectDeclaration> {
        let keyword = self.lexer.read()?;
        let mut declaration = ObjectDeclaration::new(kind.keyword, keyword.starts_at());

        for &step in kind.steps {
            if !self.run_step(step, &mut declaration) {
                return if kind.is_complete(&declaration) {
                    debug!(kind = kind.keyword, ?step, at = %declaration.position, "Emitting partial declaration");
                    Some(declaration)
                } else {
                    debug!(kind = kind.keyword, ?step, at = %declaration.position, "Discarding incomplete declaration");
                    None
                };
            }
        }
        Some(declaration)
    }

    fn run_step(&mut self, step: Step, declaration: &mut ObjectDeclaration) -> bool {
        match step {
            Step::Id => self.parse_id(declaration),
            Step::Name => self.parse_name(declaration),
            Step::Implements => self.parse_implements(declaration),
            Step::Target(keyword) => self.parse_target(keyword, declaration),
            Step::Body => self.skip_body(),
        }
    }

    fn parse_id(&mut self, declaration: &mut ObjectDeclaration) -> bool {
        let Some(token) = self.lexer.peek() else {
            return false;
        };
        if token.kind() != TokenKind::Number {
            return false;
        }
        let Some(id) = parse_object_id(token.text()) else {
            return false;
        };
        declaration.id = Some(id);
        declaration.id_span = Some(token.span());
        self.lexer.read();
        true
    }

    fn parse_name(&mut self, declaration: &mut ObjectDeclaration) -> bool {
        let Some(token) = self.read_identifier() else {
            return false;
        };
        declaration.name = Some(identifier_value(&token));
        declaration.name_span = Some(token.span());
        true
    }

    /// Reads an optional `implements A, B, C` clause.
    fn parse_implements(&mut self, declaration: &mut ObjectDeclaration) -> bool {
        if !self.skip_keyword("implements") {
            return true;
        }
        loop {
            let Some(token) = self.read_identifier() else {
                return false;
            };
            declaration.implements.push(identifier_value(&token));
            if !self.skip_symbol(",") {
                return true;
            }
        }
    }

    /// Reads a required `<keyword> Target` clause.
    fn parse_target(&mut self, keyword: &str, declaration: &mut ObjectDeclaration) -> bool {
        if !self.skip_keyword(keyword) {
            return false;
        }
        let Some(token) = self.read_identifier() else {
            return false;
        };
        declaration.extends = Some(identifier_value(&token));
        true
    }

    /// Skips `{ ... }`, counting nested braces.
    fn skip_body(&mut self) -> bool {
        if !self.skip_symbol("{") {
            return false;
        }
        let mut depth: usize = 1;
        while depth > 0 {
            let Some(token) = self.lexer.read() else {
                return false;
            };
            if token.is_symbol("{") {
                depth += 1;
            } else if token.is_symbol("}") {
                depth -= 1;
            }
        }
        true
    }

    /// Consumes every token that starts on the same line as the next one.
    fn skip_line(&mut self) {
        let Some(line) = self.lexer.peek().map(|token| token.starts_at().line) else {
            return;
        };
        debug!(line, "Skipping unrecognized line");
        while self
            .lexer
            .peek()
            .is_some_and(|token| token.starts_at().line == line)
        {
            self.lexer.read();
        }
    }

    fn read_identifier(&mut self) -> Option<Token> {
        if self.lexer.peek().is_some_and(Token::is_identifier) {
            self.lexer.read()
        } else {
            None
        }
    }

    fn skip_keyword(&mut self, keyword: &str) -> bool {
        let matched = self.lexer.peek().is_some_and(|token| token.is_keyword(keyword));
        if matched {
            self.lexer.read();
        }
        matched
    }

    fn skip_symbol(&mut self, symbol: &str) -> bool {
        let matched = self.lexer.peek().is_some_and(|token| token.is_symbol(symbol));
        if matched {
            self.lexer.read();
        }
        matched
    }
}

impl Iterator for ObjectScanner<'_> {
    type Item = ObjectDeclaration;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let token = self.lexer.peek()?;
            let kind = if token.kind() == TokenKind::Word {
                ObjectKind::lookup(token.text())
            } else {
                None
            };
            match kind {
                Some(kind) => {
                    if let Some(declaration) = self.parse_object(kind) {
                        debug!(kind = %declaration.kind, id = ?declaration.id, name = ?declaration.name, "Found declaration");
                        return Some(declaration);
                    }
                }
                None => self.skip_line(),
            }
        }
    }
}

/// Parses the integer part of a number token as a non-zero object id.
fn parse_object_id(text: &str) -> Option<u32> {
    let integer = text.split_once('.').map_or(text, |(before, _)| before);
    integer.parse::<u32>().ok().filter(|&id| id != 0)
}

fn identifier_value(token: &Token) -> EcoString {
    EcoString::from(token.value().as_ref())
}
