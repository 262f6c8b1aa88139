// Copyright 2026 objid contributors
// SPDX-License-Identifier: Apache-2.0

//! Scanning infrastructure for application-language source text.
//!
//! # Pipeline
//!
//! ```text
//! text → Cursor → Lexer (directives resolved, hidden tokens dropped) → ObjectScanner
//! ```
//!
//! The [`Cursor`] reads characters and tracks line and column. The [`Lexer`]
//! turns characters into [`Token`]s, interpreting `#define`, `#undefine`,
//! `#if`, `#elif`, `#else` and `#endif` lines against a [`SymbolTable`] as it
//! goes; only tokens in active branches are ever returned. The
//! [`ObjectScanner`] pulls those tokens and recognizes object declaration
//! headers.
//!
//! ```
//! use objid_core::source_analysis::{SymbolTable, parse_objects};
//!
//! let mut symbols = SymbolTable::with_defined(["Foo"]);
//! let objects = parse_objects("#if Foo\ncodeunit 50100 MyCU { }\n#endif", &mut symbols);
//!
//! assert_eq!(objects.len(), 1);
//! assert_eq!(objects[0].id, Some(50100));
//! assert_eq!(symbols.checked().collect::<Vec<_>>(), ["Foo"]);
//! ```
//!
//! # Error Handling
//!
//! Nothing in this module fails. Malformed input degrades to fewer tokens or
//! fewer declarations; points where the lexer had to recover are available
//! as [`LexError`]s for callers that want to report them.

mod cursor;
mod directive;
mod error;
mod lexer;
mod parser;
mod span;
mod symbols;
mod token;

#[cfg(test)]
mod lexer_property_tests;

pub use cursor::Cursor;
pub use directive::{ConditionalFrame, ConditionalStack, Directive};
pub use error::{LexError, LexErrorKind};
pub use lexer::{Lexer, lex};
pub use parser::{ObjectKind, ObjectScanner, ScanOutcome, Step, parse_objects, scan};
pub use span::{Position, Span};
pub use symbols::SymbolTable;
pub use token::{Token, TokenKind};
