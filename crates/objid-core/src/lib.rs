// Copyright 2026 objid contributors
// SPDX-License-Identifier: Apache-2.0

//! Object declaration scanner core.
//!
//! This crate finds the object declarations in application-language source
//! files without building a syntax tree:
//! - Character reading with line and column tracking
//! - Lexing with inline conditional compilation (`#if`/`#elif`/`#else`/`#endif`)
//! - Error-tolerant recognition of object declaration headers
//! - Queries over the declarations found (id synchronization, range checks)
//!
//! Scanning never fails: malformed input yields fewer declarations.
//!
//! ```
//! use objid_core::prelude::*;
//!
//! let outcome = scan("codeunit 50100 \"My Codeunit\" implements IFoo { }", SymbolTable::new());
//! let decl = &outcome.declarations[0];
//! assert_eq!(decl.id, Some(50100));
//! assert_eq!(decl.name.as_deref(), Some("My Codeunit"));
//! ```

pub mod declaration;
pub mod queries;
pub mod source_analysis;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::declaration::ObjectDeclaration;
    pub use crate::queries::{Diagnostic, Severity};
    pub use crate::source_analysis::{Position, ScanOutcome, Span, SymbolTable, parse_objects, scan};
}
