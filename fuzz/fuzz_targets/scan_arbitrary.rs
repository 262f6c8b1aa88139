// Copyright 2026 objid contributors
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for scanner crash safety testing.
//!
//! Feeds arbitrary byte sequences to the scanner and asserts that it never
//! panics and always terminates.
//!
//! # Success Criteria
//!
//! - It never panics on any input
//! - Every declaration it emits carries its kind's mandated fields
//! - Declarations come out in source order

#![no_main]

use libfuzzer_sys::fuzz_target;
use objid_core::source_analysis::{ObjectKind, SymbolTable, scan};

fuzz_target!(|data: &[u8]| {
    // Invalid UTF-8 never reaches the scanner
    if let Ok(source) = std::str::from_utf8(data) {
        let outcome = scan(source, SymbolTable::with_defined(["DEBUG"]));

        for decl in &outcome.declarations {
            let kind = ObjectKind::lookup(&decl.kind).expect("emitted kind is in the table");
            assert!(kind.is_complete(decl));
        }
        for pair in outcome.declarations.windows(2) {
            assert!(pair[0].position < pair[1].position);
        }
    }
});
