// Copyright 2026 objid contributors
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for the lexer.
//!
//! These tests use `proptest` to verify lexer invariants over generated inputs:
//!
//! 1. **Lexer never panics**: arbitrary string input always terminates
//! 2. **Token spans within input**: all spans satisfy `end <= input.len()`
//! 3. **Tokens are ordered**: spans strictly increase and never overlap
//! 4. **Lexer is deterministic**: same input always produces same tokens
//! 5. **Peek is idempotent**: `peek` twice then `read` yields one token
//! 6. **Quoted escapes decode**: doubled delimiters decode to one
//! 7. **Numbers have at most one point**
//! 8. **Plain text is fully tokenized**: nothing is lost without directives
//! 9. **Nested conditionals are a conjunction**
//! 10. **Chain branches are exclusive**: exactly one branch of a full chain shows

use proptest::prelude::*;

use super::lexer::{Lexer, lex};
use super::symbols::SymbolTable;
use super::token::TokenKind;

// ============================================================================
// Generators
// ============================================================================

/// Source fragments that exercise every lexing rule, including directives.
const FRAGMENTS: &[&str] = &[
    "codeunit",
    "50100",
    "1.5",
    "\"My Name\"",
    "\"A \"\"B\"\"\"",
    "'text'",
    "'it''s'",
    "{",
    "}",
    "::",
    ":=",
    "+=",
    "<",
    ";",
    ",",
    "// comment\n",
    "/* block */",
    "\n#if A\n",
    "\n#elif B\n",
    "\n#else\n",
    "\n#endif\n",
    "\n#define A\n",
    "\n#undefine B\n",
    "\n",
    " ",
];

fn fragment_source() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..40).prop_map(|parts| parts.join(" "))
}

/// Default is 256 cases; override via `PROPTEST_CASES` env var for nightly runs.
fn proptest_config() -> ProptestConfig {
    let default = ProptestConfig::default();
    ProptestConfig {
        cases: default.cases.max(256),
        ..default
    }
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    #![proptest_config(proptest_config())]

    /// Property 1: Lexer never panics on arbitrary string input.
    #[test]
    fn lexer_never_panics(input in "\\PC{0,500}") {
        let _tokens = lex(&input);
    }

    /// Property 1b: Lexer never panics on directive-heavy input.
    #[test]
    fn lexer_never_panics_on_fragments(input in fragment_source()) {
        let mut lexer = Lexer::with_symbols(&input, SymbolTable::with_defined(["A"]));
        while lexer.read().is_some() {}
    }

    /// Property 2: All token spans are within input bounds and match their text.
    #[test]
    fn token_spans_within_input(input in "\\PC{0,300}") {
        for token in lex(&input) {
            let range = token.span().as_range();
            prop_assert!(range.end <= input.len());
            prop_assert_eq!(&input[range], token.text());
        }
    }

    /// Property 3: Tokens come out in source order without overlap.
    #[test]
    fn tokens_are_ordered(input in fragment_source()) {
        let tokens = lex(&input);
        for pair in tokens.windows(2) {
            prop_assert!(pair[0].span().end() <= pair[1].span().start());
            prop_assert!(pair[0].starts_at() < pair[1].starts_at());
        }
    }

    /// Property 4: Lexer is deterministic.
    #[test]
    fn lexer_is_deterministic(input in fragment_source()) {
        prop_assert_eq!(lex(&input), lex(&input));
    }

    /// Property 5: Peek twice then read returns the same token each time.
    #[test]
    fn peek_is_idempotent(input in fragment_source()) {
        let mut lexer = Lexer::new(&input);
        loop {
            let first = lexer.peek().cloned();
            let second = lexer.peek().cloned();
            prop_assert_eq!(&first, &second);
            let read = lexer.read();
            prop_assert_eq!(&first, &read);
            if read.is_none() {
                break;
            }
        }
    }

    /// Property 6: A quoted identifier with doubled quotes decodes to single quotes.
    #[test]
    fn quoted_identifier_round_trips(name in "[a-zA-Z \"]{0,30}") {
        let source = format!("\"{}\"", name.replace('"', "\"\""));
        let tokens = lex(&source);
        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(tokens[0].kind(), TokenKind::QuotedIdentifier);
        prop_assert_eq!(tokens[0].value(), name.as_str());
    }

    /// Property 7: Number tokens contain at most one decimal point.
    #[test]
    fn numbers_have_at_most_one_point(input in "[0-9.]{1,20}") {
        for token in lex(&input) {
            if token.kind() == TokenKind::Number {
                prop_assert!(token.text().matches('.').count() <= 1);
            }
        }
    }

    /// Property 8: Without directives, nothing is hidden and every
    /// non-whitespace character belongs to some token.
    #[test]
    fn plain_text_is_fully_tokenized(input in "[a-z0-9{};:=+ \n]{0,100}") {
        let covered: usize = lex(&input).iter().map(|t| t.text().len()).sum();
        let significant = input.chars().filter(|c| !c.is_whitespace()).count();
        prop_assert_eq!(covered, significant);
    }

    /// Property 9: Content wrapped in `#if A … #if B … #endif #endif` is
    /// visible iff both symbols are defined.
    #[test]
    fn nested_conditionals_are_a_conjunction(a in any::<bool>(), b in any::<bool>()) {
        let source = "#if A\n#if B\ninner\n#endif\n#endif\n";
        let mut defined = Vec::new();
        if a { defined.push("A"); }
        if b { defined.push("B"); }
        let visible = lex_count(source, &defined);
        prop_assert_eq!(visible == 1, a && b);
    }

    /// Property 10: At most one branch of a chain is visible.
    #[test]
    fn chain_branches_are_exclusive(a in any::<bool>(), b in any::<bool>(), c in any::<bool>()) {
        let source = "#if A\none\n#elif B\ntwo\n#elif C\nthree\n#else\nfour\n#endif\n";
        let mut defined = Vec::new();
        if a { defined.push("A"); }
        if b { defined.push("B"); }
        if c { defined.push("C"); }
        prop_assert_eq!(lex_count(source, &defined), 1);
    }
}

fn lex_count(source: &str, defined: &[&str]) -> usize {
    Lexer::with_symbols(source, SymbolTable::with_defined(defined.iter().copied())).count()
}
