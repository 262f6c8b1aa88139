// Copyright 2026 objid contributors
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis with inline conditional compilation.
//!
//! This module converts source text into a stream of visible [`Token`]s.
//! Directive lines are interpreted as they are met and never surfaced;
//! tokens inside inactive `#if` branches are dropped before the caller
//! sees them.
//!
//! # Design Principles
//!
//! - **Error recovery**: Never panic or fail on malformed input; unterminated
//!   runs degrade to the longest matchable prefix and are noted in
//!   [`Lexer::issues`]
//! - **Pull-based**: Tokens are produced on demand by [`Lexer::read`] and
//!   [`Lexer::peek`], with a single token of lookahead
//! - **Scan-scoped state**: The [`SymbolTable`] and conditional stack belong
//!   to one lexer, so independent scans never share anything
//!
//! # Classification
//!
//! At each position the first matching rule wins: whitespace, `//` or
//! `/* */` comment, `#` directive line, digit (number), `"` (quoted
//! identifier), `'` (string), operator character (`: + - * / < >`),
//! punctuation, and finally a word.
//!
//! # Example
//!
//! ```
//! use objid_core::source_analysis::{Lexer, SymbolTable, TokenKind};
//!
//! let source = "#if DEBUG\nlogging\n#endif\ncodeunit";
//! let words: Vec<_> = Lexer::new(source).map(|t| t.text().to_string()).collect();
//! assert_eq!(words, ["codeunit"]);
//!
//! let symbols = SymbolTable::with_defined(["DEBUG"]);
//! let words: Vec<_> = Lexer::with_symbols(source, symbols).map(|t| t.text().to_string()).collect();
//! assert_eq!(words, ["logging", "codeunit"]);
//! ```

use tracing::trace;

use super::{
    ConditionalStack, Cursor, Directive, LexError, LexErrorKind, Span, SymbolTable, Token,
    TokenKind,
};

/// Characters that end a word.
const BOUNDARY_CHARS: &str = "{}[]();.,=:+-*/<>#\"'";

/// Characters that may combine with the following character into a
/// two-character operator.
const OPERATOR_CHARS: &str = ":+-*/<>";

/// Single-character punctuation.
const PUNCTUATION_CHARS: &str = "{}[]();.,=";

/// What the lexer finds at a position, before visibility filtering.
#[derive(Debug)]
enum Lexeme {
    Token(Token),
    Directive(Directive, Span),
}

/// A lexer that produces the visible tokens of a source text.
///
/// The lexer never fails completely. It implements [`Iterator`] for easy
/// consumption; [`read`](Self::read) and [`peek`](Self::peek) give the
/// same stream with one token of lookahead.
#[derive(Debug)]
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    symbols: SymbolTable,
    conditionals: ConditionalStack,
    /// Spans of the `#if` lines of currently open chains.
    open_conditionals: Vec<Span>,
    /// Single-slot lookahead; `Some(None)` caches end of input.
    peeked: Option<Option<Token>>,
    issues: Vec<LexError>,
    finished: bool,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer with no symbols defined.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self::with_symbols(source, SymbolTable::new())
    }

    /// Creates a lexer seeded with the given symbols.
    #[must_use]
    pub fn with_symbols(source: &'src str, symbols: SymbolTable) -> Self {
        Self {
            cursor: Cursor::new(source),
            symbols,
            conditionals: ConditionalStack::new(),
            open_conditionals: Vec::new(),
            peeked: None,
            issues: Vec::new(),
            finished: false,
        }
    }

    /// Consumes and returns the next visible token, or `None` at end of input.
    pub fn read(&mut self) -> Option<Token> {
        match self.peeked.take() {
            Some(token) => token,
            None => self.next_visible(),
        }
    }

    /// Returns the next visible token without consuming it.
    ///
    /// Repeated calls return the same token until [`read`](Self::read).
    pub fn peek(&mut self) -> Option<&Token> {
        if self.peeked.is_none() {
            let token = self.next_visible();
            self.peeked = Some(token);
        }
        self.peeked.as_ref().and_then(Option::as_ref)
    }

    /// Returns `true` when no visible token remains.
    pub fn is_eof(&mut self) -> bool {
        self.peek().is_none()
    }

    /// Zero-based line the underlying cursor has reached.
    ///
    /// After a [`peek`](Self::peek) this is the line at the end of the peeked
    /// token, not the line of the last token read.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.cursor.line()
    }

    /// The symbol table as modified by the directives read so far.
    #[must_use]
    pub const fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Recovery notes collected so far.
    #[must_use]
    pub fn issues(&self) -> &[LexError] {
        &self.issues
    }

    /// Consumes the lexer, returning its symbol table and recovery notes.
    #[must_use]
    pub fn into_parts(self) -> (SymbolTable, Vec<LexError>) {
        (self.symbols, self.issues)
    }

    /// Produces raw tokens until one is visible under the current
    /// conditional stack.
    fn next_visible(&mut self) -> Option<Token> {
        loop {
            match self.lex_lexeme() {
                Some(Lexeme::Token(token)) => {
                    if self.conditionals.is_visible() {
                        return Some(token);
                    }
                    trace!(token = %token, line = token.starts_at().line, "Token hidden by conditional");
                }
                Some(Lexeme::Directive(directive, span)) => self.apply_directive(&directive, span),
                None => {
                    self.finish();
                    return None;
                }
            }
        }
    }

    fn apply_directive(&mut self, directive: &Directive, span: Span) {
        match self.conditionals.apply(directive, &mut self.symbols) {
            Ok(()) => match directive {
                Directive::If(_) => self.open_conditionals.push(span),
                Directive::Endif => {
                    self.open_conditionals.pop();
                }
                _ => {}
            },
            Err(kind) => self.issues.push(LexError::new(kind, span)),
        }
    }

    /// Records conditionals left open at end of input, once.
    fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        for span in self.open_conditionals.drain(..) {
            self.issues
                .push(LexError::new(LexErrorKind::UnclosedConditional, span));
        }
    }

    /// Skips whitespace and comments, then lexes one token or directive.
    fn lex_lexeme(&mut self) -> Option<Lexeme> {
        loop {
            let c = self.cursor.peek(0)?;
            match c {
                c if is_whitespace(c) => self.cursor.read_while(is_whitespace),
                '/' if self.cursor.peek(1) == Some('/') => self.skip_line_comment(),
                '/' if self.cursor.peek(1) == Some('*') => self.skip_block_comment(),
                '#' => return Some(self.lex_directive()),
                _ => return Some(Lexeme::Token(self.lex_token(c))),
            }
        }
    }

    /// Lexes a line comment: `// ...` up to, not including, the line end.
    fn skip_line_comment(&mut self) {
        while !self.cursor.is_eof() && !self.cursor.is_eol() {
            self.cursor.read();
        }
    }

    /// Lexes a block comment: `/* ... */`. Block comments do not nest.
    fn skip_block_comment(&mut self) {
        let start = self.cursor.offset();
        self.cursor.read(); // /
        self.cursor.read(); // *
        loop {
            match self.cursor.read() {
                None => {
                    self.issues.push(LexError::new(
                        LexErrorKind::UnterminatedComment,
                        self.cursor.span_from(start),
                    ));
                    return;
                }
                Some('*') if self.cursor.peek(0) == Some('/') => {
                    self.cursor.read();
                    return;
                }
                Some(_) => {}
            }
        }
    }

    /// Lexes a directive line: `#name symbol`, up to the line end.
    fn lex_directive(&mut self) -> Lexeme {
        let start = self.cursor.offset();
        while !self.cursor.is_eof() && !self.cursor.is_eol() {
            self.cursor.read();
        }
        let directive = Directive::parse(self.cursor.slice_from(start));
        Lexeme::Directive(directive, self.cursor.span_from(start))
    }

    /// Lexes a token starting with `c`.
    fn lex_token(&mut self, c: char) -> Token {
        let start = self.cursor.offset();
        let starts_at = self.cursor.position();

        let kind = match c {
            '0'..='9' => self.lex_number(),
            '"' => self.lex_quoted(c, TokenKind::QuotedIdentifier, start),
            '\'' => self.lex_quoted(c, TokenKind::String, start),
            c if OPERATOR_CHARS.contains(c) => self.lex_operator(c),
            c if PUNCTUATION_CHARS.contains(c) => {
                self.cursor.read();
                TokenKind::Symbol
            }
            _ => self.lex_word(),
        };

        Token::new(
            kind,
            self.cursor.slice_from(start),
            starts_at,
            self.cursor.span_from(start),
        )
    }

    /// Lexes a number: digits with at most one decimal point.
    fn lex_number(&mut self) -> TokenKind {
        let mut seen_point = false;
        while let Some(c) = self.cursor.peek(0) {
            match c {
                '0'..='9' => {}
                '.' if !seen_point => seen_point = true,
                _ => break,
            }
            self.cursor.read();
        }
        TokenKind::Number
    }

    /// Lexes a quoted run where a doubled delimiter stands for itself.
    fn lex_quoted(&mut self, delimiter: char, kind: TokenKind, start: usize) -> TokenKind {
        self.cursor.read(); // opening delimiter
        loop {
            match self.cursor.peek(0) {
                None => {
                    let issue = if kind == TokenKind::String {
                        LexErrorKind::UnterminatedString
                    } else {
                        LexErrorKind::UnterminatedQuotedIdentifier
                    };
                    self.issues
                        .push(LexError::new(issue, self.cursor.span_from(start)));
                    break;
                }
                Some(c) if c == delimiter && self.cursor.peek(1) == Some(delimiter) => {
                    self.cursor.read();
                    self.cursor.read();
                }
                Some(c) if c == delimiter => {
                    self.cursor.read();
                    break;
                }
                Some(_) => {
                    self.cursor.read();
                }
            }
        }
        kind
    }

    /// Lexes an operator: `::` and `<op>=` merge, anything else is one
    /// character.
    fn lex_operator(&mut self, first: char) -> TokenKind {
        self.cursor.read();
        match self.cursor.peek(0) {
            Some(':') if first == ':' => {
                self.cursor.read();
            }
            Some('=') => {
                self.cursor.read();
            }
            _ => {}
        }
        TokenKind::Symbol
    }

    /// Lexes a word: everything up to whitespace, a line end or a boundary
    /// character. Always consumes at least one character.
    fn lex_word(&mut self) -> TokenKind {
        self.cursor.read();
        self.cursor
            .read_while(|c| !is_whitespace(c) && !BOUNDARY_CHARS.contains(c));
        TokenKind::Word
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.read()
    }
}

/// Whitespace, including the byte-order mark some editors write.
fn is_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Convenience function to lex source with no symbols defined.
///
/// For most use cases, prefer using the `Lexer` iterator directly.
#[must_use]
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_analysis::Position;

    /// Helper to lex and extract kind and text.
    fn lex_pairs(source: &str) -> Vec<(TokenKind, String)> {
        lex(source)
            .into_iter()
            .map(|t| (t.kind(), t.text().to_string()))
            .collect()
    }

    fn lex_texts_with(source: &str, defined: &[&str]) -> Vec<String> {
        Lexer::with_symbols(source, SymbolTable::with_defined(defined.iter().copied()))
            .map(|t| t.text().to_string())
            .collect()
    }

    fn issue_kinds(source: &str) -> Vec<LexErrorKind> {
        let mut lexer = Lexer::new(source);
        while lexer.read().is_some() {}
        lexer.issues().iter().map(|issue| issue.kind).collect()
    }

    #[test]
    fn lex_empty() {
        assert!(lex("").is_empty());
        assert!(lex("   \r\n\t").is_empty());
        assert!(lex("// comment").is_empty());
        assert!(lex("/* block */").is_empty());
    }

    #[test]
    fn lex_declaration_header() {
        assert_eq!(
            lex_pairs("codeunit 50100 MyCU { }"),
            vec![
                (TokenKind::Word, "codeunit".into()),
                (TokenKind::Number, "50100".into()),
                (TokenKind::Word, "MyCU".into()),
                (TokenKind::Symbol, "{".into()),
                (TokenKind::Symbol, "}".into()),
            ]
        );
    }

    #[test]
    fn lex_numbers_allow_one_point() {
        assert_eq!(
            lex_pairs("1.5.2 42"),
            vec![
                (TokenKind::Number, "1.5".into()),
                (TokenKind::Symbol, ".".into()),
                (TokenKind::Number, "2".into()),
                (TokenKind::Number, "42".into()),
            ]
        );
    }

    #[test]
    fn lex_number_then_word() {
        assert_eq!(
            lex_pairs("50100abc"),
            vec![
                (TokenKind::Number, "50100".into()),
                (TokenKind::Word, "abc".into()),
            ]
        );
    }

    #[test]
    fn lex_quoted_identifier_with_escapes() {
        let tokens = lex(r#""My ""Special"" Name" x"#);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind(), TokenKind::QuotedIdentifier);
        assert_eq!(tokens[0].text(), r#""My ""Special"" Name""#);
        assert_eq!(tokens[0].value(), r#"My "Special" Name"#);
        assert_eq!(tokens[1].text(), "x");
    }

    #[test]
    fn lex_string_with_escapes() {
        let tokens = lex("'it''s' done");
        assert_eq!(tokens[0].kind(), TokenKind::String);
        assert_eq!(tokens[0].value(), "it's");
        assert_eq!(tokens[1].text(), "done");
    }

    #[test]
    fn quoted_runs_hide_comment_and_brace_characters() {
        assert_eq!(
            lex_pairs(r#"'// { not a comment' "/* } */""#),
            vec![
                (TokenKind::String, "'// { not a comment'".into()),
                (TokenKind::QuotedIdentifier, r#""/* } */""#.into()),
            ]
        );
    }

    #[test]
    fn lex_operators() {
        assert_eq!(
            lex_pairs("a := b::c += -1 <> :"),
            vec![
                (TokenKind::Word, "a".into()),
                (TokenKind::Symbol, ":=".into()),
                (TokenKind::Word, "b".into()),
                (TokenKind::Symbol, "::".into()),
                (TokenKind::Word, "c".into()),
                (TokenKind::Symbol, "+=".into()),
                (TokenKind::Symbol, "-".into()),
                (TokenKind::Number, "1".into()),
                (TokenKind::Symbol, "<".into()),
                (TokenKind::Symbol, ">".into()),
                (TokenKind::Symbol, ":".into()),
            ]
        );
    }

    #[test]
    fn lex_punctuation() {
        let texts: Vec<_> = lex("{}[]();.,=").iter().map(|t| t.text().to_string()).collect();
        assert_eq!(texts, ["{", "}", "[", "]", "(", ")", ";", ".", ",", "="]);
    }

    #[test]
    fn words_stop_at_boundaries() {
        assert_eq!(
            lex_pairs("Rec.Name(x);"),
            vec![
                (TokenKind::Word, "Rec".into()),
                (TokenKind::Symbol, ".".into()),
                (TokenKind::Word, "Name".into()),
                (TokenKind::Symbol, "(".into()),
                (TokenKind::Word, "x".into()),
                (TokenKind::Symbol, ")".into()),
                (TokenKind::Symbol, ";".into()),
            ]
        );
    }

    #[test]
    fn comments_are_skipped() {
        let texts: Vec<_> = lex("a // one\nb /* two\nlines */ c")
            .iter()
            .map(|t| t.text().to_string())
            .collect();
        assert_eq!(texts, ["a", "b", "c"]);
    }

    #[test]
    fn block_comments_do_not_nest() {
        let texts: Vec<_> = lex("/* a /* b */ c */")
            .iter()
            .map(|t| t.text().to_string())
            .collect();
        assert_eq!(texts, ["c", "*", "/"]);
    }

    #[test]
    fn positions_are_zero_based() {
        let tokens = lex("table 1\n  X");
        assert_eq!(tokens[0].starts_at(), Position::new(0, 0));
        assert_eq!(tokens[1].starts_at(), Position::new(0, 6));
        assert_eq!(tokens[2].starts_at(), Position::new(1, 2));
        assert_eq!(tokens[2].span(), Span::new(10, 11));
    }

    #[test]
    fn byte_order_mark_is_whitespace() {
        let tokens = lex("\u{feff}codeunit");
        assert_eq!(tokens[0].text(), "codeunit");
    }

    #[test]
    fn peek_is_idempotent() {
        let mut lexer = Lexer::new("a b");
        let first = lexer.peek().cloned();
        let second = lexer.peek().cloned();
        assert_eq!(first, second);
        assert_eq!(lexer.read(), first);
        assert_eq!(lexer.read().map(|t| t.text().to_string()), Some("b".into()));
        assert!(lexer.peek().is_none());
        assert!(lexer.read().is_none());
        assert!(lexer.is_eof());
    }

    #[test]
    fn line_tracks_cursor() {
        let mut lexer = Lexer::new("a\nb");
        lexer.read();
        assert_eq!(lexer.line(), 0);
        lexer.peek();
        assert_eq!(lexer.line(), 1);
    }

    #[test]
    fn directives_are_invisible() {
        assert_eq!(lex_texts_with("#define X\na\n#region r\nb\n#endregion", &[]), ["a", "b"]);
    }

    #[test]
    fn define_then_if_shows_branch() {
        assert_eq!(lex_texts_with("#define Foo\n#if Foo\nx\n#endif\ny", &[]), ["x", "y"]);
        assert_eq!(lex_texts_with("#if Foo\nx\n#endif\ny", &[]), ["y"]);
    }

    #[test]
    fn seeded_symbols_are_defined() {
        assert_eq!(lex_texts_with("#if Foo\nx\n#endif", &["Foo"]), ["x"]);
    }

    #[test]
    fn undefine_hides_later_branch() {
        assert_eq!(
            lex_texts_with("#undefine Foo\n#if Foo\nx\n#endif", &["Foo"]),
            Vec::<String>::new()
        );
    }

    #[test]
    fn hidden_branch_defines_are_still_applied() {
        // Directives are interpreted even inside inactive branches.
        assert_eq!(
            lex_texts_with("#if A\n#define B\n#endif\n#if B\nx\n#endif", &[]),
            ["x"]
        );
    }

    #[test]
    fn nested_conditionals_require_every_frame() {
        let source = "#if A\na\n#if B\nab\n#endif\n#endif\nz";
        assert_eq!(lex_texts_with(source, &[]), ["z"]);
        assert_eq!(lex_texts_with(source, &["A"]), ["a", "z"]);
        assert_eq!(lex_texts_with(source, &["B"]), ["z"]);
        assert_eq!(lex_texts_with(source, &["A", "B"]), ["a", "ab", "z"]);
    }

    #[test]
    fn chain_takes_only_first_satisfied_branch() {
        let source = "#if A\none\n#elif B\ntwo\n#else\nthree\n#endif";
        assert_eq!(lex_texts_with(source, &["B"]), ["two"]);
        assert_eq!(lex_texts_with(source, &["A", "B"]), ["one"]);
        assert_eq!(lex_texts_with(source, &[]), ["three"]);
    }

    #[test]
    fn checked_symbols_are_reported() {
        let mut lexer = Lexer::new("#if A\n#elif B\n#endif\n#if A\n#endif");
        while lexer.read().is_some() {}
        let (symbols, issues) = lexer.into_parts();
        assert_eq!(symbols.checked().collect::<Vec<_>>(), ["A", "B"]);
        assert!(issues.is_empty());
    }

    #[test]
    fn directive_mid_file_consumes_its_line_only() {
        assert_eq!(lex_texts_with("a #pragma warning disable\nb", &[]), ["a", "b"]);
    }

    #[test]
    fn unterminated_runs_degrade() {
        let tokens = lex("x \"never closed\n{ }");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].text(), "\"never closed\n{ }");
        assert_eq!(issue_kinds("\"open"), [LexErrorKind::UnterminatedQuotedIdentifier]);
        assert_eq!(issue_kinds("'open"), [LexErrorKind::UnterminatedString]);
        assert_eq!(issue_kinds("a /* open"), [LexErrorKind::UnterminatedComment]);
    }

    #[test]
    fn unbalanced_directives_are_noted() {
        assert_eq!(
            issue_kinds("#endif\n#else\n#elif X\n#if Y\nz"),
            [
                LexErrorKind::UnmatchedEndif,
                LexErrorKind::UnmatchedElse,
                LexErrorKind::UnmatchedElif,
                LexErrorKind::UnclosedConditional,
            ]
        );
    }

    #[test]
    fn unclosed_conditional_reported_once() {
        let mut lexer = Lexer::new("#if A\nx");
        assert!(lexer.read().is_none());
        assert!(lexer.read().is_none());
        assert!(lexer.is_eof());
        assert_eq!(lexer.issues().len(), 1);
        assert_eq!(lexer.issues()[0].span, Span::new(0, 5));
    }

    #[test]
    fn crlf_line_endings() {
        let source = "#if A\r\nx\r\n#endif\r\ncodeunit";
        assert_eq!(lex_texts_with(source, &["A"]), ["x", "codeunit"]);
        let tokens = lex("a\r\nb");
        assert_eq!(tokens[1].starts_at(), Position::new(1, 0));
    }
}
