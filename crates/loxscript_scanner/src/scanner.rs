//! The Lox scanner/lexer.
//!
//! Converts source text into the token stream the parser consumes. One
//! forward pass, at most two characters of lookahead, no backtracking:
//! once a dispatch choice is made the characters stay consumed.

use crate::token::{Literal, Token, TokenKind};
use loxscript_diagnostics::{messages, Diagnostic, DiagnosticCollection};

/// The scanner converts Lox source text into tokens.
///
/// A scanner is built for one source buffer, runs exactly one pass, and is
/// consumed by it; `scan_tokens` takes `self` by value so an instance can
/// never be rescanned or reused with new input.
pub struct Scanner {
    /// The source text being scanned.
    text: Vec<char>,
    /// Start of the token currently being recognized.
    start: usize,
    /// Position of the next unread character. Always >= `start`.
    current: usize,
    /// Current 1-based line number.
    line: u32,
    /// Line on which the current token started. Differs from `line` only
    /// while consuming a multi-line string.
    token_line: u32,
    /// Tokens accumulated so far. Never revised once appended.
    tokens: Vec<Token>,
    /// Accumulated diagnostics.
    diagnostics: DiagnosticCollection,
}

impl Scanner {
    /// Create a new scanner for the given source text.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.chars().collect(),
            start: 0,
            current: 0,
            line: 1,
            token_line: 1,
            tokens: Vec::new(),
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// Scan the entire source, returning the token list and any diagnostics.
    ///
    /// The returned list always ends with a single `Eof` token carrying an
    /// empty lexeme. Scan errors never abort the pass: each is recorded
    /// against the line it occurred on and scanning resumes at the next
    /// unread character.
    pub fn scan_tokens(mut self) -> (Vec<Token>, DiagnosticCollection) {
        while !self.is_at_end() {
            self.start = self.current;
            self.token_line = self.line;
            self.scan_token();
        }

        self.tokens
            .push(Token::new(TokenKind::Eof, "", Literal::None, self.line));
        (self.tokens, self.diagnostics)
    }

    /// Recognize exactly one token, or skip exactly one piece of
    /// insignificant input (whitespace, newline, or comment).
    fn scan_token(&mut self) {
        let ch = self.advance();
        match ch {
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),
            ',' => self.add_token(TokenKind::Comma),
            '.' => self.add_token(TokenKind::Dot),
            '-' => self.add_token(TokenKind::Minus),
            '+' => self.add_token(TokenKind::Plus),
            ';' => self.add_token(TokenKind::Semicolon),
            '*' => self.add_token(TokenKind::Star),

            '!' => {
                let kind = if self.match_char('=') { TokenKind::BangEqual } else { TokenKind::Bang };
                self.add_token(kind);
            }
            '=' => {
                let kind = if self.match_char('=') { TokenKind::EqualEqual } else { TokenKind::Equal };
                self.add_token(kind);
            }
            '<' => {
                let kind = if self.match_char('=') { TokenKind::LessEqual } else { TokenKind::Less };
                self.add_token(kind);
            }
            '>' => {
                let kind = if self.match_char('=') { TokenKind::GreaterEqual } else { TokenKind::Greater };
                self.add_token(kind);
            }

            '/' => self.scan_slash(),

            // Insignificant whitespace.
            ' ' | '\r' | '\t' => {}

            '\n' => self.line += 1,

            '"' => self.scan_string(),

            '0'..='9' => self.scan_number(),

            _ if is_alpha(ch) => self.scan_identifier(),

            _ => {
                self.diagnostics
                    .add(Diagnostic::new(self.line, &messages::UNEXPECTED_CHARACTER, &[]));
            }
        }
    }

    /// `/` starts a line comment, a block comment, or the slash token.
    /// Comment detection takes priority over emitting `Slash`.
    fn scan_slash(&mut self) {
        if self.match_char('/') {
            // Line comment: discard through end of line. The newline itself
            // is consumed by the main loop.
            while self.peek() != Some('\n') && !self.is_at_end() {
                self.current += 1;
            }
        } else if self.match_char('*') {
            self.skip_block_comment();
        } else {
            self.add_token(TokenKind::Slash);
        }
    }

    /// Discard a block comment body up to and including the closing `*/`.
    /// Comments do not nest.
    ///
    /// Reaching end of input first leaves the comment silently unterminated.
    // TODO: unterminated block comments run silently off the end of input,
    // unlike unterminated strings which report; pick one behavior once the
    // parser grows a consumer for the distinction.
    fn skip_block_comment(&mut self) {
        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_next() == Some('/') {
                self.current += 2;
                return;
            }
            if self.text[self.current] == '\n' {
                self.line += 1;
            }
            self.current += 1;
        }
    }

    /// Scan a string literal. The opening quote is already consumed.
    ///
    /// Strings may span lines; there is no escape processing, so the first
    /// `"` encountered closes the literal and the decoded value is exactly
    /// the text between the delimiters.
    fn scan_string(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '"' {
                break;
            }
            if ch == '\n' {
                self.line += 1;
            }
            self.current += 1;
        }

        if self.is_at_end() {
            self.diagnostics
                .add(Diagnostic::new(self.line, &messages::UNTERMINATED_STRING, &[]));
            return;
        }

        let value = self.text_slice(self.start + 1, self.current);
        // Closing quote; the lexeme carries both delimiters.
        self.current += 1;
        self.add_literal_token(TokenKind::String, Literal::Str(value));
    }

    /// Scan a number literal: a maximal digit run, then one decimal point
    /// and a second maximal digit run only if a digit follows the point.
    /// A trailing bare `.` is left for the dot token.
    fn scan_number(&mut self) {
        while self.peek().map_or(false, |c| c.is_ascii_digit()) {
            self.current += 1;
        }

        if self.peek() == Some('.') && self.peek_next().map_or(false, |c| c.is_ascii_digit()) {
            self.current += 1;
            while self.peek().map_or(false, |c| c.is_ascii_digit()) {
                self.current += 1;
            }
        }

        let lexeme = self.text_slice(self.start, self.current);
        // The matched lexeme is ASCII digits with at most one interior
        // point, so the parse cannot fail.
        let value: f64 = lexeme.parse().unwrap_or_default();
        self.add_literal_token(TokenKind::Number, Literal::Num(value));
    }

    /// Scan an identifier or keyword: a maximal run of alphanumeric or
    /// underscore characters, classified by exact keyword lookup.
    fn scan_identifier(&mut self) {
        while self.peek().map_or(false, is_alpha_numeric) {
            self.current += 1;
        }

        let text = self.text_slice(self.start, self.current);
        let kind = TokenKind::from_keyword(&text).unwrap_or(TokenKind::Identifier);
        self.add_token(kind);
    }

    // ========================================================================
    // Cursor primitives
    // ========================================================================

    /// Consume and return the next character.
    fn advance(&mut self) -> char {
        let ch = self.text[self.current];
        self.current += 1;
        ch
    }

    /// Consume the next character only if it equals `expected`.
    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Look at the next unread character without advancing.
    #[inline]
    fn peek(&self) -> Option<char> {
        self.text.get(self.current).copied()
    }

    /// Look one character past the next unread character.
    #[inline]
    fn peek_next(&self) -> Option<char> {
        self.text.get(self.current + 1).copied()
    }

    /// Whether the whole input has been consumed.
    #[inline]
    fn is_at_end(&self) -> bool {
        self.current >= self.text.len()
    }

    fn add_token(&mut self, kind: TokenKind) {
        self.add_literal_token(kind, Literal::None);
    }

    fn add_literal_token(&mut self, kind: TokenKind, literal: Literal) {
        let lexeme = self.text_slice(self.start, self.current);
        self.tokens
            .push(Token::new(kind, lexeme, literal, self.token_line));
    }

    /// Convert a range of source characters to a String.
    fn text_slice(&self, start: usize, end: usize) -> String {
        self.text[start..end].iter().collect()
    }
}

/// Check if a character can start an identifier.
fn is_alpha(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic()
}

/// Check if a character can continue an identifier.
fn is_alpha_numeric(ch: char) -> bool {
    is_alpha(ch) || ch.is_ascii_digit()
}
