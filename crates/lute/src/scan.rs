//! Single-pass scanner turning source text into tokens.
//!
//! The scanner is infallible in the sense that it always produces a token
//! stream; malformed input (unterminated strings, stray characters) is
//! reported as `SyntaxError`s alongside the tokens so the caller can refuse
//! to parse.

use crate::{
    error::SyntaxError,
    token::{Token, TokenKind},
};

/// Scans `source` into a token stream terminated by an `Eof` token.
pub(crate) fn scan(source: &str) -> (Vec<Token<'_>>, Vec<SyntaxError>) {
    let mut scanner = Scanner::new(source);
    scanner.run();
    (scanner.tokens, scanner.errors)
}

struct Scanner<'src> {
    source: &'src str,
    /// Byte offset of the start of the token being scanned.
    start: usize,
    /// Byte offset of the next character to consume.
    current: usize,
    line: u32,
    tokens: Vec<Token<'src>>,
    errors: Vec<SyntaxError>,
}

impl<'src> Scanner<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            source,
            start: 0,
            current: 0,
            line: 1,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn run(&mut self) {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }
        self.tokens.push(Token::new(TokenKind::Eof, "", self.line));
    }

    fn scan_token(&mut self) {
        let c = self.advance();
        match c {
            '(' => self.push(TokenKind::LeftParen),
            ')' => self.push(TokenKind::RightParen),
            '{' => self.push(TokenKind::LeftBrace),
            '}' => self.push(TokenKind::RightBrace),
            ',' => self.push(TokenKind::Comma),
            '.' => self.push(TokenKind::Dot),
            '-' => self.push(TokenKind::Minus),
            '+' => self.push(TokenKind::Plus),
            ';' => self.push(TokenKind::Semicolon),
            '*' => self.push(TokenKind::Star),
            '!' => self.push_either('=', TokenKind::BangEqual, TokenKind::Bang),
            '=' => self.push_either('=', TokenKind::EqualEqual, TokenKind::Equal),
            '<' => self.push_either('=', TokenKind::LessEqual, TokenKind::Less),
            '>' => self.push_either('=', TokenKind::GreaterEqual, TokenKind::Greater),
            '/' => {
                if self.matches('/') {
                    // Line comment, runs to end of line.
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                } else {
                    self.push(TokenKind::Slash);
                }
            }
            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,
            '"' => self.string(),
            c if c.is_ascii_digit() => self.number(),
            c if is_ident_start(c) => self.identifier(),
            _ => self.error("Unexpected character."),
        }
    }

    /// Scans a string literal. The closing quote must appear on the same
    /// line; escapes are not supported.
    fn string(&mut self) {
        loop {
            match self.peek() {
                Some('"') => {
                    self.advance();
                    self.push(TokenKind::Str);
                    return;
                }
                Some('\n') | None => {
                    self.error("Unterminated string.");
                    return;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    /// Scans a number literal: digits with an optional dotted fraction.
    fn number(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        // A dot only belongs to the number when followed by a digit.
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }
        self.push(TokenKind::Number);
    }

    fn identifier(&mut self) {
        while self.peek().is_some_and(is_ident_continue) {
            self.advance();
        }
        self.push(keyword_kind(&self.source[self.start..self.current]));
    }

    fn push(&mut self, kind: TokenKind) {
        let lexeme = &self.source[self.start..self.current];
        self.tokens.push(Token::new(kind, lexeme, self.line));
    }

    fn push_either(&mut self, next: char, two: TokenKind, one: TokenKind) {
        let kind = if self.matches(next) { two } else { one };
        self.push(kind);
    }

    fn error(&mut self, message: &str) {
        let lexeme = self.source[self.start..self.current].to_owned();
        self.errors.push(SyntaxError::at(self.line, lexeme, message));
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current..]
            .chars()
            .next()
            .expect("advance past end of source");
        self.current += c.len_utf8();
        c
    }

    fn matches(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.current += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.current..].chars();
        chars.next();
        chars.next()
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn keyword_kind(lexeme: &str) -> TokenKind {
    match lexeme {
        "and" => TokenKind::And,
        "class" => TokenKind::Class,
        "else" => TokenKind::Else,
        "false" => TokenKind::False,
        "fun" => TokenKind::Fun,
        "for" => TokenKind::For,
        "if" => TokenKind::If,
        "nil" => TokenKind::Nil,
        "or" => TokenKind::Or,
        "print" => TokenKind::Print,
        "return" => TokenKind::Return,
        "super" => TokenKind::Super,
        "this" => TokenKind::This,
        "true" => TokenKind::True,
        "var" => TokenKind::Var,
        "while" => TokenKind::While,
        _ => TokenKind::Identifier,
    }
}
