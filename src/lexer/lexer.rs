use log::trace;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, IDENTIFIER_PATTERN, KEYWORDS, NUMBER_PATTERN, OPERATORS};

/// Pull tokenizer with one token of lookahead.
///
/// Newlines are significant and come out as [`TokenKind::Newline`] tokens;
/// other whitespace and `//` comments never reach the caller. Input the
/// language has no use for becomes a [`TokenKind::Illegal`] token rather than
/// an error, and it is up to the parser to reject it.
#[derive(Debug, Clone)]
pub struct Lexer {
    source: String,
    pos: usize,
    line: u32,
    line_start: usize,
    lookahead: Option<Token>,
    finished: bool,
}

impl Lexer {
    pub fn new(source: impl Into<String>) -> Lexer {
        Lexer {
            source: source.into(),
            pos: 0,
            line: 1,
            line_start: 0,
            lookahead: None,
            finished: false,
        }
    }

    /// The next token, without consuming it.
    pub fn peek(&mut self) -> &Token {
        let token = match self.lookahead.take() {
            Some(token) => token,
            None => self.scan_token(),
        };
        self.lookahead.insert(token)
    }

    /// Consumes and returns the next token. The EOF token is never consumed,
    /// so every call after the end of input returns it again.
    pub fn next(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::EOF {
            self.lookahead = None;
        }
        token
    }

    /// Scans a token straight from the input, bypassing the lookahead buffer.
    ///
    /// Fails once the EOF token has been produced.
    pub fn scan(&mut self) -> Result<Token, Error> {
        if self.finished {
            return Err(Error::new(ErrorImpl::AlreadyAtEnd, self.position()));
        }
        Ok(self.scan_token())
    }

    /// Line and column of the next unread character. Columns count
    /// characters, not bytes.
    pub fn position(&self) -> Position {
        let column = self.source[self.line_start..self.pos].chars().count();
        Position::new(self.line, column as u32 + 1)
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    fn skip_whitespace(&mut self) {
        let skipped = self
            .remainder()
            .bytes()
            .take_while(|b| matches!(b, b' ' | b'\t' | b'\r'))
            .count();
        self.advance_n(skipped);
    }

    fn skip_line(&mut self) {
        let skipped = self.remainder().find('\n').unwrap_or(self.remainder().len());
        self.advance_n(skipped);
    }

    fn scan_token(&mut self) -> Token {
        self.skip_whitespace();
        let position = self.position();

        if self.at_eof() {
            self.finished = true;
            return MK_TOKEN!(TokenKind::EOF, String::new(), position);
        }

        if let Some(word) = IDENTIFIER_PATTERN.find(self.remainder()) {
            let word = word.as_str().to_string();
            let kind = KEYWORDS
                .find(&word)
                .copied()
                .unwrap_or(TokenKind::Identifier);
            self.advance_n(word.len());
            return MK_TOKEN!(kind, word, position);
        }

        if let Some(number) = NUMBER_PATTERN.find(self.remainder()) {
            let number = number.as_str().to_string();
            let kind = if number.contains('.') {
                TokenKind::RealLiteral
            } else {
                TokenKind::IntegerLiteral
            };
            self.advance_n(number.len());
            return MK_TOKEN!(kind, number, position);
        }

        if self.remainder().starts_with('\n') {
            self.advance_n(1);
            self.line += 1;
            self.line_start = self.pos;
            return MK_TOKEN!(TokenKind::Newline, String::from("\n"), position);
        }

        match self.longest_operator() {
            Some((TokenKind::Comment, _)) => {
                trace!("skipping comment at {}", position);
                self.skip_line();
                self.scan_token()
            }
            Some((kind, length)) => {
                let value = self.remainder()[..length].to_string();
                self.advance_n(length);
                MK_TOKEN!(kind, value, position)
            }
            None => {
                let length = self.remainder().chars().next().map_or(1, char::len_utf8);
                let value = self.remainder()[..length].to_string();
                self.advance_n(length);
                MK_TOKEN!(TokenKind::Illegal, value, position)
            }
        }
    }

    /// Longest operator at the current position: its kind and byte length.
    fn longest_operator(&self) -> Option<(TokenKind, usize)> {
        let mut cursor = OPERATORS.head();
        let mut matched = None;
        let mut length = 0;

        for c in self.remainder().chars() {
            cursor.next(c);
            if !cursor.valid() {
                break;
            }
            length += c.len_utf8();
            if let Some(kind) = cursor.value() {
                matched = Some((*kind, length));
            }
        }

        matched
    }
}

/// Drains a fresh lexer over `source`, up to and including the EOF token.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = vec![];

    loop {
        let token = lexer.next();
        let at_end = token.kind == TokenKind::EOF;
        tokens.push(token);
        if at_end {
            return tokens;
        }
    }
}
