//! A recursive descent parser for the expressions that appear in the fields of a definition
//! file, such as `kilogram * meter / second^2` or `1.602176634 * 10^-19`.

pub mod error;
pub mod expr;

use measure_error::{Error, ErrorKind};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// A parser over the tokens of a single field.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// Tokens of the field, including whitespace.
    tokens: Box<[Token<'source>]>,

    /// Index of the token the parser will look at next.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Tokenizes a field and starts parsing at its first token.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source if the cursor
    /// is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current non-whitespace token, or the end of the source if there
    /// is none.
    pub fn span(&self) -> Range<usize> {
        self.peek()
            .map_or_else(|| self.eof_span(), |token| token.span.clone())
    }

    /// Returns the next non-whitespace token without moving the cursor.
    pub fn peek(&self) -> Option<&Token<'source>> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
    }

    /// Returns the kind of the next non-whitespace token without moving the cursor.
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|token| token.kind)
    }

    /// Returns the token immediately at the cursor, including whitespace, without moving the
    /// cursor.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Consumes and returns the next non-whitespace token.
    ///
    /// At the end of the field, returns [`error::UnexpectedEof`] describing what was `expected`.
    pub fn next_token(&mut self, expected: &'static str) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if !token.is_whitespace() {
                return Ok(token.clone());
            }
        }

        Err(self.error(error::UnexpectedEof { expected }))
    }

    /// Consumes the next token if it has the given kind, returning it. Otherwise, the cursor is
    /// left unchanged and an error describing `expected` is returned.
    pub fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<Token<'source>, Error> {
        self.try_parse_with_fn(|input| {
            let token = input.next_token(expected)?;
            if token.kind == kind {
                Ok(token)
            } else {
                Err(Error::new(vec![token.span], error::UnexpectedToken {
                    expected,
                    found: token.lexeme.to_owned(),
                }))
            }
        })
    }

    /// Parses a `T`, rewinding the cursor to where it was if parsing fails.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Runs `f` on this parser, rewinding the cursor to where it was if `f` fails.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Parses a `T` that must span the whole field. Leftover tokens produce
    /// [`error::ExpectedEof`] pointing at the first of them.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        if self.peek().is_none() {
            Ok(value)
        } else {
            Err(self.error(error::ExpectedEof))
        }
    }
}

/// A node of a field expression.
pub trait Parse: Sized {
    /// Parses the node starting at the cursor. The cursor may be left anywhere on failure; use
    /// [`Parser::try_parse`] to rewind it.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}
