use measure_error::Error;
use std::ops::Range;
use super::{error, Parse, Parser};
use crate::tokenizer::TokenKind;

/// A product or quotient of terms, such as `kilogram * meter / second^2`.
///
/// Operators are left-associative and all have the same precedence, so `a / b * c` is
/// `(a / b) * c`.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    /// The first term.
    pub first: Term,

    /// The remaining terms, each with the operator that precedes it.
    pub rest: Vec<(Op, Term)>,

    /// The region of the source that this expression was parsed from.
    pub span: Range<usize>,
}

impl Expr {
    /// Returns an iterator over every term, with the sign of its exponent: `1.0` for terms in
    /// the numerator and `-1.0` for terms in the denominator.
    pub fn signed_terms(&self) -> impl Iterator<Item = (f64, &Term)> {
        std::iter::once((1.0, &self.first))
            .chain(self.rest.iter().map(|(op, term)| (op.sign(), term)))
    }

    /// Returns the name if the expression is a lone name with no exponent.
    pub fn as_name(&self) -> Option<&Name> {
        match (&self.first.atom, &self.first.exponent, self.rest.is_empty()) {
            (Atom::Name(name), None, true) => Some(name),
            _ => None,
        }
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let first = input.try_parse::<Term>()?;
        let mut span = first.span.clone();
        let mut rest = Vec::new();

        while let Some(op) = input.peek_kind().and_then(Op::from_token) {
            input.next_token("an operator")?;
            let term = input.try_parse::<Term>()?;
            span.end = term.span.end;
            rest.push((op, term));
        }

        Ok(Self { first, rest, span })
    }
}

/// A multiplication or division operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Mul,
    Div,
}

impl Op {
    fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Mul => Some(Self::Mul),
            TokenKind::Div => Some(Self::Div),
            _ => None,
        }
    }

    /// Returns `1.0` for multiplication and `-1.0` for division.
    pub fn sign(self) -> f64 {
        match self {
            Self::Mul => 1.0,
            Self::Div => -1.0,
        }
    }
}

/// An atom raised to an optional exponent, such as `second^2`.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    /// The base of the term.
    pub atom: Atom,

    /// The exponent, if one was written.
    pub exponent: Option<Number>,

    /// The region of the source that this term was parsed from.
    pub span: Range<usize>,
}

impl Term {
    /// Returns the exponent of the term, `1.0` if none was written.
    pub fn power(&self) -> f64 {
        self.exponent.as_ref().map_or(1.0, |exponent| exponent.value)
    }
}

impl Parse for Term {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let atom = input.try_parse::<Atom>()?;
        let mut span = atom.span();

        let exponent = if input.peek_kind() == Some(TokenKind::Exp) {
            input.next_token("`^`")?;
            let exponent = input.try_parse_with_fn(parse_exponent)?;
            span.end = exponent.span.end;
            Some(exponent)
        } else {
            None
        };

        Ok(Self { atom, exponent, span })
    }
}

/// Parses an exponent: a signed number, or a signed fraction in parentheses such as `(-1/2)`.
fn parse_exponent(input: &mut Parser) -> Result<Number, Error> {
    if input.peek_kind() != Some(TokenKind::OpenParen) {
        return input.try_parse::<Number>();
    }

    let open = input.expect(TokenKind::OpenParen, "`(`")?;
    let numerator = input.try_parse::<Number>()?;
    let value = if input.peek_kind() == Some(TokenKind::Div) {
        input.next_token("`/`")?;
        let denominator = input.try_parse::<Number>()?;
        numerator.value / denominator.value
    } else {
        numerator.value
    };
    let close = input.expect(TokenKind::CloseParen, "`)`")
        .map_err(|_| Error::new(vec![open.span.clone()], error::UnclosedParenthesis))?;

    Ok(Number { value, span: open.span.start..close.span.end })
}

/// The base of a [`Term`].
#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    /// The name of a dimension or units. Names may contain spaces, like `newton degree`.
    Name(Name),

    /// A numeric literal.
    Number(Number),

    /// A parenthesized expression.
    Paren(Paren),
}

impl Atom {
    /// Returns the span of the atom.
    pub fn span(&self) -> Range<usize> {
        match self {
            Self::Name(name) => name.span.clone(),
            Self::Number(number) => number.span.clone(),
            Self::Paren(paren) => paren.span.clone(),
        }
    }
}

impl Parse for Atom {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        match input.peek_kind() {
            Some(TokenKind::Name) => input.try_parse().map(Self::Name),
            Some(TokenKind::OpenParen) => input.try_parse().map(Self::Paren),
            Some(TokenKind::Number | TokenKind::Sub | TokenKind::Add) => input.try_parse().map(Self::Number),
            Some(_) => {
                let token = input.next_token("a name or number")?;
                Err(Error::new(vec![token.span], error::UnexpectedToken {
                    expected: "a name or number",
                    found: token.lexeme.to_owned(),
                }))
            },
            None => Err(input.error(error::UnexpectedEof { expected: "a name or number" })),
        }
    }
}

/// A name made of one or more words separated by whitespace.
#[derive(Debug, Clone, PartialEq)]
pub struct Name {
    /// The words of the name, joined by single spaces.
    pub name: String,

    /// The region of the source that this name was parsed from.
    pub span: Range<usize>,
}

impl Name {
    /// Returns the words of the name.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.name.split(' ')
    }
}

impl Parse for Name {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let first = input.expect(TokenKind::Name, "a name")?;
        let mut words = vec![first.lexeme];
        let mut span = first.span;

        while input.peek_kind() == Some(TokenKind::Name) {
            let word = input.next_token("a name")?;
            words.push(word.lexeme);
            span.end = word.span.end;
        }

        Ok(Self { name: words.join(" "), span })
    }
}

/// A numeric literal with an optional sign.
#[derive(Debug, Clone, PartialEq)]
pub struct Number {
    /// The value of the literal.
    pub value: f64,

    /// The region of the source that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for Number {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let (sign, start) = match input.peek_kind() {
            Some(TokenKind::Sub) => (-1.0, Some(input.next_token("`-`")?.span.start)),
            Some(TokenKind::Add) => (1.0, Some(input.next_token("`+`")?.span.start)),
            _ => (1.0, None),
        };

        let token = input.expect(TokenKind::Number, "a number")?;
        let value = token.lexeme
            .parse::<f64>()
            .map_err(|_| Error::new(vec![token.span.clone()], error::InvalidNumber {
                lexeme: token.lexeme.to_owned(),
            }))?;

        Ok(Self {
            value: sign * value,
            span: start.unwrap_or(token.span.start)..token.span.end,
        })
    }
}

/// A parenthesized expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source that this expression was parsed from, including parentheses.
    pub span: Range<usize>,
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open_paren = input.expect(TokenKind::OpenParen, "`(`")?;
        let expr = input.try_parse::<Expr>()?;
        let close_paren = input.expect(TokenKind::CloseParen, "`)`")
            .map_err(|_| Error::new(vec![open_paren.span.clone()], error::UnclosedParenthesis))?;
        Ok(Self {
            expr: Box::new(expr),
            span: open_paren.span.start..close_paren.span.end,
        })
    }
}
