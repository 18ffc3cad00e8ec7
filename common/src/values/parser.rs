//! Hand-written recursive descent parser for scenario literals.
//!
//! ```text
//! value   := struct | array | literal
//! struct  := '{' field (',' field)* '}'
//! field   := name ':' value
//! array   := '(' value (',' value)* ')'
//! literal := any run of characters excluding whitespace and { } ( ) , :
//! ```

use log::trace;

use super::node::{RawValue, ValueNode};
use crate::config::MAX_VALUE_DEPTH;
use crate::error::{ParseError, ParseErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    LBrace,
    RBrace,
    LParen,
    RParen,
    Comma,
    Colon,
    Literal(&'a str),
}

impl Token<'_> {
    fn text(&self) -> &str {
        match self {
            Token::LBrace => "{",
            Token::RBrace => "}",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::Comma => ",",
            Token::Colon => ":",
            Token::Literal(text) => text,
        }
    }
}

fn is_delimiter(c: char) -> bool {
    matches!(c, '{' | '}' | '(' | ')' | ',' | ':')
}

fn delimiter_token<'a>(c: char) -> Option<Token<'a>> {
    Some(match c {
        '{' => Token::LBrace,
        '}' => Token::RBrace,
        '(' => Token::LParen,
        ')' => Token::RParen,
        ',' => Token::Comma,
        ':' => Token::Colon,
        _ => return None,
    })
}

// Split the text into tokens paired with their byte offset
fn tokenize(text: &str) -> Vec<(Token<'_>, usize)> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(offset, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        if let Some(token) = delimiter_token(c) {
            tokens.push((token, offset));
            chars.next();
            continue;
        }

        let mut end = text.len();
        while let Some(&(position, c)) = chars.peek() {
            if c.is_whitespace() || is_delimiter(c) {
                end = position;
                break;
            }
            chars.next();
        }
        tokens.push((Token::Literal(&text[offset..end]), offset));
    }

    tokens
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

struct Parser<'a> {
    text: &'a str,
    tokens: Vec<(Token<'a>, usize)>,
    pos: usize,
    // Groups currently open, including those of an enclosing raw value
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, depth: usize) -> Self {
        Self {
            text,
            tokens: tokenize(text),
            pos: 0,
            depth,
        }
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).map(|(token, _)| *token)
    }

    fn advance(&mut self) -> Option<Token<'a>> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    // Byte offset of the current token, end of text once exhausted
    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|(_, offset)| *offset)
            .unwrap_or(self.text.len())
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.text, self.offset())
    }

    fn unexpected(&self, found: Token<'_>, expected: &'static str) -> ParseError {
        self.error(ParseErrorKind::UnexpectedToken {
            found: found.text().to_owned(),
            expected,
        })
    }

    fn expect(&mut self, expected: Token<'_>, description: &'static str) -> Result<(), ParseError> {
        match self.peek() {
            Some(token) if token == expected => {
                self.advance();
                Ok(())
            }
            Some(token) => Err(self.unexpected(token, description)),
            None => Err(self.error(ParseErrorKind::UnexpectedEnd {
                expected: description,
            })),
        }
    }

    fn parse_document(&mut self) -> Result<ValueNode, ParseError> {
        if self.at_end() {
            return Err(self.error(ParseErrorKind::Empty));
        }

        let value = self.parse_value()?;
        if !self.at_end() {
            let rest = self.text[self.offset()..].trim_end().to_owned();
            return Err(self.error(ParseErrorKind::TrailingInput(rest)));
        }
        Ok(value)
    }

    fn parse_value(&mut self) -> Result<ValueNode, ParseError> {
        match self.peek() {
            Some(Token::LBrace) => {
                self.enter()?;
                self.advance();
                let value = self.parse_struct();
                self.depth -= 1;
                value
            }
            Some(Token::LParen) => {
                self.enter()?;
                self.advance();
                let value = self.parse_array();
                self.depth -= 1;
                value
            }
            Some(Token::Literal(text)) => {
                self.advance();
                Ok(ValueNode::scalar(text))
            }
            Some(token) => Err(self.unexpected(token, "a value")),
            None => Err(self.error(ParseErrorKind::UnexpectedEnd {
                expected: "a value",
            })),
        }
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_VALUE_DEPTH {
            return Err(self.error(ParseErrorKind::TooDeep(MAX_VALUE_DEPTH)));
        }
        self.depth += 1;
        Ok(())
    }

    // Opening '(' already consumed
    fn parse_array(&mut self) -> Result<ValueNode, ParseError> {
        if self.peek() == Some(Token::RParen) {
            return Err(self.error(ParseErrorKind::EmptyGroup("()")));
        }

        let mut values = Vec::new();
        loop {
            values.push(self.parse_value()?);
            match self.peek() {
                Some(Token::Comma) => {
                    self.advance();
                }
                Some(Token::RParen) => {
                    self.advance();
                    break;
                }
                Some(token) => return Err(self.unexpected(token, "',' or ')'")),
                None => {
                    return Err(self.error(ParseErrorKind::UnexpectedEnd { expected: "')'" }))
                }
            }
        }

        Ok(ValueNode::Sequence(values))
    }

    // Opening '{' already consumed
    fn parse_struct(&mut self) -> Result<ValueNode, ParseError> {
        if self.peek() == Some(Token::RBrace) {
            return Err(self.error(ParseErrorKind::EmptyGroup("{}")));
        }

        let mut fields = Vec::new();
        loop {
            let name = self.parse_field_name()?;
            self.expect(Token::Colon, "':'")?;
            let value = self.parse_value()?;
            fields.push((name, value));

            match self.peek() {
                Some(Token::Comma) => {
                    self.advance();
                }
                Some(Token::RBrace) => {
                    self.advance();
                    break;
                }
                Some(token) => return Err(self.unexpected(token, "',' or '}'")),
                None => {
                    return Err(self.error(ParseErrorKind::UnexpectedEnd { expected: "'}'" }))
                }
            }
        }

        Ok(ValueNode::structure(fields))
    }

    fn parse_field_name(&mut self) -> Result<String, ParseError> {
        match self.peek() {
            Some(Token::Literal(name)) if is_identifier(name) => {
                self.advance();
                Ok(name.to_owned())
            }
            Some(Token::Literal(name)) => {
                Err(self.error(ParseErrorKind::InvalidFieldName(name.to_owned())))
            }
            Some(token) => Err(self.unexpected(token, "a field name")),
            None => Err(self.error(ParseErrorKind::UnexpectedEnd {
                expected: "a field name",
            })),
        }
    }
}

/// Parse a scenario literal.
///
/// A bare literal needs no enclosing group. Whitespace between tokens is
/// ignored. Malformed text fails as a whole, nothing is recovered, and so
/// does text nesting more than [`MAX_VALUE_DEPTH`] groups.
pub fn parse_value(text: &str) -> Result<ValueNode, ParseError> {
    trace!("parse value '{}'", text);
    Parser::new(text, 0).parse_document()
}

/// Parse a pre-structured value.
///
/// Lists and maps map directly to sequences and structures; each leaf
/// string still goes through [`parse_value`].
pub fn parse_raw(raw: &RawValue) -> Result<ValueNode, ParseError> {
    parse_raw_at(raw, 0)
}

fn parse_raw_at(raw: &RawValue, depth: usize) -> Result<ValueNode, ParseError> {
    if matches!(raw, RawValue::List(_) | RawValue::Map(_)) && depth >= MAX_VALUE_DEPTH {
        return Err(ParseError::new(ParseErrorKind::TooDeep(MAX_VALUE_DEPTH), "", 0));
    }

    match raw {
        RawValue::List(values) => values
            .iter()
            .map(|value| parse_raw_at(value, depth + 1))
            .collect::<Result<Vec<_>, _>>()
            .map(ValueNode::Sequence),
        RawValue::Map(fields) => {
            let mut parsed = Vec::with_capacity(fields.len());
            for (name, value) in fields {
                parsed.push((name.clone(), parse_raw_at(value, depth + 1)?));
            }
            Ok(ValueNode::structure(parsed))
        }
        RawValue::Text(text) => Parser::new(text, depth).parse_document(),
        scalar => {
            // Bool and numbers always have a text form
            let text = scalar.scalar_text().unwrap_or_default();
            Parser::new(&text, depth).parse_document()
        }
    }
}
