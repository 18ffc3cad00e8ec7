use thiserror::Error;

/// Why a scenario literal could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("Empty value")]
    Empty,

    #[error("Unexpected end of value, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("Unexpected '{found}', expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: &'static str,
    },

    #[error("Empty group '{0}'")]
    EmptyGroup(&'static str),

    #[error("Invalid field name '{0}'")]
    InvalidFieldName(String),

    #[error("Unexpected trailing input '{0}'")]
    TrailingInput(String),

    #[error("Value nested deeper than {0} groups")]
    TooDeep(usize),
}

/// Malformed literal text.
///
/// Carries the complete offending text and the byte offset where parsing
/// stopped. No partial tree is ever returned alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at offset {offset} in '{text}'")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub text: String,
    pub offset: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, text: &str, offset: usize) -> Self {
        Self {
            kind,
            text: text.to_owned(),
            offset,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToleranceError {
    #[error("Invalid tolerance '{0}'")]
    Invalid(String),

    #[error("Tolerance '{0}' is not a finite number")]
    NotFinite(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SustainError {
    #[error("Invalid sustain '{0}': expected a cycle count or 'forever'")]
    Invalid(String),
}
