use std::fmt;

use serde::{Deserialize, Serialize};

/// Native value of a signal or of a check expectation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Literal {
    /// Resolve normalized literal text into a native value.
    ///
    /// `True` / `False` are booleans, integer text is an `Int`, anything
    /// `f64` accepts (including `nan`, `inf`, `-inf`) is a `Float`, the rest
    /// is kept verbatim as `Text` (quotes included).
    pub fn from_text(text: &str) -> Self {
        match text {
            "True" => return Literal::Bool(true),
            "False" => return Literal::Bool(false),
            _ => {}
        }

        if let Ok(value) = text.parse::<i64>() {
            return Literal::Int(value);
        }
        if let Ok(value) = text.parse::<f64>() {
            return Literal::Float(value);
        }

        Literal::Text(text.to_owned())
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Literal::Int(_) | Literal::Float(_))
    }

    /// Numeric view of the value, `None` for booleans and text.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Literal::Int(value) => Some(*value as f64),
            Literal::Float(value) => Some(*value),
            Literal::Bool(_) | Literal::Text(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Literal::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(true) => write!(f, "True"),
            Literal::Bool(false) => write!(f, "False"),
            Literal::Int(value) => write!(f, "{}", value),
            Literal::Float(value) => write!(f, "{:?}", value),
            Literal::Text(value) => write!(f, "{}", value),
        }
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Int(value as i64)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Text(value.to_owned())
    }
}
