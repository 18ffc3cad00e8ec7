use std::fmt;

use thg_common::config::{DEFAULT_SUSTAIN, ROOT_INSTANCE, RUNTIME_INSTANCE};

/// One action of a test procedure, on a flattened signal path.
///
/// `Display` renders the line of the generated script.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Assign an input
    Set { path: String, literal: String },
    /// Register an expectation
    Check {
        path: String,
        literal: String,
        sustain: i64,
        tolerance: Option<f64>,
        filter: Option<String>,
    },
    /// Cancel an expectation
    Uncheck { path: String },
    /// Run cycles
    Cycle(u64),
    /// Scenario comment, kept verbatim
    Comment(String),
}

impl Statement {
    pub fn set(path: impl Into<String>, literal: impl Into<String>) -> Self {
        Statement::Set {
            path: path.into(),
            literal: literal.into(),
        }
    }

    /// Check with default sustain, no tolerance and no filter.
    pub fn check(path: impl Into<String>, literal: impl Into<String>) -> Self {
        Statement::Check {
            path: path.into(),
            literal: literal.into(),
            sustain: DEFAULT_SUSTAIN,
            tolerance: None,
            filter: None,
        }
    }

    pub fn uncheck(path: impl Into<String>) -> Self {
        Statement::Uncheck { path: path.into() }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Set { path, literal } => {
                write!(f, "{}.{} = {}", ROOT_INSTANCE, path, literal)
            }
            Statement::Check {
                path,
                literal,
                sustain,
                tolerance,
                filter,
            } => {
                write!(f, "{}.check(\"{}\", {}", RUNTIME_INSTANCE, path, literal)?;
                if *sustain != DEFAULT_SUSTAIN {
                    write!(f, ", sustain={}", sustain)?;
                }
                if let Some(tolerance) = tolerance {
                    write!(f, ", tolerance={}", tolerance)?;
                }
                if let Some(filter) = filter {
                    write!(f, ", filter_={}", filter)?;
                }
                write!(f, ")")
            }
            Statement::Uncheck { path } => write!(f, "{}.uncheck(\"{}\")", RUNTIME_INSTANCE, path),
            Statement::Cycle(cycles) => write!(f, "{}.cycle({})", RUNTIME_INSTANCE, cycles),
            Statement::Comment(text) => write!(f, "{}", text),
        }
    }
}
