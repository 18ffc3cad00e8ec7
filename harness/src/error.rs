use thg_common::{ParseError, SustainError, ToleranceError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Invalid value: {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error(transparent)]
    Sustain(#[from] SustainError),

    #[error("Invalid cycle count '{0}'")]
    InvalidCycleCount(String),

    #[error("Invalid runtime class '{0}': expected 'module.Class'")]
    InvalidRuntimeClass(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Statement rejected: {0}")]
    Sink(String),
}

pub type Result<T> = std::result::Result<T, HarnessError>;
