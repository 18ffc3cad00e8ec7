use std::fmt;

use strum::Display;
use thg_common::RawValue;

use crate::error::Result;

/// Position of a directive in its scenario source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Location {
    pub line: u32,
    pub col: u32,
}

impl Location {
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// Problem found while handling a directive that does not stop processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessDiagnostic {
    pub location: Location,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for HarnessDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.location, self.severity, self.message)
    }
}

/// Callbacks invoked for each directive of a scenario, in order.
///
/// Paths are scenario paths (`P::Main/v`) or aliases. Values are literal
/// text or pre-structured lists and maps. Option arguments are raw scenario
/// text, empty when absent.
pub trait ScenarioHandler {
    fn on_cycle(&mut self, location: Location, number: &str) -> Result<()>;

    fn on_comment(&mut self, location: Location, text: &str) -> Result<()>;

    fn on_set_tol(&mut self, location: Location, path: &str, int_tol: &str, real_tol: &str) -> Result<()>;

    fn on_set(&mut self, location: Location, path: &str, value: &RawValue) -> Result<()>;

    #[allow(clippy::too_many_arguments)]
    fn on_check(
        &mut self,
        location: Location,
        path: &str,
        value: &RawValue,
        sustain: &str,
        int_tol: &str,
        real_tol: &str,
        filter: &str,
    ) -> Result<()>;

    fn on_uncheck(&mut self, location: Location, path: &str) -> Result<()>;

    fn on_set_or_check(&mut self, location: Location, path: &str, value: &RawValue) -> Result<()>;

    fn on_alias(&mut self, location: Location, alias: &str, path: &str) -> Result<()>;

    fn on_alias_value(&mut self, location: Location, alias: &str, value: &RawValue) -> Result<()>;

    fn on_notify(&mut self, location: Location, message: &str) -> Result<()>;

    fn on_error(&mut self, location: Location, message: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = HarnessDiagnostic {
            location: Location::new(12, 46),
            severity: Severity::Error,
            message: "P::Main/x: not an input or output".to_string(),
        };
        assert_eq!(
            diagnostic.to_string(),
            "12:46: error: P::Main/x: not an input or output"
        );
    }
}
