use std::fmt;
use std::io::{self, Stdout, Write};

use log::warn;
use serde::Serialize;
use thg_common::Literal;

use crate::oracle::{OracleContext, OracleSummary};

/// A check that did not hold on a given cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure {
    /// Flattened signal path
    pub path: String,
    /// Cycle on which the comparison was made (first cycle is 1)
    pub cycle: u64,
    pub expected: Literal,
    /// Observed value, `None` when the path could not be read
    pub actual: Option<Literal>,
    pub tolerance: f64,
    pub filter: Option<String>,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (cycle {}): expected {}", self.path, self.cycle, self.expected)?;
        match &self.actual {
            Some(actual) => write!(f, ", got {}", actual)?,
            None => write!(f, ", path not readable")?,
        }
        if self.tolerance != 0.0 {
            write!(f, ", tolerance {}", self.tolerance)?;
        }
        if let Some(filter) = &self.filter {
            write!(f, ", filter {}", filter)?;
        }
        Ok(())
    }
}

/// Recoverable conditions worth surfacing to whoever runs the test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A checked path could not be read from the system under test
    UnknownPath { path: String, cycle: u64 },
    /// Cancellation of a path with no active check
    StaleUncheck { path: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownPath { path, cycle } => {
                write!(f, "{}: unknown path (cycle {})", path, cycle)
            }
            Diagnostic::StaleUncheck { path } => write!(f, "{}: uncheck without active check", path),
        }
    }
}

/// Side channel for failures and diagnostics.
///
/// Reporting never aborts the test: the oracle keeps evaluating whatever
/// the reporter does.
pub trait FailureReporter {
    fn report_failure(&mut self, context: &OracleContext, failure: &Failure);

    fn report_diagnostic(&mut self, context: &OracleContext, diagnostic: &Diagnostic);

    /// Called once by [`CheckOracle::close`](crate::CheckOracle::close).
    fn report_summary(&mut self, _context: &OracleContext, _summary: &OracleSummary) {}
}

/// Reporter printing one line per event.
///
/// Writes to stdout by default; any writer can be supplied instead.
pub struct ConsoleReporter<W: Write = Stdout> {
    out: W,
}

impl ConsoleReporter<Stdout> {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for ConsoleReporter<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{}", args) {
            warn!("Failed to write report line: {}", e);
        }
    }
}

impl<W: Write> FailureReporter for ConsoleReporter<W> {
    fn report_failure(&mut self, context: &OracleContext, failure: &Failure) {
        self.line(format_args!(
            "{}/{}: test failed: {}",
            context.operator, context.procedure, failure
        ));
    }

    fn report_diagnostic(&mut self, context: &OracleContext, diagnostic: &Diagnostic) {
        self.line(format_args!(
            "{}/{}: warning: {}",
            context.operator, context.procedure, diagnostic
        ));
    }

    fn report_summary(&mut self, context: &OracleContext, summary: &OracleSummary) {
        let status = if summary.passed() { "passed" } else { "FAILED" };
        self.line(format_args!(
            "{}/{}: {} ({} failure(s) in {} cycle(s))",
            context.operator, context.procedure, status, summary.failures, summary.cycles
        ));
    }
}

/// Reporter discarding everything; the oracle's failure log is still kept.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl FailureReporter for NullReporter {
    fn report_failure(&mut self, _context: &OracleContext, _failure: &Failure) {}

    fn report_diagnostic(&mut self, _context: &OracleContext, _diagnostic: &Diagnostic) {}
}
