use indexmap::IndexMap;
use log::{debug, info, trace, warn};
use serde::Serialize;
use thg_common::config::SUSTAIN_FOREVER;
use thg_common::Literal;

use crate::check::Check;
use crate::report::{ConsoleReporter, Diagnostic, Failure, FailureReporter};
use crate::sut::SystemUnderTest;

/// Names of the operator and test procedure, used in reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OracleContext {
    pub operator: String,
    pub procedure: String,
}

impl OracleContext {
    pub fn new(operator: &str, procedure: &str) -> Self {
        Self {
            operator: operator.to_owned(),
            procedure: procedure.to_owned(),
        }
    }
}

/// State of the oracle when it is closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OracleSummary {
    /// Cycles run since creation
    pub cycles: u64,
    /// Failures recorded since creation
    pub failures: usize,
    /// Checks still active (unlimited sustain or window not over yet)
    pub active_checks: usize,
}

impl OracleSummary {
    pub fn passed(&self) -> bool {
        self.failures == 0
    }
}

/// Per-signal expectation tracker.
///
/// Single-threaded: callers serialize access. The oracle owns the system
/// under test for its whole lifetime and never outlives one test procedure.
pub struct CheckOracle<S: SystemUnderTest, R: FailureReporter = ConsoleReporter> {
    sut: S,
    reporter: R,
    context: OracleContext,
    // Evaluated in registration order
    checks: IndexMap<String, Check>,
    cycle: u64,
    failures: Vec<Failure>,
}

impl<S: SystemUnderTest> CheckOracle<S, ConsoleReporter> {
    /// Create an oracle reporting to stdout.
    pub fn new(sut: S, operator: &str, procedure: &str) -> Self {
        Self::with_reporter(sut, operator, procedure, ConsoleReporter::new())
    }
}

impl<S: SystemUnderTest, R: FailureReporter> CheckOracle<S, R> {
    pub fn with_reporter(sut: S, operator: &str, procedure: &str, reporter: R) -> Self {
        Self {
            sut,
            reporter,
            context: OracleContext::new(operator, procedure),
            checks: IndexMap::new(),
            cycle: 0,
            failures: Vec::new(),
        }
    }

    /// Register or replace the check on `path`.
    ///
    /// `sustain` is the number of cycles to check (`-1` until cancelled).
    /// Nothing is evaluated before the next [`advance`](Self::advance).
    pub fn register_check(
        &mut self,
        path: impl Into<String>,
        expected: Literal,
        sustain: i64,
        tolerance: f64,
        filter: Option<String>,
    ) {
        let path = path.into();

        let remaining = match sustain {
            0 => {
                // A record never lives with 0 cycles left
                debug!("Check on '{}' with sustain 0 ignored", path);
                self.checks.shift_remove(&path);
                return;
            }
            n if n < SUSTAIN_FOREVER => {
                warn!(
                    "Check on '{}' has sustain {}, treated as unlimited",
                    path, n
                );
                SUSTAIN_FOREVER
            }
            n => n,
        };

        if log::log_enabled!(log::Level::Debug) {
            debug!(
                "Register check '{}' == {} (sustain {}, tolerance {}, filter {:?})",
                path, expected, remaining, tolerance, filter
            );
        }

        let check = Check::new(expected, remaining, tolerance, filter);
        if self.checks.insert(path.clone(), check).is_some() {
            trace!("Check on '{}' replaced", path);
        }
    }

    /// Register a single-cycle exact check.
    pub fn check(&mut self, path: impl Into<String>, expected: impl Into<Literal>) {
        self.register_check(path, expected.into(), 1, 0.0, None);
    }

    /// Remove the check on `path`.
    ///
    /// An unknown path is not an error; it is reported as a diagnostic and
    /// `false` is returned.
    pub fn cancel_check(&mut self, path: &str) -> bool {
        if self.checks.shift_remove(path).is_some() {
            debug!("Check on '{}' cancelled", path);
            return true;
        }

        warn!("Uncheck of '{}' without active check", path);
        let diagnostic = Diagnostic::StaleUncheck {
            path: path.to_owned(),
        };
        self.reporter.report_diagnostic(&self.context, &diagnostic);
        false
    }

    /// Run `cycles` cycles, evaluating every active check after each one.
    pub fn advance(&mut self, cycles: u64) {
        if cycles == 0 {
            debug!("Advance of 0 cycles ignored");
            return;
        }

        for _ in 0..cycles {
            self.sut.call_cycle();
            self.cycle += 1;
            self.evaluate();
        }
    }

    // Compare all checks for the current cycle, then consume one cycle of sustain
    fn evaluate(&mut self) {
        let Self {
            sut,
            reporter,
            context,
            checks,
            cycle,
            failures,
        } = self;
        let cycle = *cycle;

        if log::log_enabled!(log::Level::Trace) {
            trace!("Cycle {}: {} active check(s)", cycle, checks.len());
        }

        checks.retain(|path, check| {
            let actual = sut.read(path);
            let passed = match &actual {
                Some(actual) => check.matches(actual),
                None => {
                    let diagnostic = Diagnostic::UnknownPath {
                        path: path.clone(),
                        cycle,
                    };
                    reporter.report_diagnostic(context, &diagnostic);
                    false
                }
            };

            if !passed {
                let failure = Failure {
                    path: path.clone(),
                    cycle,
                    expected: check.expected.clone(),
                    actual,
                    tolerance: check.tolerance,
                    filter: check.filter.clone(),
                };
                warn!("Check failed: {}", failure);
                reporter.report_failure(context, &failure);
                failures.push(failure);
            }

            let expired = check.tick();
            if expired {
                trace!("Check on '{}' expired", path);
            }
            !expired
        });
    }

    /// Finalization point of the procedure.
    ///
    /// Checks still active are left as they are; nothing fails on an empty
    /// oracle.
    pub fn close(&mut self) -> OracleSummary {
        let summary = OracleSummary {
            cycles: self.cycle,
            failures: self.failures.len(),
            active_checks: self.checks.len(),
        };
        info!(
            "{}/{} closed: {} failure(s) in {} cycle(s), {} check(s) still active",
            self.context.operator,
            self.context.procedure,
            summary.failures,
            summary.cycles,
            summary.active_checks
        );
        self.reporter.report_summary(&self.context, &summary);
        summary
    }

    /// Assign an input of the system under test.
    pub fn set(&mut self, path: &str, value: Literal) -> bool {
        let known = self.sut.write(path, value);
        if !known {
            warn!("Set of unknown path '{}'", path);
            let diagnostic = Diagnostic::UnknownPath {
                path: path.to_owned(),
                cycle: self.cycle,
            };
            self.reporter.report_diagnostic(&self.context, &diagnostic);
        }
        known
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Number of cycles run so far.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn active_checks(&self) -> &IndexMap<String, Check> {
        &self.checks
    }

    pub fn is_checked(&self, path: &str) -> bool {
        self.checks.contains_key(path)
    }

    pub fn context(&self) -> &OracleContext {
        &self.context
    }

    pub fn sut(&self) -> &S {
        &self.sut
    }

    pub fn sut_mut(&mut self) -> &mut S {
        &mut self.sut
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn into_parts(self) -> (S, R, Vec<Failure>) {
        (self.sut, self.reporter, self.failures)
    }
}
