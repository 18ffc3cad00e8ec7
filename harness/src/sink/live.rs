use log::debug;
use thg_common::config::DEFAULT_TOLERANCE;
use thg_common::Literal;
use thg_runtime::{CheckOracle, ConsoleReporter, FailureReporter, OracleSummary, SystemUnderTest};

use super::StatementSink;
use crate::error::Result;
use crate::statement::Statement;

/// Sink running the statements against a system under test.
pub struct LiveExecutor<S: SystemUnderTest, R: FailureReporter = ConsoleReporter> {
    oracle: CheckOracle<S, R>,
}

impl<S: SystemUnderTest> LiveExecutor<S, ConsoleReporter> {
    pub fn new(sut: S, operator: &str, procedure: &str) -> Self {
        Self::from_oracle(CheckOracle::new(sut, operator, procedure))
    }
}

impl<S: SystemUnderTest, R: FailureReporter> LiveExecutor<S, R> {
    pub fn from_oracle(oracle: CheckOracle<S, R>) -> Self {
        Self { oracle }
    }

    pub fn oracle(&self) -> &CheckOracle<S, R> {
        &self.oracle
    }

    pub fn oracle_mut(&mut self) -> &mut CheckOracle<S, R> {
        &mut self.oracle
    }

    pub fn close(&mut self) -> OracleSummary {
        self.oracle.close()
    }

    pub fn into_oracle(self) -> CheckOracle<S, R> {
        self.oracle
    }
}

impl<S: SystemUnderTest, R: FailureReporter> StatementSink for LiveExecutor<S, R> {
    fn emit(&mut self, statement: Statement) -> Result<()> {
        match statement {
            Statement::Set { path, literal } => {
                // Unknown paths are reported by the oracle
                self.oracle.set(&path, Literal::from_text(&literal));
            }
            Statement::Check {
                path,
                literal,
                sustain,
                tolerance,
                filter,
            } => {
                self.oracle.register_check(
                    path,
                    Literal::from_text(&literal),
                    sustain,
                    tolerance.unwrap_or(DEFAULT_TOLERANCE),
                    filter,
                );
            }
            Statement::Uncheck { path } => {
                self.oracle.cancel_check(&path);
            }
            Statement::Cycle(cycles) => self.oracle.advance(cycles),
            Statement::Comment(text) => debug!("{}", text),
        }
        Ok(())
    }
}
