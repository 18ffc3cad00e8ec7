//! Check oracle for cycle-based tests.
//!
//! The oracle keeps one [`Check`] per signal path under expectation. Each
//! call to [`CheckOracle::advance`] drives the [`SystemUnderTest`] forward
//! one cycle at a time, compares every active check against the value read
//! back, records mismatches as [`Failure`]s and expires checks whose sustain
//! window is over.
//!
//! ```rust,ignore
//! use thg_runtime::{CheckOracle, MemorySystem};
//!
//! let sut = MemorySystem::new().with_step(|signals| { /* compute outputs */ });
//! let mut oracle = CheckOracle::new(sut, "Main", "P1");
//! oracle.register_check("o", 2.into(), 4, 1.0, None);
//! oracle.advance(5);
//! let summary = oracle.close();
//! assert!(summary.passed());
//! ```

mod check;
mod memory;
mod oracle;
mod report;
mod sut;

pub use check::Check;
pub use memory::MemorySystem;
pub use oracle::{CheckOracle, OracleContext, OracleSummary};
pub use report::{ConsoleReporter, Diagnostic, Failure, FailureReporter, NullReporter};
pub use sut::SystemUnderTest;

pub use thg_common::Literal;
