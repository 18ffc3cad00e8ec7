//! Scenario driver of the test harness.
//!
//! A [`Harness`] receives scenario directives through the
//! [`ScenarioHandler`] callbacks, resolves signal paths through a
//! [`SignalDirectory`], flattens the values and emits one [`Statement`] per
//! leaf into a [`StatementSink`]:
//!
//! - [`ScriptWriter`] renders a test script, [`ScriptSet`] manages the
//!   scripts of a whole procedure
//! - [`LiveExecutor`] runs the statements against a system under test
//!   through a [`thg_runtime::CheckOracle`]
//!
//! Recorded scenarios are loaded with [`parse_scenario`] and fed to any
//! handler with [`replay`].

mod de;

pub mod config;
pub mod directory;
pub mod driver;
pub mod error;
pub mod handler;
pub mod replay;
pub mod script_set;
pub mod sink;
pub mod statement;
pub mod tolerance;

pub use config::HarnessConfig;
pub use directory::{SignalDirectory, SignalKind, StaticDirectory};
pub use driver::Harness;
pub use error::HarnessError;
pub use handler::{HarnessDiagnostic, Location, ScenarioHandler, Severity};
pub use replay::{parse_scenario, parse_scenario_file, replay, Directive, ReplayReport, Scenario};
pub use script_set::ScriptSet;
pub use sink::{LiveExecutor, ScriptHeader, ScriptWriter, StatementSink};
pub use statement::Statement;
pub use tolerance::ToleranceTable;
