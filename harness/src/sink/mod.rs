//! Destinations of the statements produced by the driver.
//!
//! - [`ScriptWriter`]: renders a test script, one line per statement
//! - [`LiveExecutor`]: applies statements to a check oracle right away
//! - `Vec<Statement>`: collects them

mod live;
mod script;

pub use live::LiveExecutor;
pub use script::{ScriptHeader, ScriptWriter};

use crate::error::Result;
use crate::statement::Statement;

pub trait StatementSink {
    fn emit(&mut self, statement: Statement) -> Result<()>;
}

impl<T: StatementSink + ?Sized> StatementSink for &mut T {
    fn emit(&mut self, statement: Statement) -> Result<()> {
        (**self).emit(statement)
    }
}

impl StatementSink for Vec<Statement> {
    fn emit(&mut self, statement: Statement) -> Result<()> {
        self.push(statement);
        Ok(())
    }
}
