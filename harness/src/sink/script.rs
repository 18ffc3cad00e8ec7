use std::io::Write;

use log::trace;
use thg_common::config::{banner, ROOT_INSTANCE, RUNTIME_INSTANCE};

use super::StatementSink;
use crate::config::HarnessConfig;
use crate::error::{HarnessError, Result};
use crate::statement::Statement;

/// Names written in the preamble of a generated script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptHeader {
    /// Module exposing the generated operator class
    pub module: String,
    /// Class of the operator under test
    pub class: String,
    /// Runtime class as `module.Class`
    pub runtime_class: String,
    /// Operator path passed to the runtime, for reports
    pub operator: String,
    pub procedure: String,
}

impl ScriptHeader {
    /// Header for `operator_name`, the class name being its capitalized form.
    /// Without a configured module, the module is the lower-cased operator name.
    pub fn new(config: &HarnessConfig, operator_name: &str, operator: &str, procedure: &str) -> Self {
        Self {
            module: config.module_or(operator_name),
            class: class_name(operator_name),
            runtime_class: config.runtime_class.clone(),
            operator: operator.to_owned(),
            procedure: procedure.to_owned(),
        }
    }

    fn runtime_import(&self) -> Result<(&str, &str)> {
        match self.runtime_class.rsplit_once('.') {
            Some((module, class)) if !module.is_empty() && !class.is_empty() => Ok((module, class)),
            _ => Err(HarnessError::InvalidRuntimeClass(self.runtime_class.clone())),
        }
    }
}

/// Operator name with its first letter upper-cased.
pub fn class_name(operator_name: &str) -> String {
    let mut chars = operator_name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Sink rendering the statements as a test script.
///
/// The preamble is written by [`start`](Self::start), the closing lines by
/// [`finish`](Self::finish).
pub struct ScriptWriter<W: Write> {
    out: W,
    lines: usize,
}

impl<W: Write> ScriptWriter<W> {
    pub fn start(out: W, header: &ScriptHeader) -> Result<Self> {
        let (runtime_module, runtime_class) = header.runtime_import()?;

        let mut writer = Self { out, lines: 0 };
        writer.writeln(&format!("# generated by {}", banner()))?;
        writer.writeln("")?;
        writer.writeln(&format!("from {} import {}", header.module, header.class))?;
        writer.writeln(&format!(
            "from {} import {} as Thgrt",
            runtime_module, runtime_class
        ))?;
        writer.writeln("")?;
        writer.writeln("# instance of root operator")?;
        writer.writeln(&format!("{} = {}()", ROOT_INSTANCE, header.class))?;
        writer.writeln("")?;
        writer.writeln("# instance of Thgrt")?;
        writer.writeln(&format!(
            "{} = Thgrt({}, '{}', '{}')",
            RUNTIME_INSTANCE, ROOT_INSTANCE, header.operator, header.procedure
        ))?;
        writer.writeln("")?;
        Ok(writer)
    }

    /// Write the closing lines and hand the writer back.
    pub fn finish(mut self) -> Result<W> {
        self.writeln(&format!("{}.close()", RUNTIME_INSTANCE))?;
        self.writeln("# end of file")?;
        self.out.flush()?;
        Ok(self.out)
    }

    /// Lines written so far, preamble included.
    pub fn lines(&self) -> usize {
        self.lines
    }

    fn writeln(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text)?;
        self.lines += 1;
        Ok(())
    }
}

impl<W: Write> StatementSink for ScriptWriter<W> {
    fn emit(&mut self, statement: Statement) -> Result<()> {
        let line = statement.to_string();
        trace!("emit: {}", line);
        self.writeln(&line)
    }
}
