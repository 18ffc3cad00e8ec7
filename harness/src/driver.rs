use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, error, trace, warn};
use thg_common::sustain::parse_sustain;
use thg_common::tolerance::parse_tolerance;
use thg_common::values::{escape_keyword, flatten_raw};
use thg_common::RawValue;

use crate::config::HarnessConfig;
use crate::directory::{SignalDirectory, SignalKind};
use crate::error::{HarnessError, Result};
use crate::handler::{HarnessDiagnostic, Location, ScenarioHandler, Severity};
use crate::sink::StatementSink;
use crate::statement::Statement;
use crate::tolerance::ToleranceTable;

/// Scenario driver: turns directives into statements for a sink.
pub struct Harness<D: SignalDirectory, S: StatementSink> {
    directory: D,
    sink: S,
    // alias -> scenario path
    aliases: IndexMap<String, String>,
    tolerances: ToleranceTable,
    // directive path -> flattened paths of its last check
    flattened_checks: HashMap<String, Vec<String>>,
    diagnostics: Vec<HarnessDiagnostic>,
}

impl<D: SignalDirectory, S: StatementSink> Harness<D, S> {
    pub fn new(directory: D, sink: S) -> Self {
        Self {
            directory,
            sink,
            aliases: IndexMap::new(),
            tolerances: ToleranceTable::new(),
            flattened_checks: HashMap::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Driver starting with the default tolerance of `config`.
    pub fn with_config(directory: D, sink: S, config: &HarnessConfig) -> Result<Self> {
        let mut harness = Self::new(directory, sink);
        harness.tolerances = ToleranceTable::with_default(config.default_tolerance()?);
        Ok(harness)
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn tolerances(&self) -> &ToleranceTable {
        &self.tolerances
    }

    pub fn diagnostics(&self) -> &[HarnessDiagnostic] {
        &self.diagnostics
    }

    fn report(&mut self, location: Location, severity: Severity, message: String) {
        let diagnostic = HarnessDiagnostic {
            location,
            severity,
            message,
        };
        match severity {
            Severity::Warning => warn!("{}", diagnostic),
            Severity::Error => error!("{}", diagnostic),
        }
        self.diagnostics.push(diagnostic);
    }

    fn unalias<'a>(&'a self, path: &'a str) -> &'a str {
        self.aliases.get(path).map(String::as_str).unwrap_or(path)
    }

    // Generated name of a scenario path or alias, keyword-escaped
    fn resolve(&mut self, location: Location, path: &str) -> String {
        let resolved = self
            .directory
            .name(self.unalias(path))
            .map(|name| escape_keyword(name).into_owned());
        match resolved {
            Some(name) => name,
            None => {
                self.report(location, Severity::Warning, format!("{}: unknown I/O", path));
                format!("<{}>", path)
            }
        }
    }
}

impl<D: SignalDirectory, S: StatementSink> ScenarioHandler for Harness<D, S> {
    fn on_cycle(&mut self, _location: Location, number: &str) -> Result<()> {
        let number = number.trim();
        let cycles = if number.is_empty() {
            1
        } else {
            number
                .parse()
                .map_err(|_| HarnessError::InvalidCycleCount(number.to_owned()))?
        };
        self.sink.emit(Statement::Cycle(cycles))
    }

    fn on_comment(&mut self, _location: Location, text: &str) -> Result<()> {
        // Empty comment, always sent by CSV scenarios
        if text == "#" {
            return Ok(());
        }
        self.sink.emit(Statement::Comment(text.to_owned()))
    }

    fn on_set_tol(&mut self, _location: Location, path: &str, int_tol: &str, real_tol: &str) -> Result<()> {
        debug!("set_tol '{}': int '{}', real '{}'", path, int_tol, real_tol);
        self.tolerances.set_tol(path, int_tol, real_tol)
    }

    fn on_set(&mut self, location: Location, path: &str, value: &RawValue) -> Result<()> {
        let leaves = flatten_raw(value)?;
        let name = self.resolve(location, path);
        for leaf in leaves {
            self.sink
                .emit(Statement::set(format!("{}{}", name, leaf.suffix), leaf.literal))?;
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn on_check(
        &mut self,
        location: Location,
        path: &str,
        value: &RawValue,
        sustain: &str,
        _int_tol: &str,
        real_tol: &str,
        filter: &str,
    ) -> Result<()> {
        let sustain = parse_sustain(sustain)?;
        let tolerance = match parse_tolerance(real_tol)? {
            Some(tolerance) => Some(tolerance),
            None => self.tolerances.lookup(path),
        };
        let filter = (!filter.is_empty()).then(|| filter.to_owned());
        let leaves = flatten_raw(value)?;
        let name = self.resolve(location, path);

        let mut flattened = Vec::with_capacity(leaves.len());
        for leaf in leaves {
            let leaf_path = format!("{}{}", name, leaf.suffix);
            self.sink.emit(Statement::Check {
                path: leaf_path.clone(),
                literal: leaf.literal,
                sustain,
                tolerance,
                filter: filter.clone(),
            })?;
            flattened.push(leaf_path);
        }
        self.flattened_checks.insert(path.to_owned(), flattened);
        Ok(())
    }

    fn on_uncheck(&mut self, _location: Location, path: &str) -> Result<()> {
        let Some(flattened) = self.flattened_checks.get(path) else {
            debug!("uncheck of '{}' never checked, nothing emitted", path);
            return Ok(());
        };
        for leaf_path in flattened {
            self.sink.emit(Statement::uncheck(leaf_path.as_str()))?;
        }
        Ok(())
    }

    fn on_set_or_check(&mut self, location: Location, path: &str, value: &RawValue) -> Result<()> {
        let kind = self.directory.classify(self.unalias(path));
        trace!("set_or_check '{}': {}", path, kind);
        match kind {
            SignalKind::Input | SignalKind::Sensor => self.on_set(location, path, value),
            SignalKind::Output | SignalKind::Probe => {
                self.on_check(location, path, value, "", "", "", "")
            }
            SignalKind::Unknown => {
                self.report(
                    location,
                    Severity::Error,
                    format!("on_set_or_check({}) not an input or output", path),
                );
                Ok(())
            }
        }
    }

    fn on_alias(&mut self, _location: Location, alias: &str, path: &str) -> Result<()> {
        trace!("alias '{}' -> '{}'", alias, path);
        self.aliases.insert(alias.to_owned(), path.to_owned());
        Ok(())
    }

    fn on_alias_value(&mut self, location: Location, alias: &str, _value: &RawValue) -> Result<()> {
        self.report(
            location,
            Severity::Error,
            format!("alias_value '{}' not supported", alias),
        );
        Ok(())
    }

    fn on_notify(&mut self, location: Location, message: &str) -> Result<()> {
        debug!("notify at {}: {}", location, message);
        Ok(())
    }

    fn on_error(&mut self, location: Location, message: &str) -> Result<()> {
        self.report(location, Severity::Error, message.to_owned());
        Ok(())
    }
}
