use indexmap::IndexMap;
use log::debug;
use thg_common::tolerance::parse_tolerance;

use crate::error::Result;

/// Real tolerances configured by `set_tol` directives.
///
/// A per-path entry wins over the default; there is no default until one is
/// configured. A path configured with an empty tolerance is compared exactly,
/// whatever the default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToleranceTable {
    default: Option<f64>,
    paths: IndexMap<String, Option<f64>>,
}

impl ToleranceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(default: Option<f64>) -> Self {
        Self {
            default,
            paths: IndexMap::new(),
        }
    }

    /// Apply a `set_tol` directive.
    ///
    /// An empty path sets the default. The integer tolerance is accepted for
    /// compatibility and ignored: integer checks are always exact.
    pub fn set_tol(&mut self, path: &str, int_tol: &str, real_tol: &str) -> Result<()> {
        let tolerance = parse_tolerance(real_tol)?;
        if !int_tol.trim().is_empty() {
            debug!("Integer tolerance '{}' ignored for '{}'", int_tol, path);
        }

        if path.is_empty() {
            self.default = tolerance;
        } else {
            self.paths.insert(path.to_owned(), tolerance);
        }
        Ok(())
    }

    pub fn lookup(&self, path: &str) -> Option<f64> {
        match self.paths.get(path) {
            Some(tolerance) => *tolerance,
            None => self.default,
        }
    }

    pub fn default_tolerance(&self) -> Option<f64> {
        self.default
    }
}
