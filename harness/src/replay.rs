//! Recorded scenarios replayed through a [`ScenarioHandler`].
//!
//! A scenario is a YAML document listing directives in order:
//!
//! ```yaml
//! name: nominal
//! directives:
//!   - directive: alias
//!     alias: v1
//!     path: P::Main/v1
//!   - directive: set
//!     path: P::Main/a
//!     value: (1, 2)
//!   - directive: check
//!     path: v1
//!     value: 0.9
//!     sustain: forever
//!     real_tol: 0.1r
//!   - directive: cycle
//!     number: 3
//! ```
//!
//! Values are literal text or YAML lists and maps; option fields accept
//! numbers as well as strings.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use serde::Deserialize;
use thg_common::RawValue;

use crate::de::scalar_text;
use crate::handler::{Location, ScenarioHandler};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "directive", rename_all = "snake_case")]
pub enum Directive {
    Cycle {
        #[serde(default, deserialize_with = "scalar_text")]
        number: String,
    },
    Set {
        path: String,
        value: RawValue,
    },
    Check {
        path: String,
        value: RawValue,
        #[serde(default, deserialize_with = "scalar_text")]
        sustain: String,
        #[serde(default, deserialize_with = "scalar_text")]
        int_tol: String,
        #[serde(default, deserialize_with = "scalar_text")]
        real_tol: String,
        #[serde(default)]
        filter: String,
    },
    Uncheck {
        path: String,
    },
    SetOrCheck {
        path: String,
        value: RawValue,
    },
    SetTol {
        #[serde(default)]
        path: String,
        #[serde(default, deserialize_with = "scalar_text")]
        int_tol: String,
        #[serde(default, deserialize_with = "scalar_text")]
        real_tol: String,
    },
    Alias {
        alias: String,
        path: String,
    },
    AliasValue {
        alias: String,
        value: RawValue,
    },
    Comment {
        text: String,
    },
    Notify {
        message: String,
    },
    Error {
        message: String,
    },
}

impl Directive {
    pub fn name(&self) -> &'static str {
        match self {
            Directive::Cycle { .. } => "cycle",
            Directive::Set { .. } => "set",
            Directive::Check { .. } => "check",
            Directive::Uncheck { .. } => "uncheck",
            Directive::SetOrCheck { .. } => "set_or_check",
            Directive::SetTol { .. } => "set_tol",
            Directive::Alias { .. } => "alias",
            Directive::AliasValue { .. } => "alias_value",
            Directive::Comment { .. } => "comment",
            Directive::Notify { .. } => "notify",
            Directive::Error { .. } => "error",
        }
    }

    /// Invoke the matching callback of `handler`.
    pub fn apply<H: ScenarioHandler + ?Sized>(&self, handler: &mut H, location: Location) -> crate::error::Result<()> {
        match self {
            Directive::Cycle { number } => handler.on_cycle(location, number),
            Directive::Set { path, value } => handler.on_set(location, path, value),
            Directive::Check {
                path,
                value,
                sustain,
                int_tol,
                real_tol,
                filter,
            } => handler.on_check(location, path, value, sustain, int_tol, real_tol, filter),
            Directive::Uncheck { path } => handler.on_uncheck(location, path),
            Directive::SetOrCheck { path, value } => handler.on_set_or_check(location, path, value),
            Directive::SetTol {
                path,
                int_tol,
                real_tol,
            } => handler.on_set_tol(location, path, int_tol, real_tol),
            Directive::Alias { alias, path } => handler.on_alias(location, alias, path),
            Directive::AliasValue { alias, value } => handler.on_alias_value(location, alias, value),
            Directive::Comment { text } => handler.on_comment(location, text),
            Directive::Notify { message } => handler.on_notify(location, message),
            Directive::Error { message } => handler.on_error(location, message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayReport {
    pub scenario: String,
    /// Directives handled successfully
    pub directives: usize,
}

/// Parse a scenario from a YAML string.
pub fn parse_scenario(yaml: &str) -> Result<Scenario> {
    let scenario: Scenario = serde_yaml::from_str(yaml).context("Failed to parse scenario YAML")?;

    validate_scenario(&scenario)?;
    Ok(scenario)
}

/// Parse a scenario from a file path.
pub fn parse_scenario_file(path: &Path) -> Result<Scenario> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file: {}", path.display()))?;
    parse_scenario(&content)
}

fn validate_scenario(scenario: &Scenario) -> Result<()> {
    if scenario.name.trim().is_empty() {
        return Err(anyhow!("Scenario name cannot be empty"));
    }
    Ok(())
}

/// Replay the directives of `scenario` in order.
///
/// Stops at the first directive the handler rejects. The location given to
/// the handler is the 1-based index of the directive in the list.
pub fn replay<H: ScenarioHandler + ?Sized>(scenario: &Scenario, handler: &mut H) -> Result<ReplayReport> {
    info!(
        "Replaying scenario '{}' ({} directives)",
        scenario.name,
        scenario.directives.len()
    );

    for (index, directive) in scenario.directives.iter().enumerate() {
        let location = Location::new(index as u32 + 1, 1);
        debug!("{} {}", location, directive.name());
        directive.apply(handler, location).with_context(|| {
            format!(
                "Scenario '{}': {} directive #{} failed",
                scenario.name,
                directive.name(),
                index + 1
            )
        })?;
    }

    Ok(ReplayReport {
        scenario: scenario.name.clone(),
        directives: scenario.directives.len(),
    })
}
