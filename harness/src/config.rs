use std::path::Path;

use anyhow::{Context, Result};
use log::warn;
use serde::Deserialize;
use thg_common::config::DEFAULT_RUNTIME_CLASS;
use thg_common::tolerance::parse_tolerance;
use thg_common::ToleranceError;

/// Options of script generation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Module exposing the generated operator class
    pub module_name: String,
    /// Runtime class as `module.Class`
    pub runtime_class: String,
    /// Real tolerance applied to checks with none configured (`0.1`, `0.1r`)
    #[serde(deserialize_with = "crate::de::optional_scalar_text")]
    pub default_tolerance: Option<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            module_name: String::new(),
            runtime_class: DEFAULT_RUNTIME_CLASS.to_owned(),
            default_tolerance: None,
        }
    }
}

impl HarnessConfig {
    /// Build from generator option strings such as `-module_name first`.
    ///
    /// Unknown or incomplete options are skipped with a warning.
    pub fn from_args(args: &[&str]) -> Self {
        let mut config = Self::default();
        for arg in args {
            let Some((param, value)) = arg.trim().split_once(char::is_whitespace) else {
                warn!("Option '{}' has no value, ignored", arg);
                continue;
            };
            let value = value.trim();
            match param {
                "-module_name" => config.module_name = value.to_owned(),
                "-runtime_class" => config.runtime_class = value.to_owned(),
                _ => warn!("Unknown option '{}', ignored", param),
            }
        }
        config
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse harness configuration YAML")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Module name, or `fallback` lower-cased when none is configured.
    pub fn module_or(&self, fallback: &str) -> String {
        if self.module_name.is_empty() {
            fallback.to_lowercase()
        } else {
            self.module_name.clone()
        }
    }

    pub fn default_tolerance(&self) -> std::result::Result<Option<f64>, ToleranceError> {
        match &self.default_tolerance {
            Some(text) => parse_tolerance(text),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HarnessConfig::default();
        assert_eq!(config.runtime_class, "thg.runtime.Thgrt");
        assert_eq!(config.module_or("First"), "first");
        assert_eq!(config.default_tolerance().unwrap(), None);
    }

    #[test]
    fn test_from_args() {
        let config = HarnessConfig::from_args(&[
            "-module_name first",
            "-runtime_class my_module.MyRuntime",
            "-unknown x",
            "-lonely",
        ]);
        assert_eq!(config.module_name, "first");
        assert_eq!(config.runtime_class, "my_module.MyRuntime");
        assert_eq!(config.module_or("Other"), "first");
    }

    #[test]
    fn test_from_yaml() {
        let config = HarnessConfig::from_yaml("module_name: first\ndefault_tolerance: 0.1r\n").unwrap();
        assert_eq!(config.module_name, "first");
        assert_eq!(config.runtime_class, "thg.runtime.Thgrt");
        assert_eq!(config.default_tolerance().unwrap(), Some(-0.1));
    }

    #[test]
    fn test_from_yaml_numeric_tolerance() {
        let config = HarnessConfig::from_yaml("default_tolerance: 0.25").unwrap();
        assert_eq!(config.default_tolerance().unwrap(), Some(0.25));
    }

    #[test]
    fn test_from_yaml_invalid() {
        assert!(HarnessConfig::from_yaml("module_name: [1, 2]").is_err());
    }
}
