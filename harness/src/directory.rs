use anyhow::Context;
use indexmap::IndexMap;
use serde::Deserialize;
use strum::{Display, EnumString};

/// Role of a signal of the operator under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum SignalKind {
    Input,
    Output,
    Sensor,
    Probe,
    Unknown,
}

impl SignalKind {
    /// Inputs and sensors are assigned by the scenario.
    pub fn is_settable(self) -> bool {
        matches!(self, SignalKind::Input | SignalKind::Sensor)
    }

    /// Outputs and probes are checked by the scenario.
    pub fn is_checkable(self) -> bool {
        matches!(self, SignalKind::Output | SignalKind::Probe)
    }
}

/// Lookup of scenario paths (`P::Main/a`) into generated signal names.
pub trait SignalDirectory {
    fn classify(&self, path: &str) -> SignalKind;

    /// Generated name of the signal, `None` for an unknown path.
    fn name(&self, path: &str) -> Option<&str>;
}

impl<T: SignalDirectory + ?Sized> SignalDirectory for &T {
    fn classify(&self, path: &str) -> SignalKind {
        (**self).classify(path)
    }

    fn name(&self, path: &str) -> Option<&str> {
        (**self).name(path)
    }
}

/// Directory backed by four path -> name tables.
///
/// Loadable from YAML:
///
/// ```yaml
/// inputs:
///   "P::Main/a": a
/// outputs:
///   "P::Main/v": v
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StaticDirectory {
    pub inputs: IndexMap<String, String>,
    pub outputs: IndexMap<String, String>,
    pub sensors: IndexMap<String, String>,
    pub probes: IndexMap<String, String>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, path: &str, name: &str) -> Self {
        self.inputs.insert(path.to_owned(), name.to_owned());
        self
    }

    pub fn with_output(mut self, path: &str, name: &str) -> Self {
        self.outputs.insert(path.to_owned(), name.to_owned());
        self
    }

    pub fn with_sensor(mut self, path: &str, name: &str) -> Self {
        self.sensors.insert(path.to_owned(), name.to_owned());
        self
    }

    pub fn with_probe(mut self, path: &str, name: &str) -> Self {
        self.probes.insert(path.to_owned(), name.to_owned());
        self
    }

    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse signal directory YAML")
    }

    fn tables(&self) -> [(SignalKind, &IndexMap<String, String>); 4] {
        [
            (SignalKind::Input, &self.inputs),
            (SignalKind::Output, &self.outputs),
            (SignalKind::Sensor, &self.sensors),
            (SignalKind::Probe, &self.probes),
        ]
    }
}

impl SignalDirectory for StaticDirectory {
    fn classify(&self, path: &str) -> SignalKind {
        self.tables()
            .into_iter()
            .find(|(_, table)| table.contains_key(path))
            .map(|(kind, _)| kind)
            .unwrap_or(SignalKind::Unknown)
    }

    fn name(&self, path: &str) -> Option<&str> {
        self.tables()
            .into_iter()
            .find_map(|(_, table)| table.get(path))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn directory() -> StaticDirectory {
        StaticDirectory::new()
            .with_input("P::Main/a", "a")
            .with_output("P::Main/v", "v")
            .with_sensor("P::S", "s")
            .with_probe("P::Main/p", "probe_p")
    }

    #[test]
    fn test_classify() {
        let directory = directory();
        assert_eq!(directory.classify("P::Main/a"), SignalKind::Input);
        assert_eq!(directory.classify("P::Main/v"), SignalKind::Output);
        assert_eq!(directory.classify("P::S"), SignalKind::Sensor);
        assert_eq!(directory.classify("P::Main/p"), SignalKind::Probe);
        assert_eq!(directory.classify("P::Main/x"), SignalKind::Unknown);
    }

    #[test]
    fn test_name() {
        let directory = directory();
        assert_eq!(directory.name("P::Main/p"), Some("probe_p"));
        assert_eq!(directory.name("P::Main/x"), None);
    }

    #[test]
    fn test_signal_kind_strings() {
        assert_eq!(SignalKind::Sensor.to_string(), "sensor");
        assert_eq!(SignalKind::from_str("probe").unwrap(), SignalKind::Probe);
        assert!(SignalKind::Input.is_settable());
        assert!(!SignalKind::Unknown.is_checkable());
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
inputs:
  "P::Main/a": a
outputs:
  "P::Main/v": v
"#;
        let directory = StaticDirectory::from_yaml(yaml).unwrap();
        assert_eq!(directory.classify("P::Main/v"), SignalKind::Output);
        assert!(directory.sensors.is_empty());
    }
}
