use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use thg_common::config::{SCRIPT_EXTENSION, STATUS_FILE_NAME};

use crate::config::HarnessConfig;
use crate::directory::SignalDirectory;
use crate::driver::Harness;
use crate::replay::{replay, Scenario};
use crate::sink::{ScriptHeader, ScriptWriter};

/// Scripts generated for one test procedure, one per record.
///
/// Creating the set removes the status file of a previous generation;
/// [`finish`](Self::finish) writes a new one listing the generated scripts.
/// Every record starts from the default tolerance of the configuration.
pub struct ScriptSet {
    target_dir: PathBuf,
    procedure: String,
    config: HarnessConfig,
    generated: Vec<String>,
}

impl ScriptSet {
    pub fn create(target_dir: &Path, procedure: &str, config: &HarnessConfig) -> Result<Self> {
        config
            .default_tolerance()
            .context("Invalid default tolerance in harness configuration")?;

        fs::create_dir_all(target_dir)
            .with_context(|| format!("Failed to create target directory: {}", target_dir.display()))?;

        let status_file = target_dir.join(STATUS_FILE_NAME);
        if status_file.exists() {
            fs::remove_file(&status_file)
                .with_context(|| format!("Failed to remove status file: {}", status_file.display()))?;
        }

        Ok(Self {
            target_dir: target_dir.to_path_buf(),
            procedure: procedure.to_owned(),
            config: config.clone(),
            generated: Vec::new(),
        })
    }

    /// `<procedure>_<record>.py`, lower-cased.
    pub fn script_name(&self, record: &str) -> String {
        format!("{}_{}.{}", self.procedure, record, SCRIPT_EXTENSION).to_lowercase()
    }

    /// Generate the script of `record` from its scenarios, replayed in order
    /// into a fresh driver.
    pub fn generate_record<D: SignalDirectory>(
        &mut self,
        record: &str,
        header: &ScriptHeader,
        directory: D,
        scenarios: &[Scenario],
    ) -> Result<PathBuf> {
        let name = self.script_name(record);
        let path = self.target_dir.join(&name);
        info!("=== record {} for {}/{}", record, header.operator, self.procedure);

        let file =
            File::create(&path).with_context(|| format!("Failed to create script: {}", path.display()))?;
        let mut writer = ScriptWriter::start(BufWriter::new(file), header)?;

        let mut harness = Harness::with_config(directory, &mut writer, &self.config)?;
        for scenario in scenarios {
            replay(scenario, &mut harness)
                .with_context(|| format!("Record '{}' not generated", record))?;
        }
        for diagnostic in harness.diagnostics() {
            warn!("{}: {}", name, diagnostic);
        }
        drop(harness);

        writer.finish()?;
        self.generated.push(name);
        Ok(path)
    }

    /// Names of the scripts generated so far.
    pub fn generated(&self) -> &[String] {
        &self.generated
    }

    /// Write the status file and return its path.
    pub fn finish(self) -> Result<PathBuf> {
        let status_file = self.target_dir.join(STATUS_FILE_NAME);
        let mut content = self.generated.join("\n");
        content.push('\n');
        fs::write(&status_file, content)
            .with_context(|| format!("Failed to write status file: {}", status_file.display()))?;
        Ok(status_file)
    }
}
