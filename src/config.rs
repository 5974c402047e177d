use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub snapshot: SnapshotConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SnapshotConfig {
    /// Directory holding one `<subject_id>.json` snapshot per subject.
    pub dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default = "default_include_hierarchy")]
    pub include_hierarchy: bool,
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            include_hierarchy: true,
            pretty: true,
        }
    }
}

fn default_include_hierarchy() -> bool {
    true
}
fn default_pretty() -> bool {
    true
}

impl Config {
    pub fn snapshot_path(&self, subject_id: &str) -> PathBuf {
        self.snapshot.dir.join(format!("{}.json", subject_id))
    }

    /// Where reports are written. Falls back to `<snapshot.dir>/reports`.
    pub fn report_dir(&self) -> PathBuf {
        match &self.report.output_dir {
            Some(dir) => dir.clone(),
            None => self.snapshot.dir.join("reports"),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;

    if config.snapshot.dir.as_os_str().is_empty() {
        anyhow::bail!("snapshot.dir must not be empty");
    }

    if let Some(dir) = &config.report.output_dir {
        if dir.as_os_str().is_empty() {
            anyhow::bail!("report.output_dir must not be empty when set");
        }
    }

    Ok(config)
}
