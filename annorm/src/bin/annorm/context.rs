use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "annorm.toml";

/// Project context for annorm operations
pub struct ProjectContext {
    /// Root directory of the project (where Cargo.toml is)
    pub project_root: PathBuf,
    /// Loaded configuration, defaults when no config file exists
    pub config: AnnormConfig,
}

/// Configuration stored in annorm.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnormConfig {
    #[serde(default)]
    pub scan: ScanSettings,
    /// Table name to alias substitutions applied to rendered fragments
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSettings {
    #[serde(default = "default_scan_dirs")]
    pub dirs: Vec<String>,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            dirs: default_scan_dirs(),
        }
    }
}

fn default_scan_dirs() -> Vec<String> {
    vec!["src".to_string(), "tests".to_string(), "demos".to_string()]
}

impl ProjectContext {
    /// Find and load project context from current directory or ancestors
    pub fn find() -> Result<Self> {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        Self::find_from(&current_dir)
    }

    /// Find project context starting from the given directory
    pub fn find_from(start: &Path) -> Result<Self> {
        let project_root = Self::find_project_root(start)?;
        Self::from_root(project_root)
    }

    /// Create context from a known project root
    pub fn from_root(project_root: PathBuf) -> Result<Self> {
        let config_path = project_root.join(CONFIG_FILE);

        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            toml::from_str(&content).with_context(|| format!("Failed to parse {}", config_path.display()))?
        } else {
            AnnormConfig::default()
        };

        Ok(Self { project_root, config })
    }

    /// Find project root by looking for Cargo.toml
    fn find_project_root(start: &Path) -> Result<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            let cargo_toml = current.join("Cargo.toml");
            if cargo_toml.exists() {
                return Ok(current);
            }

            if !current.pop() {
                anyhow::bail!(
                    "Could not find Cargo.toml in {start:?} or any parent directory. \
                     Are you in a Rust project?"
                );
            }
        }
    }

    /// Directories to scan for entities, resolved against the project root
    pub fn scan_dirs(&self) -> Vec<PathBuf> {
        self.config
            .scan
            .dirs
            .iter()
            .map(|dir| self.project_root.join(dir))
            .collect()
    }
}
