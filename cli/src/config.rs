//! CLI Configuration

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Engine configuration file used when `--config` is not given
    pub engine_config: Option<PathBuf>,
    pub language: Option<String>,
    pub default_format: Option<OutputFormat>,
}

impl Config {
    pub fn load(profile: Option<&str>) -> anyhow::Result<Self> {
        match Self::config_path(profile) {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    fn config_path(profile: Option<&str>) -> Option<PathBuf> {
        let home = dirs::home_dir()?;
        let filename = match profile {
            Some(p) => format!("config.{}.toml", p),
            None => "config.toml".to_string(),
        };
        Some(home.join(".moracat").join(filename))
    }
}
