//! CLI Commands

pub mod config;
pub mod quote;
pub mod retail;

use anyhow::Context as _;
use moracat_pricing::{CostPlusEngine, EngineConfig, Language};
use std::path::PathBuf;

use crate::config::Config;
use crate::output::OutputFormat;

/// Resolved settings shared by every command
pub struct Context {
    pub engine: CostPlusEngine,
    /// File the engine configuration came from, if any
    pub engine_source: Option<PathBuf>,
    pub language: Language,
    pub format: OutputFormat,
}

impl Context {
    /// Flags win over the settings file, which wins over built-in defaults
    pub fn new(
        settings: &Config,
        engine_config: Option<PathBuf>,
        language: Option<Language>,
        format: Option<OutputFormat>,
    ) -> anyhow::Result<Self> {
        let engine_source = engine_config.or_else(|| settings.engine_config.clone());
        let engine = match &engine_source {
            Some(path) => {
                let config = EngineConfig::load(path)
                    .with_context(|| format!("loading engine config {}", path.display()))?;
                tracing::debug!(path = %path.display(), "loaded engine config");
                CostPlusEngine::with_config(config)?
            }
            None => CostPlusEngine::new(),
        };

        let language = match (language, settings.language.as_deref()) {
            (Some(l), _) => l,
            (None, Some(l)) => l.parse()?,
            (None, None) => Language::default(),
        };

        Ok(Self {
            engine,
            engine_source,
            language,
            format: format.or(settings.default_format).unwrap_or_default(),
        })
    }
}
