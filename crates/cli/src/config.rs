use anyhow::{anyhow, Context, Result};
use doctrace_catalog::CatalogConfig;
use doctrace_navigator::OverlayConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "doctrace.toml";

/// Contents of `doctrace.toml`; missing tables fall back to defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub overlay: OverlayConfig,
}

impl AppConfig {
    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.catalog
            .validate()
            .map_err(|err| anyhow!("[catalog] {err}"))?;
        self.overlay
            .validate()
            .map_err(|err| anyhow!("[overlay] {err}"))?;
        Ok(())
    }

    /// Load an explicit file, else `doctrace.toml` when present, else defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Path::new(DEFAULT_CONFIG_FILE),
            None => return Ok(Self::default()),
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}
