use anyhow::{Context, Result};
use pumukit_model::SchemaConfig;
use pumukit_storage::StorageConfig;
use pumukit_workflow::WorkflowConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "pumukit.toml";

/// Contents of `pumukit.toml`. Every table is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub schema: SchemaConfig,
    pub storage: StorageConfig,
    pub workflow: WorkflowConfig,
}

impl AdminConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path`, or returns the defaults when there is no file to read.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        self.schema.validate().context("[schema]")?;
        self.workflow.validate().context("[workflow]")?;
        Ok(())
    }
}
