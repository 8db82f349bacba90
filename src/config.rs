//! Configuration System
//!
//! TOML configuration layered from a user-global file and the workspace
//! state directory, with an environment override for the worker count. The
//! workspace file, when present, takes precedence over the user-global file.

use crate::error::TreesumError;
use crate::logging::LoggingConfig;
use crate::pipeline::walker::WalkerConfig;
use crate::pipeline::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the per-workspace state directory
pub const STATE_DIR: &str = ".treesum";

/// Name of the configuration file inside either config location
pub const CONFIG_FILE: &str = "config.toml";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreesumConfig {
    /// Pipeline tuning
    #[serde(default)]
    pub pipeline: PipelineSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Pipeline tuning knobs as they appear in configuration files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSettings {
    /// Hash worker pool size (default: available parallelism)
    #[serde(default)]
    pub workers: Option<usize>,

    /// Task/result channel capacity (default: 2 x workers, minimum 32)
    #[serde(default)]
    pub queue_depth: Option<usize>,

    /// Entry names skipped during traversal
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,

    /// Maximum traversal depth (default: unlimited)
    #[serde(default)]
    pub max_depth: Option<usize>,
}

fn default_ignore() -> Vec<String> {
    vec![STATE_DIR.to_string()]
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            workers: None,
            queue_depth: None,
            ignore: default_ignore(),
            max_depth: None,
        }
    }
}

impl PipelineSettings {
    /// Materialize a pipeline config, filling unset knobs with defaults
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        let defaults = PipelineConfig::default();
        let workers = self.workers.unwrap_or(defaults.workers).max(1);
        PipelineConfig {
            workers,
            queue_depth: self.queue_depth.unwrap_or_else(|| (workers * 2).max(32)),
            walker: WalkerConfig {
                ignore_patterns: self.ignore.clone(),
                max_depth: self.max_depth,
            },
        }
    }

    /// Validate pipeline settings
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == Some(0) {
            return Err("workers must be at least 1".to_string());
        }
        if self.queue_depth == Some(0) {
            return Err("queue_depth must be at least 1".to_string());
        }
        Ok(())
    }
}

impl TreesumConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), TreesumError> {
        self.pipeline.validate().map_err(TreesumError::Config)
    }
}

/// Loads and layers configuration files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence: `TREESUM_WORKERS` env var, then
    /// `<workspace>/.treesum/config.toml`, then the user-global config file,
    /// then defaults.
    pub fn load(workspace_root: &Path) -> Result<TreesumConfig, TreesumError> {
        let workspace_file = workspace_root.join(STATE_DIR).join(CONFIG_FILE);

        let mut config = if workspace_file.is_file() {
            Self::read_file(&workspace_file)?
        } else if let Some(global_file) = Self::global_config_path() {
            if global_file.is_file() {
                Self::read_file(&global_file)?
            } else {
                TreesumConfig::default()
            }
        } else {
            TreesumConfig::default()
        };

        Self::apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit file path, bypassing layering
    pub fn load_from_file(path: &Path) -> Result<TreesumConfig, TreesumError> {
        let mut config = Self::read_file(path)?;
        Self::apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Location of the user-global configuration file, if resolvable
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "treesum")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    fn read_file(path: &Path) -> Result<TreesumConfig, TreesumError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            TreesumError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&raw)?)
    }

    fn apply_env_overrides(config: &mut TreesumConfig) -> Result<(), TreesumError> {
        if let Ok(raw) = std::env::var("TREESUM_WORKERS") {
            let workers: usize = raw.parse().map_err(|_| {
                TreesumError::Config(format!("invalid TREESUM_WORKERS value: {raw}"))
            })?;
            config.pipeline.workers = Some(workers);
        }
        Ok(())
    }
}
