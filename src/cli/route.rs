//! CLI route: single route table and run context. Dispatches to the pipeline
//! and snapshot services and renders command output.

use crate::cli::parse::Commands;
use crate::config::ConfigLoader;
use crate::error::TreesumError;
use crate::pipeline::{self, PipelineConfig, TreeDigest};
use crate::snapshot::Snapshot;
use crate::types::digest_to_hex;
use owo_colors::{OwoColorize, Stream};
use serde_json::json;
use std::path::PathBuf;

/// Rendered result of one command
#[derive(Debug)]
pub struct CommandOutput {
    /// Text printed to stdout
    pub text: String,
    /// Process exit code (`check` reports drift through a nonzero code)
    pub exit_code: i32,
}

impl CommandOutput {
    fn ok(text: String) -> Self {
        Self { text, exit_code: 0 }
    }

    fn with_code(text: String, exit_code: i32) -> Self {
        Self { text, exit_code }
    }
}

/// Runtime context for CLI execution: workspace root and resolved pipeline
/// configuration.
pub struct RunContext {
    workspace_root: PathBuf,
    pipeline_config: PipelineConfig,
}

impl RunContext {
    /// Create a run context from the workspace root, optional config path,
    /// and optional worker-count override (CLI flag wins over config).
    pub fn new(
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
        workers_override: Option<usize>,
    ) -> Result<Self, TreesumError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };

        let mut settings = config.pipeline;
        if let Some(workers) = workers_override {
            if workers == 0 {
                return Err(TreesumError::Config(
                    "workers must be at least 1".to_string(),
                ));
            }
            settings.workers = Some(workers);
        }

        Ok(Self {
            workspace_root,
            pipeline_config: settings.to_pipeline_config(),
        })
    }

    /// Execute a CLI command via the single route table
    pub fn execute(&self, command: &Commands) -> Result<CommandOutput, TreesumError> {
        match command {
            Commands::Hash { files, format } => self.run_hash(*files, format),
            Commands::Record => self.run_record(),
            Commands::Check { detail, format } => self.run_check(*detail, format),
        }
    }

    fn digest_workspace(&self) -> Result<TreeDigest, TreesumError> {
        Ok(pipeline::compute_tree_digest(
            &self.workspace_root,
            &self.pipeline_config,
        )?)
    }

    fn run_hash(&self, list_files: bool, format: &str) -> Result<CommandOutput, TreesumError> {
        let digest = self.digest_workspace()?;

        if format == "json" {
            let mut value = json!({
                "aggregate": digest_to_hex(&digest.aggregate),
                "file_count": digest.files.len(),
            });
            if list_files {
                let files = digest
                    .files
                    .iter()
                    .map(|(path, d)| (path.clone(), json!(digest_to_hex(d))))
                    .collect::<serde_json::Map<_, _>>();
                value["files"] = json!(files);
            }
            return Ok(CommandOutput::ok(serde_json::to_string_pretty(&value)?));
        }

        let mut text = String::new();
        if list_files {
            for (path, d) in &digest.files {
                text.push_str(&format!("{}  {}\n", digest_to_hex(d), path));
            }
        }
        text.push_str(&digest_to_hex(&digest.aggregate));
        Ok(CommandOutput::ok(text))
    }

    fn run_record(&self) -> Result<CommandOutput, TreesumError> {
        let digest = self.digest_workspace()?;
        let snapshot = Snapshot::from_tree_digest(&digest);
        let path = snapshot.save(&self.workspace_root)?;

        Ok(CommandOutput::ok(format!(
            "Recorded {} files (aggregate {}) to {}",
            snapshot.file_count,
            snapshot.aggregate,
            path.display()
        )))
    }

    fn run_check(&self, detail: bool, format: &str) -> Result<CommandOutput, TreesumError> {
        let digest = self.digest_workspace()?;
        let snapshot = Snapshot::load(&self.workspace_root)?.ok_or(TreesumError::NoSnapshot)?;

        let clean = snapshot.matches(&digest);
        let diff = snapshot.diff(&digest);
        let exit_code = if clean { 0 } else { 1 };

        if format == "json" {
            let mut value = json!({
                "status": if clean { "clean" } else { "changed" },
                "aggregate": digest_to_hex(&digest.aggregate),
                "recorded_aggregate": snapshot.aggregate,
                "recorded_at": snapshot.recorded_at.to_rfc3339(),
            });
            if detail {
                value["added"] = json!(diff.added);
                value["removed"] = json!(diff.removed);
                value["modified"] = json!(diff.modified);
            }
            return Ok(CommandOutput::with_code(
                serde_json::to_string_pretty(&value)?,
                exit_code,
            ));
        }

        let mut text = if clean {
            format!(
                "{}: workspace matches snapshot from {}",
                "clean".if_supports_color(Stream::Stdout, |t| t.green()),
                snapshot.recorded_at.to_rfc3339()
            )
        } else {
            format!(
                "{}: {} added, {} removed, {} modified since {}",
                "changed".if_supports_color(Stream::Stdout, |t| t.red()),
                diff.added.len(),
                diff.removed.len(),
                diff.modified.len(),
                snapshot.recorded_at.to_rfc3339()
            )
        };

        if detail && !clean {
            for path in &diff.added {
                text.push_str(&format!("\nA {}", path));
            }
            for path in &diff.removed {
                text.push_str(&format!("\nD {}", path));
            }
            for path in &diff.modified {
                text.push_str(&format!("\nM {}", path));
            }
        }

        Ok(CommandOutput::with_code(text, exit_code))
    }
}
