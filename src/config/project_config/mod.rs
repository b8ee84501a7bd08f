//! Project-level configuration support
//!
//! Loads per-project configuration from `readiness.toml` or
//! `.readinessrc.json` in the repository root. Configuration is optional;
//! an unreadable file is reported and defaults are used.
//!
//! # Configuration Format
//!
//! ```toml
//! # readiness.toml
//!
//! repo_type = "library"
//!
//! [analysis]
//! command_timeout_secs = 10
//! search_sample = 10
//! no_commands = false
//!
//! [skip]
//! criteria = ["vcs_cli_tools"]
//! reason = "Excluded by project configuration"
//! ```

use crate::catalog;
use crate::models::RepoType;
use crate::probe::{ProbeSettings, DEFAULT_COMMAND_TIMEOUT_SECS, DEFAULT_SEARCH_SAMPLE};
use crate::skip::SkipRules;
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Preferred config file name, also written by `readiness init`
pub const CONFIG_FILE: &str = "readiness.toml";

/// Fallback JSON config file name
pub const JSON_CONFIG_FILE: &str = ".readinessrc.json";

/// Project-level configuration loaded from readiness.toml or .readinessrc.json
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct ProjectConfig {
    /// Archetype override (auto-detected if not specified)
    #[serde(default)]
    pub repo_type: Option<RepoType>,

    /// Probe tuning
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Extra criteria excluded from scoring
    #[serde(default)]
    pub skip: SkipConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    /// Wall-clock limit for each probe command (default: 10)
    #[serde(default = "default_command_timeout_secs")]
    pub command_timeout_secs: u64,

    /// Files inspected per content search (default: 10)
    #[serde(default = "default_search_sample")]
    pub search_sample: usize,

    /// Never run external probe commands
    #[serde(default)]
    pub no_commands: bool,
}

fn default_command_timeout_secs() -> u64 {
    DEFAULT_COMMAND_TIMEOUT_SECS
}

fn default_search_sample() -> usize {
    DEFAULT_SEARCH_SAMPLE
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            command_timeout_secs: default_command_timeout_secs(),
            search_sample: default_search_sample(),
            no_commands: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct SkipConfig {
    #[serde(default)]
    pub criteria: Vec<String>,

    /// Reason shown for configured skips
    #[serde(default)]
    pub reason: Option<String>,
}

impl ProjectConfig {
    pub fn probe_settings(&self) -> ProbeSettings {
        let mut settings = ProbeSettings::default();

        if self.analysis.command_timeout_secs == 0 {
            warn!(
                "command_timeout_secs must be positive, using {}",
                DEFAULT_COMMAND_TIMEOUT_SECS
            );
        } else {
            settings.command_timeout = Duration::from_secs(self.analysis.command_timeout_secs);
        }

        if self.analysis.search_sample == 0 {
            warn!("search_sample must be positive, using {}", DEFAULT_SEARCH_SAMPLE);
        } else {
            settings.search_sample = self.analysis.search_sample;
        }

        settings
    }

    /// Skip rules carrying the configured exclusions. Unknown criterion ids
    /// are reported and ignored.
    pub fn skip_rules(&self) -> SkipRules {
        let known: Vec<&str> = self
            .skip
            .criteria
            .iter()
            .map(String::as_str)
            .filter(|id| {
                let exists = catalog::find(id).is_some();
                if !exists {
                    warn!("Ignoring unknown criterion in [skip]: {}", id);
                }
                exists
            })
            .collect();
        SkipRules::with_exclusions(known, self.skip.reason.clone())
    }
}

/// Load project configuration from the repository root.
///
/// Tries `readiness.toml`, then `.readinessrc.json`. Returns defaults when
/// neither exists or neither parses.
pub fn load_project_config(repo_path: &Path) -> ProjectConfig {
    // Try TOML first (preferred format)
    let toml_path = repo_path.join(CONFIG_FILE);
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {:#}", toml_path.display(), e);
            }
        }
    }

    let json_path = repo_path.join(JSON_CONFIG_FILE);
    if json_path.exists() {
        match load_json_config(&json_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", json_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {:#}", json_path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

fn load_toml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = toml::from_str(&content)?;
    Ok(config)
}

fn load_json_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Commented template written by `readiness init`
pub const CONFIG_TEMPLATE: &str = r#"# Agent readiness configuration
# All keys are optional; remove the leading '#' to enable one.

# Force the archetype instead of auto-detecting it
# (library | cli | database | monorepo | application)
# repo_type = "application"

[analysis]
# Wall-clock limit in seconds for each probe command (gh, glab, git)
command_timeout_secs = 10

# Files inspected per content search
search_sample = 10

# Never run external probe commands
no_commands = false

[skip]
# Criteria excluded from scoring, e.g. ["vcs_cli_tools"]
criteria = []
# reason = "Excluded by project configuration"
"#;

/// Write the template into `dir`. Refuses to overwrite an existing file.
pub fn write_config_template(dir: &Path) -> anyhow::Result<PathBuf> {
    let path = dir.join(CONFIG_FILE);
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }
    std::fs::write(&path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests;
