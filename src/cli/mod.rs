//! CLI command definitions and handlers

mod analyze;
mod criteria;
mod init;
mod report;

use crate::models::{RepoType, MAX_LEVEL, MIN_LEVEL};
use crate::reporters::OutputFormat;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// File name of the structured result in the system temp directory
pub const DEFAULT_ANALYSIS_FILE: &str = "readiness_analysis.json";

/// Shared default for `analyze --output` and `report --analysis-file`
pub fn default_analysis_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_ANALYSIS_FILE)
}

fn parse_repo_type(s: &str) -> Result<RepoType, String> {
    RepoType::from_str(s).map_err(|e| e.to_string())
}

/// Parse and validate a probe command timeout in seconds (1-600)
fn parse_timeout(s: &str) -> Result<u64, String> {
    let n: u64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("timeout must be at least 1 second".to_string())
    } else if n > 600 {
        Err("timeout cannot exceed 600 seconds".to_string())
    } else {
        Ok(n)
    }
}

fn parse_level(s: &str) -> Result<u8, String> {
    let n: u8 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid level", s))?;
    if (MIN_LEVEL..=MAX_LEVEL).contains(&n) {
        Ok(n)
    } else {
        Err(format!("level must be between {} and {}", MIN_LEVEL, MAX_LEVEL))
    }
}

/// Readiness - how ready is a repository for autonomous agents?
#[derive(Parser, Debug)]
#[command(name = "readiness")]
#[command(
    version,
    about = "Assess how ready a repository is for autonomous coding agents",
    long_about = "Evaluates a repository against 81 engineering-maturity criteria grouped \
into nine pillars and five levels, then renders a readiness report.\n\n\
Level N is achieved when at least 80% of the scored criteria at every level \
up to N pass. Criteria that do not apply to the repository type are skipped.",
    after_help = "\
Examples:
  readiness analyze .                    Analyze the current directory
  readiness report                       Full markdown report of the last analysis
  readiness report -f brief              Compact level bars and quick wins
  readiness analyze . --min-level 2      Exit 1 below L2 (CI mode)
  readiness criteria --pillar Security   List the Security criteria"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a repository and write the structured result as JSON
    #[command(after_help = "\
Examples:
  readiness analyze                               Analyze the current directory
  readiness analyze ../service -o result.json     Write the result elsewhere
  readiness analyze . --no-commands               Skip gh/glab/git probes
  readiness analyze . --repo-type library         Override archetype detection")]
    Analyze {
        /// Path to repository (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output file for the structured result
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Suppress progress and summary output
        #[arg(long, short = 'q')]
        quiet: bool,

        /// Never run external probe commands (gh, glab, git)
        #[arg(long)]
        no_commands: bool,

        /// Wall-clock limit in seconds for each probe command
        #[arg(long, value_parser = parse_timeout)]
        timeout: Option<u64>,

        /// Repository type: library, cli, database, monorepo, application
        #[arg(long, value_parser = parse_repo_type)]
        repo_type: Option<RepoType>,

        /// Exit with code 1 if the achieved level is below this level (1-5)
        #[arg(long, value_parser = parse_level)]
        min_level: Option<u8>,
    },

    /// Render a report from a structured result
    Report {
        /// Structured result written by `readiness analyze`
        #[arg(long, short = 'a')]
        analysis_file: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Output format: markdown (or md, full), brief, json
        #[arg(long, short = 'f', default_value = "markdown", value_parser = ["markdown", "md", "full", "brief", "json"])]
        format: String,
    },

    /// List the criterion catalog
    Criteria {
        /// Only criteria of this pillar (display name, case-insensitive)
        #[arg(long)]
        pillar: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Write a readiness.toml config template
    Init {
        /// Repository root (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            path,
            output,
            quiet,
            no_commands,
            timeout,
            repo_type,
            min_level,
        } => analyze::run(
            &path,
            &output.unwrap_or_else(default_analysis_path),
            analyze::Overrides {
                no_commands,
                timeout,
                repo_type,
            },
            quiet,
            min_level,
        ),

        Commands::Report {
            analysis_file,
            output,
            format,
        } => report::run(
            &analysis_file.unwrap_or_else(default_analysis_path),
            output.as_deref(),
            OutputFormat::from_str(&format)?,
        ),

        Commands::Criteria { pillar, json } => criteria::run(pillar.as_deref(), json),

        Commands::Init { path } => init::run(&path),
    }
}

/// Write `content` to a temp sibling, then rename into place, so readers
/// never observe a partial file
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    std::fs::write(&tmp_path, content)
        .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
    std::fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to move output into {}", path.display()))?;

    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
