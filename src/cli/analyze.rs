//! Analyze command - assess a repository and persist the structured result

use crate::analyzer::{AnalyzerOptions, RepoAnalyzer};
use crate::config::load_project_config;
use crate::models::{AnalysisResult, RepoType};
use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Flags that take precedence over `readiness.toml`
#[derive(Debug, Default)]
pub(super) struct Overrides {
    pub no_commands: bool,
    pub timeout: Option<u64>,
    pub repo_type: Option<RepoType>,
}

impl Overrides {
    fn apply(self, options: &mut AnalyzerOptions) {
        if self.no_commands {
            options.no_commands = true;
        }
        if let Some(secs) = self.timeout {
            options.settings.command_timeout = Duration::from_secs(secs);
        }
        if self.repo_type.is_some() {
            options.repo_type = self.repo_type;
        }
    }
}

pub(super) fn run(
    path: &Path,
    output: &Path,
    overrides: Overrides,
    quiet: bool,
    min_level: Option<u8>,
) -> Result<()> {
    let config = load_project_config(path);
    let mut options = AnalyzerOptions::from_config(&config);
    overrides.apply(&mut options);

    let analyzer = RepoAnalyzer::new(path, options)?;

    if !quiet {
        println!(
            "\n{} {}\n",
            style("Analyzing repository:").bold(),
            style(analyzer.root().display()).cyan()
        );
    }

    let spinner = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(create_spinner_style());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    };

    let result = analyzer.analyze_with_progress(|pillar| {
        spinner.set_message(format!("Evaluating {}...", pillar));
    });
    spinner.finish_and_clear();

    let json = serde_json::to_string_pretty(&result).context("Failed to serialize analysis")?;
    super::write_atomic(output, &json)?;

    if !quiet {
        print_summary(&result, output);
    }

    check_min_level(min_level, &result);
    Ok(())
}

fn create_spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn print_summary(result: &AnalysisResult, output: &Path) {
    println!(
        "{} Analysis complete: {}/{} criteria passed ({}%)",
        style("✓").green(),
        result.total_passed,
        result.total_criteria,
        result.pass_rate
    );
    let level = format!("L{}", result.achieved_level);
    let level = if result.achieved_level > 0 {
        style(level).green().bold()
    } else {
        style(level).yellow().bold()
    };
    println!("  Achieved Level: {}", level);
    println!(
        "  Results saved to: {}\n",
        style(output.display()).cyan()
    );
    println!(
        "{}",
        style("Run `readiness report` to render the full report.").dim()
    );
}

/// CI mode: the result file is already written when this exits
fn check_min_level(min_level: Option<u8>, result: &AnalysisResult) {
    if let Some(required) = min_level {
        if result.achieved_level < required {
            eprintln!(
                "Failing due to --min-level={}: achieved L{}",
                required, result.achieved_level
            );
            std::process::exit(1);
        }
    }
}
